//! ANSI color helpers for terminal output

use std::env;
use std::io::IsTerminal;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";

    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_color() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    colorize(text, Colors::BOLD)
}

/// Whether ANSI escapes should be written to stdout
pub fn supports_color() -> bool {
    color_allowed(
        env::var_os("NO_COLOR").is_some(),
        env::var("FORCE_COLOR").ok().as_deref(),
        env::var("TERM").ok().as_deref(),
        std::io::stdout().is_terminal(),
    )
}

fn color_allowed(
    no_color: bool,
    force_color: Option<&str>,
    term: Option<&str>,
    is_terminal: bool,
) -> bool {
    if no_color || force_color == Some("0") {
        return false;
    }
    if force_color.is_some() {
        return true;
    }
    if cfg!(test) {
        return false;
    }
    match term {
        Some("dumb") | Some("") => false,
        _ => is_terminal,
    }
}
