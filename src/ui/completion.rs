// Shell completion generation

use clap::{Command, CommandFactory};
use clap_complete::{Generator, Shell, generate};
use std::io::Write;

use crate::ui::cli::Cli;

/// Print completion script for the given shell to stdout
pub fn print_completions<G: Generator>(generator: G, app: &mut Command) {
    write_completions(generator, app, &mut std::io::stdout());
}

pub fn write_completions<G: Generator, W: Write>(generator: G, app: &mut Command, out: &mut W) {
    let name = app.get_name().to_string();
    generate(generator, app, name, out);
}

/// Completion script for `jobcheck` itself
pub fn completion_script(shell: Shell) -> String {
    let mut buf = Vec::new();
    write_completions(shell, &mut Cli::command(), &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
