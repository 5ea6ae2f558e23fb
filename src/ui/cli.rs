// Command-line interface definitions and parsing for jobcheck

use crate::config::CliConfig;
use crate::core::constants::{defaults, output_formats};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Check whether job posting URLs are still live", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Input & Output
    /// File with one posting URL per line
    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        default_value = defaults::INPUT_FILE,
        help_heading = "Input & Output"
    )]
    pub input: String,

    /// CSV file to write results to
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        default_value = defaults::OUTPUT_FILE,
        help_heading = "Input & Output"
    )]
    pub output: String,

    /// Do not write the companion sheet-text file
    #[arg(long, help_heading = "Input & Output")]
    pub no_sheet_text: bool,

    // Classification
    /// Inspect page content for expiry phrases and provider markers
    #[arg(long, help_heading = "Classification")]
    pub verify_content: bool,

    /// Extra attempts when no HTTP status was obtained (default: 0)
    #[arg(long, value_name = "COUNT", help_heading = "Classification")]
    pub retries: Option<u32>,

    /// Concurrent checks (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Classification")]
    pub max_workers: Option<usize>,

    /// Pause before each attempt in seconds (default: 0)
    #[arg(long, value_name = "SECONDS", help_heading = "Classification")]
    pub delay: Option<f64>,

    // Network
    /// HEAD probe timeout in seconds (default: 5)
    #[arg(long, value_name = "SECONDS", help_heading = "Network")]
    pub head_timeout: Option<u64>,

    /// GET timeout in seconds (default: 10)
    #[arg(long, value_name = "SECONDS", help_heading = "Network")]
    pub get_timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Summary format printed to stdout (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Suppress progress and summary output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable the progress bar
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a shell completion script to stdout
    #[command(arg_required_else_help = true)]
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert parsed CLI arguments into a `CliConfig`.
///
/// Range checks happen later in `Config::validate` so that values from a
/// config file and from flags are rejected the same way.
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        verify_content: cli.verify_content,
        retries: cli.retries,
        max_workers: cli.max_workers,
        delay: cli.delay,
        head_timeout: cli.head_timeout,
        get_timeout: cli.get_timeout,
        user_agent: cli.user_agent.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        no_sheet_text: cli.no_sheet_text,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
