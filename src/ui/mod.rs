//! User interface and interaction
//!
//! CLI parsing, the progress bar, stdout result rendering, and shell
//! completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use completion::print_completions;
pub use output::{BatchSummary, display_results};
pub use progress::ProgressReporter;
