//! Reporting
//!
//! Progress telemetry while a batch runs, structured logging, and the CSV
//! files written once it finishes.

pub mod csv_sink;
pub mod logging;
pub mod telemetry;

// Re-export commonly used items
pub use csv_sink::{sheet_text_path, write_results, write_sheet_text};
pub use telemetry::{
    LogProgressSink, NoopProgressSink, ProgressSink, ProgressSnapshot, ProgressTracker,
};
