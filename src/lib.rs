//! Job posting liveness checker
//!
//! Takes a batch of job posting URLs and decides, for each one, whether the
//! posting is still live or has expired. Checks run concurrently under a
//! worker limit, fall back from HEAD to GET, honour `Retry-After` on 429
//! responses, and optionally inspect page content for expiry phrases and
//! provider-specific markers. One result is produced per input URL, in input
//! order.
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobcheck::config::Config;
//! use jobcheck::reporting::NoopProgressSink;
//!
//! # async fn run() -> jobcheck::core::Result<()> {
//! let urls = vec!["https://boards.greenhouse.io/acme/jobs/1".to_string()];
//! let results = jobcheck::check_urls(urls, &Config::default(), Arc::new(NoopProgressSink)).await?;
//! for result in &results {
//!     println!("{result}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

use std::sync::Arc;

use crate::config::Config;
use crate::reporting::telemetry::ProgressSink;
use crate::validation::{Dispatcher, LivenessClassifier, RetryController};

pub use crate::core::{CheckRequest, CheckResult, JobCheckError, Verdict};

/// Check a batch with the full pipeline: classifier, retries, worker pool.
///
/// Fails only when the configuration is invalid or the HTTP client cannot
/// be built. Every per-URL problem ends up in that URL's result.
pub async fn check_urls(
    urls: Vec<String>,
    config: &Config,
    sink: Arc<dyn ProgressSink>,
) -> crate::core::Result<Vec<CheckResult>> {
    config.validate()?;

    let classifier = LivenessClassifier::from_config(config)?;
    let dispatcher = Dispatcher::from_config(RetryController::from_config(classifier, config), config)
        .with_sink(sink);

    Ok(dispatcher.run(urls).await)
}
