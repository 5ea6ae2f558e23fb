use futures::{FutureExt, StreamExt, stream};
use log::{error, info};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::core::types::{CheckRequest, CheckResult};
use crate::reporting::logging;
use crate::reporting::telemetry::{NoopProgressSink, ProgressSink, ProgressTracker};
use crate::validation::classifier::Classify;

/// Runs a classifier over a batch with bounded concurrency.
///
/// Results come back in input order no matter which URL finishes first,
/// and a panic while checking one URL becomes that URL's result instead
/// of taking down the batch. There is no batch deadline; only the
/// per-request timeouts bound how long a single URL can take.
pub struct Dispatcher<C> {
    classifier: C,
    max_workers: usize,
    progress_interval: Duration,
    sink: Arc<dyn ProgressSink>,
}

impl<C: Classify> Dispatcher<C> {
    pub fn new(classifier: C, max_workers: usize) -> Self {
        Self {
            classifier,
            max_workers: max_workers.max(1),
            progress_interval: Config::default().progress_interval_duration(),
            sink: Arc::new(NoopProgressSink),
        }
    }

    pub fn from_config(classifier: C, config: &Config) -> Self {
        Self::new(classifier, config.max_workers())
            .with_progress_interval(config.progress_interval_duration())
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify every URL and return one result per input, in input order.
    ///
    /// Returns only once every URL has a terminal result.
    pub async fn run(&self, urls: Vec<String>) -> Vec<CheckResult> {
        let total = urls.len();
        let started = Instant::now();

        let mut results: Vec<CheckResult> =
            urls.iter().map(|url| CheckResult::not_processed(url)).collect();
        let mut tracker = ProgressTracker::new(total, self.progress_interval);
        self.sink.on_start(total);

        let mut completions = stream::iter(CheckRequest::batch(urls))
            .map(|request| self.check_isolated(request))
            .buffer_unordered(self.max_workers);

        while let Some((index, result)) = completions.next().await {
            logging::log_check_result(&result);
            if let Some(slot) = results.get_mut(index) {
                *slot = result;
            }
            if let Some(snapshot) = tracker.record_completion() {
                self.sink.on_progress(&snapshot);
            }
        }

        self.sink.on_finish(&tracker.snapshot());
        info!(
            "Processed {total} URLs in {:.2}s",
            started.elapsed().as_secs_f64()
        );

        results
    }

    async fn check_isolated(&self, request: CheckRequest) -> (usize, CheckResult) {
        let CheckRequest { url, index } = request;
        let outcome = AssertUnwindSafe(self.classifier.classify(&url))
            .catch_unwind()
            .await;

        let result = match outcome {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Error processing {url}: {message}");
                CheckResult::exception(&url, &message)
            }
        };

        (index, result)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
