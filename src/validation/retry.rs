use async_trait::async_trait;
use log::{debug, warn};
use tokio::time::{Duration, sleep};

use crate::config::Config;
use crate::core::types::CheckResult;
use crate::validation::classifier::Classify;

/// Repeats a classification while no HTTP status was obtained.
///
/// Runs at most `retries + 1` attempts and waits `delay` before each one.
/// A result carrying any status, expired or not, ends the loop at once.
#[derive(Debug, Clone)]
pub struct RetryController<C> {
    inner: C,
    retries: u32,
    delay: Duration,
}

impl<C: Classify> RetryController<C> {
    pub fn new(inner: C, retries: u32, delay: Duration) -> Self {
        Self {
            inner,
            retries,
            delay,
        }
    }

    pub fn from_config(inner: C, config: &Config) -> Self {
        Self::new(inner, config.retries(), config.delay_duration())
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub async fn check(&self, url: &str) -> CheckResult {
        let attempts = self.retries.saturating_add(1);
        let mut last: Option<CheckResult> = None;

        for attempt in 1..=attempts {
            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }

            let result = self.inner.classify(url).await;
            if result.is_terminal() {
                return result;
            }

            debug!(
                "Attempt {attempt}/{attempts} for {url} got no status: {}",
                result.reason
            );
            last = Some(result);
        }

        match last {
            Some(last) if self.retries == 0 => last,
            Some(last) => {
                warn!(
                    "Giving up on {url} after {attempts} attempts, last error: {}",
                    last.reason
                );
                CheckResult::max_retries_exceeded(&last.url)
            }
            None => CheckResult::max_retries_exceeded(url),
        }
    }
}

#[async_trait]
impl<C: Classify> Classify for RetryController<C> {
    async fn classify(&self, url: &str) -> CheckResult {
        self.check(url).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::Verdict;
    use crate::validation::classifier::LivenessClassifier;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    /// Replays scripted results and counts calls.
    struct ScriptedClassifier {
        script: Mutex<VecDeque<CheckResult>>,
        fallback: CheckResult,
        calls: AtomicUsize,
    }

    impl ScriptedClassifier {
        fn new(script: Vec<CheckResult>, fallback: CheckResult) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Classify for ScriptedClassifier {
        async fn classify(&self, _url: &str) -> CheckResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }

    fn refused(url: &str) -> CheckResult {
        CheckResult::uncertain(url, None, "Request Error: connection refused")
    }

    #[tokio::test]
    async fn test_check__status_is_terminal_on_first_attempt() {
        let url = "https://a.com";
        let inner = ScriptedClassifier::new(vec![], CheckResult::live(url, 200));
        let controller = RetryController::new(inner, 3, Duration::ZERO);

        let result = controller.check(url).await;

        assert_eq!(result.status, Some(200));
        assert_eq!(controller.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_check__expired_status_is_not_retried() {
        let url = "https://a.com";
        let inner = ScriptedClassifier::new(
            vec![],
            CheckResult::expired(url, 404, "404 Not Found (HEAD)"),
        );
        let controller = RetryController::new(inner, 5, Duration::ZERO);

        let result = controller.check(url).await;

        assert!(result.expired);
        assert_eq!(controller.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_check__retries_until_status_obtained() {
        let url = "https://a.com";
        let inner = ScriptedClassifier::new(
            vec![refused(url), refused(url)],
            CheckResult::live(url, 200),
        );
        let controller = RetryController::new(inner, 2, Duration::ZERO);

        let result = controller.check(url).await;

        assert_eq!(result.status, Some(200));
        assert_eq!(result.reason, "OK");
        assert_eq!(controller.inner().calls(), 3);
    }

    #[tokio::test]
    async fn test_check__exhausted_budget_reports_max_retries() {
        let url = "https://a.com";
        let inner = ScriptedClassifier::new(vec![], refused(url));
        let controller = RetryController::new(inner, 2, Duration::ZERO);

        let result = controller.check(url).await;

        assert_eq!(controller.inner().calls(), 3);
        assert_eq!(result.status, None);
        assert!(!result.expired);
        assert_eq!(result.reason, "Max retries exceeded");
        assert_eq!(result.verdict, Verdict::Uncertain);
    }

    #[tokio::test]
    async fn test_check__no_retries_returns_single_attempt_unchanged() {
        let url = "https://a.com";
        let inner = ScriptedClassifier::new(vec![], refused(url));
        let controller = RetryController::new(inner, 0, Duration::ZERO);

        let result = controller.check(url).await;

        assert_eq!(controller.inner().calls(), 1);
        assert_eq!(result.reason, "Request Error: connection refused");
    }

    #[tokio::test]
    async fn test_check__empty_url_is_not_retried() {
        let inner = ScriptedClassifier::new(vec![], CheckResult::empty_url(""));
        let controller = RetryController::new(inner, 4, Duration::ZERO);

        let result = controller.check("").await;

        assert_eq!(controller.inner().calls(), 1);
        assert_eq!(result.reason, "Empty URL");
    }

    #[tokio::test]
    async fn test_check__waits_delay_before_each_attempt() {
        let url = "https://a.com";
        let inner = ScriptedClassifier::new(vec![], refused(url));
        let controller = RetryController::new(inner, 1, Duration::from_millis(50));

        let start = Instant::now();
        controller.check(url).await;

        assert_eq!(controller.inner().calls(), 2);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_check__unreachable_host_with_real_classifier() {
        let config = Config {
            retries: Some(2),
            head_timeout: Some(1),
            get_timeout: Some(1),
            ..Default::default()
        };
        let classifier = LivenessClassifier::from_config(&config).unwrap();
        let controller = RetryController::from_config(classifier, &config);

        let result = controller.check("http://127.0.0.1:1/job").await;

        assert_eq!(controller.retries(), 2);
        assert_eq!(result.status, None);
        assert!(!result.expired);
        assert_eq!(result.reason, "Max retries exceeded");
    }
}
