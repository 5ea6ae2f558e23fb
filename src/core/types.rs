use serde::Serialize;
use std::fmt;

use crate::core::constants::reasons;

/// One unit of work handed to the dispatcher.
///
/// `index` is the URL's position in the input sequence and is used only to
/// put results back in input order after concurrent completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub url: String,
    pub index: usize,
}

impl CheckRequest {
    pub fn new<S: Into<String>>(url: S, index: usize) -> Self {
        Self {
            url: url.into(),
            index,
        }
    }

    /// Build one request per URL, numbered in input order.
    pub fn batch<I, S>(urls: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        urls.into_iter()
            .enumerate()
            .map(|(index, url)| Self::new(url, index))
            .collect()
    }
}

/// Closed classification carried next to the free-text reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// 4xx/5xx (except 429) or a content/provider heuristic hit
    Expired,
    /// 2xx/3xx with no heuristic hit
    Live,
    /// Transport failure, read timeout, persistent 429 or exhausted retries
    Uncertain,
    /// Blank input line; nothing was requested
    Skipped,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Expired => "EXPIRED",
            Verdict::Live => "LIVE",
            Verdict::Uncertain => "UNCERTAIN",
            Verdict::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final classification of one URL.
///
/// `status` is `None` only when no HTTP reply was ever obtained, and
/// `reason` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub url: String,
    pub status: Option<u16>,
    pub expired: bool,
    pub reason: String,
    pub verdict: Verdict,
}

impl CheckResult {
    /// The posting answered and nothing marks it expired.
    pub fn live(url: &str, status: u16) -> Self {
        Self::build(url, Some(status), Verdict::Live, reasons::OK.to_string())
    }

    /// A status code or heuristic marks the posting expired.
    pub fn expired<S: Into<String>>(url: &str, status: u16, reason: S) -> Self {
        Self::build(url, Some(status), Verdict::Expired, reason.into())
    }

    /// The outcome is unknown; `status` may still carry an earlier reply.
    pub fn uncertain<S: Into<String>>(url: &str, status: Option<u16>, reason: S) -> Self {
        Self::build(url, status, Verdict::Uncertain, reason.into())
    }

    /// Blank input line.
    pub fn empty_url(url: &str) -> Self {
        Self::build(url, None, Verdict::Skipped, reasons::EMPTY_URL.to_string())
    }

    pub fn max_retries_exceeded(url: &str) -> Self {
        Self::uncertain(url, None, reasons::MAX_RETRIES_EXCEEDED)
    }

    /// Placeholder for a slot the dispatcher never filled.
    pub fn not_processed(url: &str) -> Self {
        Self::uncertain(url, None, reasons::NOT_PROCESSED)
    }

    /// Result for a unit of work that panicked.
    pub fn exception(url: &str, message: &str) -> Self {
        Self::uncertain(url, None, format!("Exception: {message}"))
    }

    fn build(url: &str, status: Option<u16>, verdict: Verdict, reason: String) -> Self {
        let reason = if reason.trim().is_empty() {
            verdict.label().to_string()
        } else {
            reason
        };

        Self {
            url: url.to_string(),
            status,
            expired: verdict == Verdict::Expired,
            reason,
            verdict,
        }
    }

    /// Whether an HTTP reply was obtained at all.
    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// Whether the retry controller should stop at this result.
    pub fn is_terminal(&self) -> bool {
        self.has_status() || self.verdict == Verdict::Skipped
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "{} - {} - {} - {}",
                status, self.verdict, &self.url, &self.reason
            ),
            None => write!(f, "{} - {} - {}", self.verdict, &self.url, &self.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_request_batch_numbers_in_order() {
        let requests = CheckRequest::batch(vec!["https://a.com", "https://b.com", ""]);

        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], CheckRequest::new("https://a.com", 0));
        assert_eq!(requests[1], CheckRequest::new("https://b.com", 1));
        assert_eq!(requests[2], CheckRequest::new("", 2));
    }

    #[test]
    fn test_live_result() {
        let result = CheckResult::live("https://a.com", 200);

        assert_eq!(result.status, Some(200));
        assert!(!result.expired);
        assert_eq!(result.reason, "OK");
        assert_eq!(result.verdict, Verdict::Live);
        assert!(result.is_terminal());
    }

    #[test]
    fn test_expired_result_sets_flag() {
        let result = CheckResult::expired("https://a.com", 404, "404 Not Found (GET)");

        assert!(result.expired);
        assert_eq!(result.verdict, Verdict::Expired);
        assert_eq!(result.reason, "404 Not Found (GET)");
    }

    #[test]
    fn test_uncertain_without_status_is_not_terminal() {
        let result = CheckResult::uncertain("https://a.com", None, "Request Error: refused");

        assert!(!result.expired);
        assert!(!result.has_status());
        assert!(!result.is_terminal());
    }

    #[test]
    fn test_uncertain_with_head_status_is_terminal() {
        let result = CheckResult::uncertain("https://a.com", Some(200), "Read Timeout");

        assert!(result.is_terminal());
        assert!(!result.expired);
    }

    #[test]
    fn test_empty_url_is_terminal_without_status() {
        let result = CheckResult::empty_url("");

        assert_eq!(result.status, None);
        assert!(!result.expired);
        assert_eq!(result.reason, "Empty URL");
        assert_eq!(result.verdict, Verdict::Skipped);
        assert!(result.is_terminal());
    }

    #[test]
    fn test_reason_never_empty() {
        let result = CheckResult::uncertain("https://a.com", None, "   ");
        assert_eq!(result.reason, "UNCERTAIN");

        let result = CheckResult::expired("https://a.com", 500, "");
        assert_eq!(result.reason, "EXPIRED");
    }

    #[test]
    fn test_exception_reason() {
        let result = CheckResult::exception("https://a.com", "boom");
        assert_eq!(result.reason, "Exception: boom");
        assert_eq!(result.verdict, Verdict::Uncertain);
    }

    #[test]
    fn test_display() {
        let with_status = CheckResult::expired("https://a.com", 410, "HTTP 410 (HEAD)");
        assert_eq!(
            with_status.to_string(),
            "410 - EXPIRED - https://a.com - HTTP 410 (HEAD)"
        );

        let without_status = CheckResult::uncertain("https://b.com", None, "Read Timeout");
        assert_eq!(
            without_status.to_string(),
            "UNCERTAIN - https://b.com - Read Timeout"
        );
    }

    #[test]
    fn test_verdict_serializes_snake_case() {
        let json = serde_json::to_string(&Verdict::Uncertain).unwrap();
        assert_eq!(json, "\"uncertain\"");
    }
}
