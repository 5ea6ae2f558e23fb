use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, Response};
use scraper::{Html, Selector};
use tokio::time::{Duration, sleep};

use crate::config::Config;
use crate::core::constants::{heuristics, http_status, reasons, timeouts};
use crate::core::error::Result;
use crate::core::types::CheckResult;

/// A single classification attempt for one URL.
///
/// Implementations never fail: every transport or parsing problem is
/// folded into the returned `CheckResult`.
#[async_trait]
pub trait Classify: Send + Sync {
    async fn classify(&self, url: &str) -> CheckResult;
}

/// Knobs for one classification attempt.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    pub verify_content: bool,
    pub head_timeout: Duration,
    pub get_timeout: Duration,
    /// Wait applied after a 429 without a numeric Retry-After
    pub default_retry_after: Duration,
    /// Retry-After waits honoured before giving up on a 429
    pub max_rate_limit_waits: u32,
    /// Re-sends of a request answered with 500/502/503/504; zero disables
    pub transient_retries: u32,
    /// Backoff base; the n-th re-send waits `factor * 2^(n-1)`, the first none
    pub backoff_factor: Duration,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ClassifierOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            verify_content: config.verify_content(),
            head_timeout: config.head_timeout_duration(),
            get_timeout: config.get_timeout_duration(),
            default_retry_after: config.default_retry_after_duration(),
            max_rate_limit_waits: config.max_rate_limit_waits(),
            transient_retries: config.retries(),
            backoff_factor: Duration::from_millis(timeouts::TRANSIENT_BACKOFF_FACTOR_MILLIS),
        }
    }
}

/// Outcome of the HEAD probe.
enum HeadOutcome {
    /// The probe alone proves the posting is gone
    Expired(CheckResult),
    /// Fall through to GET, remembering any non-error status
    Continue(Option<u16>),
}

/// HEAD probe, GET fallback, 429 backoff and content heuristics.
#[derive(Debug, Clone)]
pub struct LivenessClassifier {
    client: Client,
    options: ClassifierOptions,
}

impl LivenessClassifier {
    pub fn new(client: Client, options: ClassifierOptions) -> Self {
        Self { client, options }
    }

    /// Build a classifier with a fresh HTTP client configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, ClassifierOptions::from_config(config)))
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Send one request, re-sending while the server answers with a
    /// transient 5xx and the re-send budget lasts.
    ///
    /// The last response is returned as-is once the budget is spent.
    async fn send_with_backoff(
        &self,
        method: Method,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<Response, reqwest::Error> {
        let mut resent = 0;
        loop {
            let response = self
                .client
                .request(method.clone(), url)
                .timeout(timeout)
                .send()
                .await?;

            let status = response.status().as_u16();
            if !http_status::is_transient(status) || resent >= self.options.transient_retries {
                return Ok(response);
            }

            resent += 1;
            let wait = transient_backoff(self.options.backoff_factor, resent);
            debug!("{method} {url} answered {status}, re-sending in {}ms", wait.as_millis());
            sleep(wait).await;
        }
    }

    async fn probe_head(&self, url: &str) -> HeadOutcome {
        match self
            .send_with_backoff(Method::HEAD, url, self.options.head_timeout)
            .await
        {
            Ok(response) => {
                let status = response.status().as_u16();
                if status == http_status::NOT_FOUND {
                    HeadOutcome::Expired(CheckResult::expired(
                        url,
                        status,
                        reasons::NOT_FOUND_HEAD,
                    ))
                } else if http_status::is_error(status) {
                    HeadOutcome::Expired(CheckResult::expired(
                        url,
                        status,
                        format!("HTTP {status} (HEAD)"),
                    ))
                } else {
                    HeadOutcome::Continue(Some(status))
                }
            }
            Err(err) => {
                debug!("HEAD request failed for {url}: {}", describe_error(&err));
                HeadOutcome::Continue(None)
            }
        }
    }

    async fn send_get(&self, url: &str) -> std::result::Result<Response, reqwest::Error> {
        self.send_with_backoff(Method::GET, url, self.options.get_timeout)
            .await
    }

    /// Issue the GET, honouring Retry-After on 429 by waiting and re-fetching.
    ///
    /// Returns `Err` with a finished result when the GET cannot produce a
    /// usable response.
    async fn fetch_past_rate_limit(
        &self,
        url: &str,
        head_status: Option<u16>,
    ) -> std::result::Result<Response, CheckResult> {
        let mut waits = 0;
        loop {
            let response = self
                .send_get(url)
                .await
                .map_err(|err| transport_failure(url, head_status, &err))?;

            if response.status().as_u16() != http_status::TOO_MANY_REQUESTS {
                return Ok(response);
            }
            if waits >= self.options.max_rate_limit_waits {
                warn!("429 for {url} persisted after {waits} wait(s), giving up");
                return Err(CheckResult::uncertain(
                    url,
                    Some(http_status::TOO_MANY_REQUESTS),
                    reasons::RATE_LIMITED,
                ));
            }

            let wait = retry_after(response.headers(), self.options.default_retry_after);
            warn!("429 for {url}, sleeping {}s", wait.as_secs());
            sleep(wait).await;
            waits += 1;
        }
    }

    async fn check_get(&self, url: &str, head_status: Option<u16>) -> CheckResult {
        let response = match self.fetch_past_rate_limit(url, head_status).await {
            Ok(response) => response,
            Err(result) => return result,
        };

        let status = response.status().as_u16();
        if status == http_status::NOT_FOUND {
            return CheckResult::expired(url, status, reasons::NOT_FOUND_GET);
        }
        if http_status::is_error(status) {
            return CheckResult::expired(url, status, format!("HTTP {status} (GET)"));
        }
        if !self.options.verify_content {
            return CheckResult::live(url, status);
        }

        let final_url = response.url().to_string();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return transport_failure(url, Some(status), &err),
        };

        match inspect_content(url, &final_url, &body) {
            Some(reason) => CheckResult::expired(url, status, reason),
            None => CheckResult::live(url, status),
        }
    }
}

#[async_trait]
impl Classify for LivenessClassifier {
    async fn classify(&self, url: &str) -> CheckResult {
        let url = url.trim();
        if url.is_empty() {
            return CheckResult::empty_url(url);
        }

        match self.probe_head(url).await {
            HeadOutcome::Expired(result) => result,
            HeadOutcome::Continue(head_status) => self.check_get(url, head_status).await,
        }
    }
}

/// Build the HTTP client shared by every worker.
pub fn build_http_client(config: &Config) -> Result<Client> {
    let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    let max_workers = config.max_workers();

    let client = Client::builder()
        .redirect(Policy::limited(10))
        .user_agent(user_agent)
        .pool_max_idle_per_host(max_workers.min(20))
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60))
        .build()?;

    Ok(client)
}

/// Turn a GET transport failure into an uncertain result.
///
/// `status` is the HEAD status, if the probe got one.
fn transport_failure(url: &str, status: Option<u16>, err: &reqwest::Error) -> CheckResult {
    if err.is_timeout() && !err.is_connect() {
        CheckResult::uncertain(url, status, reasons::READ_TIMEOUT)
    } else {
        CheckResult::uncertain(
            url,
            status,
            format!("Request Error: {}", describe_error(err)),
        )
    }
}

fn describe_error(err: &reqwest::Error) -> String {
    match std::error::Error::source(err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}

/// Sleep before the `resent`-th transient re-send.
///
/// The first re-send goes out immediately. Later ones wait `factor` doubled
/// per step, up to two minutes.
pub fn transient_backoff(factor: Duration, resent: u32) -> Duration {
    let cap = Duration::from_secs(timeouts::MAX_TRANSIENT_BACKOFF_SECONDS);
    if resent <= 1 {
        return Duration::ZERO;
    }
    let exponent = (resent - 1).min(31);
    factor.saturating_mul(1u32 << exponent).min(cap)
}

/// Seconds from a numeric Retry-After header, or `default`.
pub fn retry_after(headers: &HeaderMap, default: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// Run the body keyword scan and the provider checks.
///
/// Returns the expiry reason on the first hit.
pub fn inspect_content(url: &str, final_url: &str, body: &str) -> Option<String> {
    let body_lower = body.to_lowercase();
    if let Some(keyword) = heuristics::EXPIRED_KEYWORDS
        .iter()
        .find(|keyword| body_lower.contains(*keyword))
    {
        return Some(format!("Content indicates expired: '{keyword}'"));
    }

    let url_lower = url.to_lowercase();
    if url_lower.contains(heuristics::WORKDAY) && !has_og_description(body) {
        return Some(reasons::WORKDAY_MISSING_DESCRIPTION.to_string());
    }
    if url_lower.contains(heuristics::GREENHOUSE)
        && final_url.contains(heuristics::GREENHOUSE_ERROR_MARKER)
    {
        return Some(reasons::GREENHOUSE_EXPIRED.to_string());
    }
    if url_lower.contains(heuristics::JOBVITE) && final_url.contains(heuristics::JOBVITE_ERROR_MARKER)
    {
        return Some(reasons::JOBVITE_EXPIRED.to_string());
    }

    None
}

/// Whether the page carries a non-blank `og:description` meta tag.
pub fn has_og_description(html: &str) -> bool {
    let Ok(selector) = Selector::parse(heuristics::OG_DESCRIPTION_SELECTOR) else {
        return false;
    };
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .is_some_and(|content| !content.trim().is_empty())
}
