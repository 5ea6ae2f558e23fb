use crate::config::Config;
use crate::core::types::{CheckResult, Verdict};
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // RUST_LOG still wins for module-level filters
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log the effective configuration for a run
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: max_workers={}, retries={}, delay={:.2}s, verify_content={}",
        config.max_workers(),
        config.retries(),
        config.delay_duration().as_secs_f64(),
        config.verify_content()
    );
    info!(
        "Timeouts: head={}s, get={}s, default_retry_after={}s, max_rate_limit_waits={}",
        config.head_timeout_duration().as_secs(),
        config.get_timeout_duration().as_secs(),
        config.default_retry_after_duration().as_secs(),
        config.max_rate_limit_waits()
    );
    if let Some(user_agent) = &config.user_agent {
        debug!("User-Agent: {user_agent}");
    }
}

/// Log what was read from the input file
pub fn log_input_info<P: AsRef<Path>>(path: P, url_count: usize) {
    if url_count == 0 {
        log_warning(&format!(
            "{} contains no URLs; writing empty results",
            path.as_ref().display()
        ));
        return;
    }
    info!(
        "Read {url_count} URL(s) from {}",
        path.as_ref().display()
    );
}

pub fn log_check_start(url_count: usize, max_workers: usize) {
    info!("Checking {url_count} URL(s) with {max_workers} worker(s)");
}

/// Log the verdict counts once a batch is done
pub fn log_check_complete(results: &[CheckResult], duration_ms: u128) {
    let count = |verdict: Verdict| results.iter().filter(|r| r.verdict == verdict).count();
    let expired = count(Verdict::Expired);
    let uncertain = count(Verdict::Uncertain);

    info!(
        "Check complete: {} URL(s), {} live, {} expired, {} uncertain, {} skipped ({}ms)",
        results.len(),
        count(Verdict::Live),
        expired,
        uncertain,
        count(Verdict::Skipped),
        duration_ms
    );
    if uncertain > 0 {
        warn!("{uncertain} URL(s) could not be classified with certainty");
    }
}

/// Log one finished URL
pub fn log_check_result(result: &CheckResult) {
    let status = result
        .status
        .map_or_else(|| "-".to_string(), |s| s.to_string());
    match result.verdict {
        Verdict::Live => debug!("✓ {} -> {status}", result.url),
        Verdict::Expired => info!("✗ {} -> {status} ({})", result.url, result.reason),
        Verdict::Uncertain => debug!("? {} -> {status} ({})", result.url, result.reason),
        Verdict::Skipped => debug!("- skipped empty input line"),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn sample_results() -> Vec<CheckResult> {
        vec![
            CheckResult::live("https://a.com", 200),
            CheckResult::expired("https://b.com", 404, "404 Not Found (HEAD)"),
            CheckResult::uncertain("https://c.com", None, "Read Timeout"),
            CheckResult::empty_url(""),
        ]
    }

    #[test]
    fn test_logger_initialization_is_repeatable() {
        // Only the first call installs a logger; later ones must not panic
        init_logger(true, false);
        init_logger(false, true);
        init_logger(false, false);
        init_logger(true, true);
    }

    #[test]
    fn test_log_config_info_defaults_and_overrides() {
        log_config_info(&Config::default());

        let config = Config {
            max_workers: Some(50),
            retries: Some(3),
            delay: Some(0.25),
            user_agent: Some("jobcheck-test".to_string()),
            ..Default::default()
        };
        log_config_info(&config);
    }

    #[test]
    fn test_log_input_info() {
        log_input_info("urls.txt", 0);
        log_input_info(std::path::PathBuf::from("nested/urls.txt"), 42);
    }

    #[test]
    fn test_log_check_lifecycle() {
        log_check_start(0, 1);
        log_check_start(1000, 10);
        log_check_complete(&[], 0);
        log_check_complete(&sample_results(), 1500);
    }

    #[test]
    fn test_log_check_result_every_verdict() {
        for result in sample_results() {
            log_check_result(&result);
        }
        log_check_result(&CheckResult::exception("https://d.com", "boom"));
    }

    #[test]
    fn test_log_error_with_and_without_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        log_error("Failed to read input", Some(&io_error));
        log_error("Something went wrong", None);
        log_warning("Configuration fallback used");
        log_warning("");
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let barrier = Arc::new(Barrier::new(4));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for j in 0..10 {
                        let url = format!("https://thread{i}.test/{j}");
                        log_check_result(&CheckResult::live(&url, 200));
                        log_warning(&format!("Warning from thread {i}"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
