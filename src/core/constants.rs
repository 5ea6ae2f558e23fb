/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal strings and numbers shared by the
/// classifier, the sinks and the CLI.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful summary with expired/uncertain listings
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - one plain line per record
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// HTTP status code constants
pub mod http_status {
    /// HTTP 404 Not Found
    pub const NOT_FOUND: u16 = 404;
    /// HTTP 429 Too Many Requests
    pub const TOO_MANY_REQUESTS: u16 = 429;
    /// Lower bound (inclusive) of the status range treated as an error
    pub const ERROR_RANGE_START: u16 = 400;
    /// Upper bound (exclusive) of the status range treated as an error
    pub const ERROR_RANGE_END: u16 = 600;

    /// Whether a status falls in [400, 600)
    pub fn is_error(status: u16) -> bool {
        (ERROR_RANGE_START..ERROR_RANGE_END).contains(&status)
    }

    /// Gateway and server hiccups worth re-sending before classifying
    pub const TRANSIENT: [u16; 4] = [500, 502, 503, 504];

    pub fn is_transient(status: u16) -> bool {
        TRANSIENT.contains(&status)
    }
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default HEAD probe timeout in seconds
    pub const DEFAULT_HEAD_TIMEOUT_SECONDS: u64 = 5;
    /// Default GET timeout in seconds
    pub const DEFAULT_GET_TIMEOUT_SECONDS: u64 = 10;
    /// Maximum accepted timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Wait applied after a 429 without a usable Retry-After header
    pub const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;
    /// Minimum spacing between two progress snapshots
    pub const DEFAULT_PROGRESS_INTERVAL_SECONDS: u64 = 5;
    /// Base of the exponential backoff between transient re-sends
    pub const TRANSIENT_BACKOFF_FACTOR_MILLIS: u64 = 500;
    /// Cap on a single transient backoff sleep
    pub const MAX_TRANSIENT_BACKOFF_SECONDS: u64 = 120;
}

/// Default configuration values
pub mod defaults {
    /// Default number of extra attempts when no status was obtained
    pub const RETRIES: u32 = 0;
    /// Default worker pool width
    pub const MAX_WORKERS: usize = 10;
    /// Default pacing delay before each attempt, in seconds
    pub const DELAY_SECONDS: f64 = 0.0;
    /// Default number of Retry-After waits honoured within one attempt
    pub const MAX_RATE_LIMIT_WAITS: u32 = 3;
    /// Default input file
    pub const INPUT_FILE: &str = "urls.txt";
    /// Default CSV output file
    pub const OUTPUT_FILE: &str = "output.csv";
    /// Name of the discovered configuration file
    pub const CONFIG_FILE_NAME: &str = ".jobcheck.toml";
}

/// Validation limits for configuration values
pub mod limits {
    /// Highest accepted worker count
    pub const MAX_WORKERS: usize = 1000;
    /// Highest accepted retry count
    pub const MAX_RETRIES: u32 = 20;
}

/// Reason strings carried in check results
pub mod reasons {
    pub const EMPTY_URL: &str = "Empty URL";
    pub const OK: &str = "OK";
    pub const READ_TIMEOUT: &str = "Read Timeout";
    pub const NOT_FOUND_HEAD: &str = "404 Not Found (HEAD)";
    pub const NOT_FOUND_GET: &str = "404 Not Found (GET)";
    pub const MAX_RETRIES_EXCEEDED: &str = "Max retries exceeded";
    pub const RATE_LIMITED: &str = "Rate limited (HTTP 429)";
    pub const NOT_PROCESSED: &str = "Not processed";
    pub const WORKDAY_MISSING_DESCRIPTION: &str = "Workday page missing og:description";
    pub const GREENHOUSE_EXPIRED: &str = "Greenhouse page indicates expired job";
    pub const JOBVITE_EXPIRED: &str = "Jobvite page indicates expired job";
}

/// Content and provider heuristics
pub mod heuristics {
    /// Phrases whose presence in a lower-cased body marks a posting expired.
    /// Checked in order; the first hit wins.
    pub const EXPIRED_KEYWORDS: [&str; 6] = [
        "job not found",
        "position has been filled",
        "no longer accepting applications",
        "job expired",
        "sorry, this job has expired",
        "the page you are looking for doesn't exist.",
    ];

    pub const WORKDAY: &str = "workday";
    pub const GREENHOUSE: &str = "greenhouse";
    pub const JOBVITE: &str = "jobvite";

    /// Marker in the final Greenhouse URL for a closed posting
    pub const GREENHOUSE_ERROR_MARKER: &str = "?error=true";
    /// Marker in the final Jobvite URL for a closed posting
    pub const JOBVITE_ERROR_MARKER: &str = "?error=404";

    pub const OG_DESCRIPTION_SELECTOR: &str = r#"meta[property="og:description"]"#;
}

/// CSV sink constants
pub mod sheet {
    /// Header row of the results CSV
    pub const CSV_HEADER: [&str; 5] = ["URL", "Status", "Expired", "Reason", "Sheet Text"];
    /// Sheet text written for expired postings
    pub const NO_LONGER_INTERESTED: &str = "No Longer Interested";
    /// Cell written to the companion file for postings that are not expired
    pub const BLANK_CELL: &str = " ";
    /// Extension of the companion sheet-text file
    pub const SHEET_TEXT_EXTENSION: &str = "sheet_text.csv";
}
