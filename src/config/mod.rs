//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, limits, output_formats, timeouts};
use crate::core::error::{JobCheckError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable body keyword and provider markup heuristics
    pub verify_content: Option<bool>,

    /// Extra attempts when no HTTP status was obtained at all
    pub retries: Option<u32>,

    /// Number of URLs classified concurrently
    pub max_workers: Option<usize>,

    /// Pacing delay before each classification attempt, in seconds
    pub delay: Option<f64>,

    /// HEAD probe timeout in seconds
    pub head_timeout: Option<u64>,

    /// GET timeout in seconds
    pub get_timeout: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Minimum seconds between two progress snapshots
    pub progress_interval: Option<u64>,

    /// Seconds to wait after a 429 without a numeric Retry-After
    pub default_retry_after: Option<u64>,

    /// Retry-After waits honoured within a single attempt
    pub max_rate_limit_waits: Option<u32>,

    /// Also write the companion `.sheet_text.csv` file
    pub sheet_text_file: Option<bool>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verify_content: Some(false),
            retries: Some(defaults::RETRIES),
            max_workers: Some(defaults::MAX_WORKERS),
            delay: Some(defaults::DELAY_SECONDS),
            head_timeout: Some(timeouts::DEFAULT_HEAD_TIMEOUT_SECONDS),
            get_timeout: Some(timeouts::DEFAULT_GET_TIMEOUT_SECONDS),
            user_agent: None,
            progress_interval: Some(timeouts::DEFAULT_PROGRESS_INTERVAL_SECONDS),
            default_retry_after: Some(timeouts::DEFAULT_RETRY_AFTER_SECONDS),
            max_rate_limit_waits: Some(defaults::MAX_RATE_LIMIT_WAITS),
            sheet_text_file: Some(true),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            JobCheckError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            JobCheckError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Classification
        if cli_config.verify_content {
            self.verify_content = Some(true);
        }
        if let Some(retries) = cli_config.retries {
            self.retries = Some(retries);
        }
        if let Some(max_workers) = cli_config.max_workers {
            self.max_workers = Some(max_workers);
        }
        if let Some(delay) = cli_config.delay {
            self.delay = Some(delay);
        }

        // Network
        if let Some(head_timeout) = cli_config.head_timeout {
            self.head_timeout = Some(head_timeout);
        }
        if let Some(get_timeout) = cli_config.get_timeout {
            self.get_timeout = Some(get_timeout);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.no_sheet_text {
            self.sheet_text_file = Some(false);
        }
    }

    pub fn verify_content(&self) -> bool {
        self.verify_content.unwrap_or(false)
    }

    pub fn retries(&self) -> u32 {
        self.retries.unwrap_or(defaults::RETRIES)
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers.unwrap_or(defaults::MAX_WORKERS).max(1)
    }

    pub fn max_rate_limit_waits(&self) -> u32 {
        self.max_rate_limit_waits
            .unwrap_or(defaults::MAX_RATE_LIMIT_WAITS)
    }

    pub fn sheet_text_file(&self) -> bool {
        self.sheet_text_file.unwrap_or(true)
    }

    /// Get the HEAD timeout as Duration
    pub fn head_timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.head_timeout
                .unwrap_or(timeouts::DEFAULT_HEAD_TIMEOUT_SECONDS),
        )
    }

    /// Get the GET timeout as Duration
    pub fn get_timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.get_timeout
                .unwrap_or(timeouts::DEFAULT_GET_TIMEOUT_SECONDS),
        )
    }

    /// Get the pacing delay as Duration
    pub fn delay_duration(&self) -> Duration {
        let seconds = self.delay.unwrap_or(defaults::DELAY_SECONDS);
        if seconds > 0.0 {
            Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        }
    }

    /// Get the progress snapshot interval as Duration
    pub fn progress_interval_duration(&self) -> Duration {
        Duration::from_secs(
            self.progress_interval
                .unwrap_or(timeouts::DEFAULT_PROGRESS_INTERVAL_SECONDS),
        )
    }

    /// Get the fallback 429 wait as Duration
    pub fn default_retry_after_duration(&self) -> Duration {
        Duration::from_secs(
            self.default_retry_after
                .unwrap_or(timeouts::DEFAULT_RETRY_AFTER_SECONDS),
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(max_workers) = self.max_workers {
            if max_workers == 0 {
                return Err(JobCheckError::Config(
                    "max_workers cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if max_workers > limits::MAX_WORKERS {
                return Err(JobCheckError::Config(format!(
                    "max_workers of {max_workers} is extremely high and may exhaust sockets. Consider using a smaller value."
                )));
            }
        }

        if let Some(retries) = self.retries
            && retries > limits::MAX_RETRIES
        {
            return Err(JobCheckError::Config(format!(
                "retries of {retries} is very high and may cause long delays. Consider using a smaller value."
            )));
        }

        if let Some(delay) = self.delay
            && (!delay.is_finite() || delay < 0.0)
        {
            return Err(JobCheckError::Config(format!(
                "delay of {delay} is invalid. Expected a non-negative number of seconds."
            )));
        }

        if let Some(delay) = self.delay
            && delay > timeouts::MAX_TIMEOUT_SECONDS as f64
        {
            return Err(JobCheckError::Config(format!(
                "delay of {delay} seconds is extremely large (>1 hour). Consider using a smaller value."
            )));
        }

        for (name, value) in [
            ("head_timeout", self.head_timeout),
            ("get_timeout", self.get_timeout),
        ] {
            if let Some(timeout) = value {
                if timeout == 0 {
                    return Err(JobCheckError::Config(format!(
                        "{name} cannot be 0. Expected a positive integer representing seconds."
                    )));
                }
                if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                    return Err(JobCheckError::Config(format!(
                        "{name} of {timeout} seconds is extremely large (>1 hour). Consider using a smaller value."
                    )));
                }
            }
        }

        if self.progress_interval == Some(0) {
            return Err(JobCheckError::Config(
                "progress_interval cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            ));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(JobCheckError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Classification
    pub verify_content: bool,       // --verify-content
    pub retries: Option<u32>,       // --retries
    pub max_workers: Option<usize>, // --max-workers
    pub delay: Option<f64>,         // --delay

    // Network
    pub head_timeout: Option<u64>,  // --head-timeout
    pub get_timeout: Option<u64>,   // --get-timeout
    pub user_agent: Option<String>, // --user-agent

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress
    pub no_sheet_text: bool,           // --no-sheet-text

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
