use std::fmt;

/// Error types for jobcheck operations.
///
/// Only work that happens before dispatch (reading input, loading
/// configuration, building the HTTP client) or after it (writing results)
/// returns these. Classification of a single URL never fails; every failure
/// there is folded into a `CheckResult`.
#[derive(Debug)]
pub enum JobCheckError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// CSV writing error
    Csv(csv::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for JobCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobCheckError::Io(err) => write!(f, "IO error: {err}"),
            JobCheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            JobCheckError::Http(err) => write!(f, "HTTP error: {err}"),
            JobCheckError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            JobCheckError::Csv(err) => write!(f, "CSV error: {err}"),
            JobCheckError::FileNotFound(path) => write!(f, "File not found: {path}"),
            JobCheckError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for JobCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JobCheckError::Io(err) => Some(err),
            JobCheckError::Http(err) => Some(err),
            JobCheckError::TomlParsing(err) => Some(err),
            JobCheckError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for JobCheckError {
    fn from(err: std::io::Error) -> Self {
        JobCheckError::Io(err)
    }
}

impl From<reqwest::Error> for JobCheckError {
    fn from(err: reqwest::Error) -> Self {
        JobCheckError::Http(err)
    }
}

impl From<toml::de::Error> for JobCheckError {
    fn from(err: toml::de::Error) -> Self {
        JobCheckError::TomlParsing(err)
    }
}

impl From<csv::Error> for JobCheckError {
    fn from(err: csv::Error) -> Self {
        JobCheckError::Csv(err)
    }
}

/// Type alias for Results using JobCheckError
pub type Result<T> = std::result::Result<T, JobCheckError>;
