use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::core::error::{JobCheckError, Result};

/// Every non-empty trimmed line, in input order.
///
/// Duplicates are kept: each line gets its own result row so the output
/// lines up with the source list.
pub fn parse_urls(text: &str) -> Vec<String> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn read_urls<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => JobCheckError::FileNotFound(path.display().to_string()),
        _ => JobCheckError::Io(e),
    })?;

    Ok(parse_urls(&text))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_parse_urls__skips_blank_lines_and_trims() {
        let text = "https://a.com/1\n\n   \n  https://b.com/2  \r\nhttps://c.com/3";

        assert_eq!(
            parse_urls(text),
            vec!["https://a.com/1", "https://b.com/2", "https://c.com/3"]
        );
    }

    #[test]
    fn test_parse_urls__keeps_duplicates_in_order() {
        let text = "https://b.com\nhttps://a.com\nhttps://b.com\n";

        assert_eq!(
            parse_urls(text),
            vec!["https://b.com", "https://a.com", "https://b.com"]
        );
    }

    #[test]
    fn test_parse_urls__empty_input() {
        assert!(parse_urls("").is_empty());
        assert!(parse_urls("\n\n \t\n").is_empty());
    }

    #[test]
    fn test_parse_urls__strips_byte_order_mark() {
        assert_eq!(parse_urls("\u{feff}https://a.com\n"), vec!["https://a.com"]);
    }

    #[test]
    fn test_read_urls__from_file() -> TestResult {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "https://jobs.example.com/1")?;
        writeln!(file)?;
        writeln!(file, "https://jobs.example.com/2")?;

        let urls = read_urls(file.path())?;

        assert_eq!(
            urls,
            vec!["https://jobs.example.com/1", "https://jobs.example.com/2"]
        );
        Ok(())
    }

    #[test]
    fn test_read_urls__when_non_existing_file() {
        let err = read_urls("definitely/not/here/urls.txt").unwrap_err();

        assert!(matches!(err, JobCheckError::FileNotFound(_)));
        assert!(err.to_string().contains("urls.txt"));
    }

    #[test]
    fn test_read_urls__directory_is_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;

        let err = read_urls(dir.path()).unwrap_err();

        assert!(matches!(err, JobCheckError::Io(_)));
        Ok(())
    }
}
