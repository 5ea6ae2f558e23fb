//! CSV output for finished batches
//!
//! Two files are produced: the full results table and, optionally, a
//! header-less single-column companion meant to be pasted into a
//! spreadsheet next to the original URL column.

use csv::{Terminator, Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::constants::sheet;
use crate::core::error::{JobCheckError, Result};
use crate::core::types::CheckResult;

/// Spreadsheet text for a posting.
pub fn sheet_text(expired: bool) -> &'static str {
    if expired {
        sheet::NO_LONGER_INTERESTED
    } else {
        ""
    }
}

/// `output.csv` becomes `output.sheet_text.csv`.
pub fn sheet_text_path<P: AsRef<Path>>(path: P) -> PathBuf {
    path.as_ref().with_extension(sheet::SHEET_TEXT_EXTENSION)
}

fn writer_for<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .has_headers(false)
        .from_writer(out)
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| {
        JobCheckError::Io(std::io::Error::new(
            e.kind(),
            format!("Could not create {}: {e}", path.display()),
        ))
    })
}

/// Write the results table to any writer.
pub fn write_results_to<W: Write>(out: W, results: &[CheckResult]) -> Result<()> {
    let mut writer = writer_for(out);
    writer.write_record(sheet::CSV_HEADER)?;

    for result in results {
        let status = result.status.map(|s| s.to_string()).unwrap_or_default();
        let expired = if result.expired { "True" } else { "False" };
        writer.write_record([
            result.url.as_str(),
            status.as_str(),
            expired,
            result.reason.as_str(),
            sheet_text(result.expired),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_results<P: AsRef<Path>>(path: P, results: &[CheckResult]) -> Result<()> {
    write_results_to(create(path.as_ref())?, results)
}

/// Write the companion column: one row per result, no header.
///
/// Rows that are not expired hold a single space so the spreadsheet keeps
/// the row instead of collapsing it.
pub fn write_sheet_text_to<W: Write>(out: W, results: &[CheckResult]) -> Result<()> {
    let mut writer = writer_for(out);

    for result in results {
        let cell = if result.expired {
            sheet::NO_LONGER_INTERESTED
        } else {
            sheet::BLANK_CELL
        };
        writer.write_record([cell])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_sheet_text<P: AsRef<Path>>(path: P, results: &[CheckResult]) -> Result<()> {
    write_sheet_text_to(create(path.as_ref())?, results)
}
