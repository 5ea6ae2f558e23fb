use serde::Serialize;
use std::time::Duration;

use crate::core::constants::output_formats;
use crate::core::types::{CheckResult, Verdict};
use crate::ui::color::{Colors, bold, colorize};

/// Verdict totals for one finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub live: usize,
    pub expired: usize,
    pub uncertain: usize,
    pub skipped: usize,
    pub duration_ms: u128,
}

impl BatchSummary {
    pub fn from_results(results: &[CheckResult], duration: Duration) -> Self {
        let mut summary = Self {
            total: results.len(),
            duration_ms: duration.as_millis(),
            ..Default::default()
        };

        for result in results {
            match result.verdict {
                Verdict::Live => summary.live += 1,
                Verdict::Expired => summary.expired += 1,
                Verdict::Uncertain => summary.uncertain += 1,
                Verdict::Skipped => summary.skipped += 1,
            }
        }

        summary
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a BatchSummary,
    results: &'a [CheckResult],
}

/// Print results to stdout in the requested format.
///
/// `quiet` suppresses the text format only; json and minimal are meant for
/// piping and are always printed.
pub fn display_results(
    results: &[CheckResult],
    summary: &BatchSummary,
    output_format: &str,
    quiet: bool,
) {
    let rendered = match output_format {
        output_formats::MINIMAL => render_minimal(results),
        output_formats::JSON => render_json(results, summary),
        _ if quiet => return,
        _ => render_text(results, summary),
    };
    print!("{rendered}");
}

/// One `<status|-> <VERDICT> <url>` line per record.
pub fn render_minimal(results: &[CheckResult]) -> String {
    results
        .iter()
        .map(|result| {
            let status = result
                .status
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            format!("{status} {} {}\n", result.verdict, result.url)
        })
        .collect()
}

pub fn render_json(results: &[CheckResult], summary: &BatchSummary) -> String {
    let report = JsonReport { summary, results };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => json + "\n",
        Err(e) => json_error(&e.to_string()),
    }
}

/// Single-object JSON error line; the message is escaped by serde_json.
fn json_error(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string() + "\n"
}

/// Colorized summary plus the expired and uncertain lists.
pub fn render_text(results: &[CheckResult], summary: &BatchSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} URL(s) checked in {:.2}s\n",
        bold("Summary:"),
        summary.total,
        summary.duration_ms as f64 / 1000.0
    ));
    out.push_str(&format!(
        "   {} live, {} expired, {} uncertain, {} skipped\n",
        colorize(&summary.live.to_string(), Colors::BRIGHT_GREEN),
        colorize(&summary.expired.to_string(), Colors::BRIGHT_RED),
        colorize(&summary.uncertain.to_string(), Colors::BRIGHT_YELLOW),
        summary.skipped
    ));

    push_group(&mut out, results, Verdict::Expired, "Expired", Colors::BRIGHT_RED);
    push_group(
        &mut out,
        results,
        Verdict::Uncertain,
        "Uncertain",
        Colors::BRIGHT_YELLOW,
    );

    if summary.expired == 0 && summary.uncertain == 0 {
        out.push_str(&format!(
            "\n{}\n",
            colorize("All postings are live", Colors::BRIGHT_GREEN)
        ));
    }

    out
}

fn push_group(out: &mut String, results: &[CheckResult], verdict: Verdict, title: &str, color: &str) {
    let group: Vec<&CheckResult> = results.iter().filter(|r| r.verdict == verdict).collect();
    if group.is_empty() {
        return;
    }

    out.push_str(&format!(
        "\n{} ({}):\n",
        colorize(title, color),
        group.len()
    ));
    for (i, result) in group.iter().enumerate() {
        let status = result
            .status
            .map(|s| format!("{s} "))
            .unwrap_or_default();
        out.push_str(&format!(
            "   {:>3}. {}{} {}\n",
            i + 1,
            status,
            colorize(&result.url, Colors::CYAN),
            colorize(&format!("({})", result.reason), Colors::DIM)
        ));
    }
}
