//! Property-based tests for jobcheck using proptest
//!
//! Input parsing and the CSV result mapping are exercised with generated
//! URL lists, including blank lines, padding and duplicates.

use jobcheck::core::types::{CheckRequest, CheckResult};
use jobcheck::discovery::parse_urls;
use jobcheck::reporting::csv_sink::{sheet_text, write_results_to, write_sheet_text_to};
use proptest::prelude::*;

/// Generate posting-like URLs
fn url_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (r"[a-z]{3,10}", 1..100_000u32)
            .prop_map(|(company, id)| format!("https://boards.greenhouse.io/{company}/jobs/{id}")),
        (r"[a-z]{3,10}", r"[A-Za-z0-9_-]{4,12}").prop_map(|(tenant, slug)| format!(
            "https://{tenant}.wd5.myworkdayjobs.com/en-US/careers/job/{slug}"
        )),
        (r"[a-z]{3,8}", prop::collection::vec(r"[a-z0-9]{1,8}", 0..4)).prop_map(
            |(domain, parts)| format!("https://{domain}.com/{}", parts.join("/"))
        ),
        (r"[a-z]{3,8}", r"[a-z]{1,8}", r"[a-z0-9,]{1,8}")
            .prop_map(|(domain, key, value)| format!("https://{domain}.com/jobs?{key}={value}")),
    ]
}

/// A line as it may appear in a hand-edited input file
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => url_strategy(),
        1 => (r"[ \t]{0,3}", url_strategy(), r"[ \t]{0,3}")
            .prop_map(|(lead, url, trail)| format!("{lead}{url}{trail}")),
        1 => r"[ \t]{0,4}",
    ]
}

fn result_strategy() -> impl Strategy<Value = CheckResult> {
    (url_strategy(), 0..4u8, 200..600u16).prop_map(|(url, kind, status)| match kind {
        0 => CheckResult::live(&url, 200),
        1 => CheckResult::expired(&url, status, format!("HTTP {status} (GET)")),
        2 => CheckResult::uncertain(&url, None, "Request Error: connection refused, retry"),
        _ => CheckResult::empty_url(""),
    })
}

proptest! {
    #[test]
    fn parse_urls_keeps_every_non_blank_line_in_order(
        lines in prop::collection::vec(line_strategy(), 0..40),
        crlf in any::<bool>(),
    ) {
        let separator = if crlf { "\r\n" } else { "\n" };
        let text = lines.join(separator);

        let parsed = parse_urls(&text);

        let expected: Vec<String> = lines
            .iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn parsed_urls_are_trimmed_and_non_empty(
        lines in prop::collection::vec(line_strategy(), 0..40),
    ) {
        for url in parse_urls(&lines.join("\n")) {
            prop_assert!(!url.is_empty());
            prop_assert_eq!(url.trim(), url.as_str());
        }
    }

    #[test]
    fn batch_indices_match_positions(urls in prop::collection::vec(url_strategy(), 0..50)) {
        let requests = CheckRequest::batch(urls.clone());

        prop_assert_eq!(requests.len(), urls.len());
        for (position, request) in requests.iter().enumerate() {
            prop_assert_eq!(request.index, position);
            prop_assert_eq!(&request.url, &urls[position]);
        }
    }

    #[test]
    fn results_csv_has_one_row_per_result(results in prop::collection::vec(result_strategy(), 0..30)) {
        let mut buf = Vec::new();
        write_results_to(&mut buf, &results).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        prop_assert_eq!(rows.len(), results.len());
        for (row, result) in rows.iter().zip(&results) {
            prop_assert_eq!(&row[0], result.url.as_str());
            prop_assert_eq!(
                row[1].to_string(),
                result.status.map(|s| s.to_string()).unwrap_or_default()
            );
            prop_assert_eq!(&row[2], if result.expired { "True" } else { "False" });
            prop_assert_eq!(&row[3], result.reason.as_str());
            prop_assert_eq!(&row[4], sheet_text(result.expired));
        }
    }

    #[test]
    fn sheet_text_file_lines_up_with_results(results in prop::collection::vec(result_strategy(), 0..30)) {
        let mut buf = Vec::new();
        write_sheet_text_to(&mut buf, &results).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(buf.as_slice());
        let cells: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();

        prop_assert_eq!(cells.len(), results.len());
        for (cell, result) in cells.iter().zip(&results) {
            let expected = if result.expired { "No Longer Interested" } else { " " };
            prop_assert_eq!(cell.as_str(), expected);
        }
    }
}
