//! Final crawl report in text or JSON form

use crate::crawler::{CrawlResult, SearchCriterion};
use crate::output::traits::OutputResult;
use serde::Serialize;
use std::fmt::Write;
use std::str::FromStr;

/// How the final report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{}', expected 'text' or 'json'", other)),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scope: &'a str,
    criterion: &'a SearchCriterion,
    #[serde(flatten)]
    result: &'a CrawlResult,
}

/// Formats the report as pretty-printed JSON
pub fn format_json_report(
    scope: &str,
    criterion: &SearchCriterion,
    result: &CrawlResult,
) -> OutputResult<String> {
    let report = JsonReport {
        scope,
        criterion,
        result,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Formats the report as plain text
pub fn format_text_report(scope: &str, criterion: &SearchCriterion, result: &CrawlResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Crawl Report ===\n");
    let _ = writeln!(out, "Scope: {}", scope);
    let _ = writeln!(out, "Criterion: {}\n", criterion);

    let _ = writeln!(out, "Pages with {} ({}):", criterion, result.matched.len());
    for url in &result.matched {
        let _ = writeln!(out, "  - {}", url);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Pages without {} ({}):", criterion, result.unmatched.len());
    for url in &result.unmatched {
        let _ = writeln!(out, "  - {}", url);
    }
    let _ = writeln!(out);

    if !result.failures.is_empty() {
        let _ = writeln!(out, "Failed pages ({}):", result.failed);
        for failure in &result.failures {
            let _ = writeln!(out, "  - {} ({})", failure.url, failure.error);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(
        out,
        "Visited {} pages: {} matched ({:.1}%), {} unmatched, {} failed",
        result.total_visited,
        result.matched.len(),
        result.match_rate(),
        result.unmatched.len(),
        result.failed
    );

    out
}

/// Prints the report to stdout in the requested format
pub fn print_report(
    format: ReportFormat,
    scope: &str,
    criterion: &SearchCriterion,
    result: &CrawlResult,
) -> OutputResult<()> {
    match format {
        ReportFormat::Text => print!("{}", format_text_report(scope, criterion, result)),
        ReportFormat::Json => println!("{}", format_json_report(scope, criterion, result)?),
    }
    Ok(())
}
