//! Markdown summary generation
//!
//! This module writes a human-readable markdown summary of a finished crawl.

use crate::crawler::{CrawlResult, SearchCriterion};
use crate::output::traits::OutputResult;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary of the crawl to `output_path`
///
/// # Arguments
///
/// * `scope` - The crawl boundary prefix
/// * `criterion` - The search criterion pages were classified by
/// * `result` - The finished crawl result
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(
    scope: &str,
    criterion: &SearchCriterion,
    result: &CrawlResult,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(scope, criterion, result, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl result as markdown
pub fn format_markdown_summary(
    scope: &str,
    criterion: &SearchCriterion,
    result: &CrawlResult,
    generated_at: DateTime<Utc>,
) -> String {
    let mut md = String::new();

    md.push_str("# Page-Sift Crawl Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Scope**: `{}`\n", scope));
    md.push_str(&format!("- **Criterion**: {}\n", criterion));
    md.push_str(&format!(
        "- **Generated**: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Pages visited | {} |\n", result.total_visited));
    md.push_str(&format!("| Matched | {} |\n", result.matched.len()));
    md.push_str(&format!("| Unmatched | {} |\n", result.unmatched.len()));
    md.push_str(&format!("| Failed | {} |\n", result.failed));
    md.push_str(&format!("| Match rate | {:.1}% |\n\n", result.match_rate()));

    push_url_section(&mut md, "Matched Pages", &result.matched);
    push_url_section(&mut md, "Unmatched Pages", &result.unmatched);

    if !result.failures.is_empty() {
        md.push_str("## Failed Pages\n\n");
        md.push_str("| URL | Error |\n");
        md.push_str("|-----|-------|\n");
        for failure in &result.failures {
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(&failure.url),
                escape_cell(&failure.error)
            ));
        }
        md.push('\n');
    }

    md
}

/// Escapes text for use inside a markdown table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn push_url_section(md: &mut String, title: &str, urls: &[String]) {
    md.push_str(&format!("## {}\n\n", title));
    if urls.is_empty() {
        md.push_str("_None_\n\n");
        return;
    }
    for url in urls {
        md.push_str(&format!("- {}\n", url));
    }
    md.push('\n');
}
