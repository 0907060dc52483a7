//! Output module for reporting crawl progress and results
//!
//! This module handles:
//! - Live per-page progress through [`ProgressReporter`]
//! - Printing the final result as text or JSON
//! - Writing a markdown summary file

mod markdown;
mod report;
mod traits;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use report::{format_json_report, format_text_report, print_report, ReportFormat};
pub use traits::{OutputError, OutputResult, ProgressReporter};

use crate::crawler::CrawlResult;
use crate::state::PageOutcome;

/// Reports progress through `tracing`
///
/// Matches are logged at info, misses at debug and failures at warn, with a
/// running tally every `every` pages.
#[derive(Debug, Clone)]
pub struct LogReporter {
    every: usize,
}

impl LogReporter {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressReporter for LogReporter {
    fn on_page(&self, outcome: &PageOutcome, progress: &CrawlResult, pending: usize) {
        match outcome {
            PageOutcome::Matched(url) => tracing::info!("Match found: {}", url),
            PageOutcome::Unmatched(url) => tracing::debug!("No match: {}", url),
            PageOutcome::Failed(url, error) => tracing::warn!("Failed to crawl {}: {}", url, error),
        }

        if progress.total_visited % self.every == 0 {
            tracing::info!(
                "Progress: {} pages visited ({} matched, {} failed), {} in frontier",
                progress.total_visited,
                progress.matched.len(),
                progress.failed,
                pending
            );
        }
    }

    fn on_complete(&self, result: &CrawlResult) {
        tracing::info!(
            "Crawl complete: {} pages visited, {} matched, {} unmatched, {} failed",
            result.total_visited,
            result.matched.len(),
            result.unmatched.len(),
            result.failed
        );
    }
}
