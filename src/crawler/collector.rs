//! Result collector
//!
//! Accumulates page outcomes into a [`CrawlResult`] in the order they are
//! recorded.

use crate::crawler::FetchError;
use crate::state::PageOutcome;
use serde::Serialize;

/// A page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPage {
    pub url: String,
    pub error: String,
}

/// Final aggregate of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    /// Pages that satisfied the criterion, in visitation order
    pub matched: Vec<String>,

    /// Pages that were processed but did not satisfy the criterion
    pub unmatched: Vec<String>,

    /// Number of pages that could not be fetched
    pub failed: usize,

    /// Number of pages taken off the frontier
    pub total_visited: usize,

    /// Failed pages with the reason, in visitation order
    pub failures: Vec<FailedPage>,
}

impl CrawlResult {
    /// Share of visited pages that matched, as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.total_visited == 0 {
            return 0.0;
        }
        (self.matched.len() as f64 / self.total_visited as f64) * 100.0
    }
}

/// Builds a [`CrawlResult`] one outcome at a time
#[derive(Debug, Default)]
pub struct ResultCollector {
    result: CrawlResult,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one page outcome
    pub fn record(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Matched(url) => self.result.matched.push(url.clone()),
            PageOutcome::Unmatched(url) => self.result.unmatched.push(url.clone()),
            PageOutcome::Failed(url, error) => self.record_failure(url, error),
        }
        self.result.total_visited += 1;
    }

    fn record_failure(&mut self, url: &str, error: &FetchError) {
        self.result.failed += 1;
        self.result.failures.push(FailedPage {
            url: url.to_string(),
            error: error.to_string(),
        });
    }

    /// The result as accumulated so far
    pub fn current(&self) -> &CrawlResult {
        &self.result
    }

    /// Hands out the finished result
    pub fn finalize(self) -> CrawlResult {
        self.result
    }
}
