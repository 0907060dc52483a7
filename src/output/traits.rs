//! Output traits and error types
//!
//! This module defines the progress reporting seam the orchestrator calls
//! after every page, and the errors produced while writing reports.

use crate::crawler::CrawlResult;
use crate::state::PageOutcome;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receives live progress from a running crawl
///
/// Implementations must be thread-safe so a coordinator carrying one can be
/// moved onto another task.
pub trait ProgressReporter: Send + Sync {
    /// Called once per processed page, after the outcome has been recorded
    ///
    /// # Arguments
    ///
    /// * `outcome` - What happened to the page
    /// * `progress` - The result accumulated so far, including this page
    /// * `pending` - Number of URLs still waiting in the frontier
    fn on_page(&self, outcome: &PageOutcome, progress: &CrawlResult, pending: usize);

    /// Called once when the frontier is exhausted
    fn on_complete(&self, _result: &CrawlResult) {}
}
