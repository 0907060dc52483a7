//! Crawler module for page fetching and classification
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` capability
//! - HTML parsing and link extraction
//! - Content matching against a search criterion
//! - Frontier and visited-set bookkeeping
//! - Result collection and overall crawl coordination

mod collector;
mod coordinator;
mod fetcher;
mod frontier;
mod matcher;
mod parser;

pub use collector::{CrawlResult, FailedPage, ResultCollector};
pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use matcher::{matches, SearchCriterion};
pub use parser::{extract_links, ParsedPage};

use crate::config::Config;
use crate::url::CrawlScope;
use crate::SiftError;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Seed the frontier with the scope's starting URL
/// 3. Fetch, classify and extract links until the frontier is empty
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `scope` - The crawl boundary (and seed)
/// * `criterion` - What a page must contain to count as matched
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed; failed pages are counted, not fatal
/// * `Err(SiftError)` - The HTTP client could not be built
pub async fn crawl(
    config: &Config,
    scope: CrawlScope,
    criterion: SearchCriterion,
) -> Result<CrawlResult, SiftError> {
    let fetcher = HttpFetcher::new(&config.http, &config.user_agent)?;
    Coordinator::new(scope, criterion, fetcher)
        .with_concurrency(config.crawler.concurrency as usize)
        .run()
        .await
}
