//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the other components
//! together:
//! - Seeding and draining the frontier
//! - Fetching pages, concurrently when configured
//! - Following redirects only while they stay in scope
//! - Classifying each page and recording its outcome
//! - Feeding in-scope links back into the frontier

use crate::crawler::collector::{CrawlResult, ResultCollector};
use crate::crawler::fetcher::{FetchError, Fetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::matcher::SearchCriterion;
use crate::crawler::parser::{extract_links, ParsedPage};
use crate::output::{LogReporter, ProgressReporter};
use crate::state::{CrawlState, PageOutcome};
use crate::url::CrawlScope;
use crate::SiftError;
use futures::future::join_all;
use url::Url;

/// Maximum redirect hops followed for a single dequeued URL
const MAX_REDIRECTS: usize = 10;

/// A fetched body and the URL it was finally served from
#[derive(Debug)]
struct FetchedPage {
    final_url: String,
    body: String,
}

/// Drives one crawl from seed to frontier exhaustion
///
/// A coordinator is single-use: once it reaches [`CrawlState::Done`] it
/// refuses further work, and a new crawl needs a new coordinator.
///
/// The frontier and visited set are owned here and only mutated through
/// `&mut self`, so with several fetches in flight the check-and-insert
/// in [`Frontier::offer`] still happens at a single point.
pub struct Coordinator<F: Fetcher> {
    scope: CrawlScope,
    criterion: SearchCriterion,
    fetcher: F,
    frontier: Frontier,
    collector: ResultCollector,
    reporter: Box<dyn ProgressReporter>,
    concurrency: usize,
    state: CrawlState,
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates an idle coordinator
    ///
    /// Defaults to one fetch at a time and a [`LogReporter`].
    pub fn new(scope: CrawlScope, criterion: SearchCriterion, fetcher: F) -> Self {
        Self {
            scope,
            criterion,
            fetcher,
            frontier: Frontier::new(),
            collector: ResultCollector::new(),
            reporter: Box::new(LogReporter::default()),
            concurrency: 1,
            state: CrawlState::Idle,
        }
    }

    /// Sets how many pages are fetched concurrently per step (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Replaces the progress reporter
    pub fn with_reporter(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn scope(&self) -> &CrawlScope {
        &self.scope
    }

    pub fn criterion(&self) -> &SearchCriterion {
        &self.criterion
    }

    /// The frontier, for inspection between steps
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The result accumulated so far
    pub fn progress(&self) -> &CrawlResult {
        self.collector.current()
    }

    fn transition(&mut self, next: CrawlState) -> Result<(), SiftError> {
        if !self.state.can_transition_to(next) {
            return Err(SiftError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    /// Seeds the frontier with the scope's starting URL
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The coordinator is now running
    /// * `Err(SiftError::InvalidTransition)` - The crawl was already started
    pub fn start(&mut self) -> Result<(), SiftError> {
        self.transition(CrawlState::Running)?;
        tracing::info!(
            "Starting crawl of {} ({} scope) for {}",
            self.scope.prefix(),
            self.scope.mode(),
            self.criterion
        );
        let seed = self.scope.prefix().to_string();
        self.frontier.enqueue_seed(&seed);
        Ok(())
    }

    /// Processes one batch of up to `concurrency` pages
    ///
    /// URLs are dequeued oldest first, fetched concurrently, then processed
    /// in dequeue order, so outcomes are deterministic for a given
    /// concurrency and match plain visitation order when it is 1.
    ///
    /// # Returns
    ///
    /// * `Ok(outcomes)` - Outcomes of this batch; empty once the crawl is done
    /// * `Err(SiftError::InvalidTransition)` - The crawl is not running
    pub async fn step(&mut self) -> Result<Vec<PageOutcome>, SiftError> {
        if self.state != CrawlState::Running {
            return Err(SiftError::InvalidTransition {
                from: self.state,
                to: CrawlState::Running,
            });
        }

        let batch: Vec<String> = std::iter::from_fn(|| self.frontier.dequeue())
            .take(self.concurrency)
            .collect();

        if batch.is_empty() {
            tracing::debug!("Frontier is empty, crawl complete");
            self.transition(CrawlState::Done)?;
            return Ok(Vec::new());
        }

        let fetcher = &self.fetcher;
        let scope = &self.scope;
        let fetched = join_all(batch.iter().map(|url| fetch_in_scope(fetcher, scope, url))).await;

        let mut outcomes = Vec::with_capacity(batch.len());
        for (url, page) in batch.into_iter().zip(fetched) {
            let outcome = self.process_page(url, page);
            self.collector.record(&outcome);
            self.reporter
                .on_page(&outcome, self.collector.current(), self.frontier.len());
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Classifies one fetched page and offers its in-scope links
    ///
    /// The outcome is recorded under the dequeued URL; links are resolved
    /// against the URL the body was actually served from. Kept synchronous
    /// so the parsed document never lives across an await.
    fn process_page(
        &mut self,
        url: String,
        fetched: Result<FetchedPage, FetchError>,
    ) -> PageOutcome {
        let fetched = match fetched {
            Ok(fetched) => fetched,
            Err(error) => {
                tracing::debug!("Fetch failed for {}: {}", url, error);
                return PageOutcome::Failed(url, error);
            }
        };

        let page = ParsedPage::parse(&fetched.body);
        let matched = self.criterion.matches(&page);

        match Url::parse(&fetched.final_url) {
            Ok(page_url) => {
                let mut admitted = 0;
                for link in extract_links(&page, &page_url) {
                    if self.scope.contains(&link) && self.frontier.offer(&link) {
                        admitted += 1;
                    }
                }
                tracing::trace!("{} new in-scope links from {}", admitted, url);
            }
            Err(e) => tracing::warn!("Cannot resolve links on {}: {}", url, e),
        }

        if matched {
            PageOutcome::Matched(url)
        } else {
            PageOutcome::Unmatched(url)
        }
    }

    /// Runs the crawl to completion and returns the result
    ///
    /// # Example
    ///
    /// ```no_run
    /// use page_sift::config::Config;
    /// use page_sift::crawler::{Coordinator, HttpFetcher, SearchCriterion};
    /// use page_sift::url::{CrawlScope, ScopeMode};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::default();
    /// let scope = CrawlScope::new("https://example.com/", ScopeMode::HostPrefix)?;
    /// let fetcher = HttpFetcher::new(&config.http, &config.user_agent)?;
    /// let criterion = SearchCriterion::ByClass("highlight".to_string());
    ///
    /// let result = Coordinator::new(scope, criterion, fetcher).run().await?;
    /// println!("{} pages matched", result.matched.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(mut self) -> Result<CrawlResult, SiftError> {
        if self.state == CrawlState::Idle {
            self.start()?;
        }

        let start_time = std::time::Instant::now();
        while !self.state.is_terminal() {
            self.step().await?;
        }

        let result = self.finish()?;
        tracing::debug!("Crawl finished in {:?}", start_time.elapsed());
        Ok(result)
    }

    /// Hands out the result of a finished crawl
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlResult)` - The crawl reached [`CrawlState::Done`]
    /// * `Err(SiftError::InvalidTransition)` - The frontier has not been drained yet
    pub fn finish(self) -> Result<CrawlResult, SiftError> {
        if self.state != CrawlState::Done {
            return Err(SiftError::InvalidTransition {
                from: self.state,
                to: CrawlState::Done,
            });
        }
        let result = self.collector.finalize();
        self.reporter.on_complete(&result);
        Ok(result)
    }
}

/// Fetches `url`, following redirects only while every hop stays in scope
///
/// A hop that leaves the scope is never requested.
async fn fetch_in_scope<F: Fetcher>(
    fetcher: &F,
    scope: &CrawlScope,
    url: &str,
) -> Result<FetchedPage, FetchError> {
    let mut current = url.to_string();

    for _ in 0..=MAX_REDIRECTS {
        tracing::debug!("Fetching {}", current);
        match fetcher.fetch(&current).await {
            Ok(body) => {
                return Ok(FetchedPage {
                    final_url: current,
                    body,
                })
            }
            Err(FetchError::Redirect(target)) => {
                if !scope.contains(&target) {
                    tracing::debug!("Not following redirect from {} to {}", current, target);
                    return Err(FetchError::RedirectOutOfScope(target));
                }
                current = target;
            }
            Err(error) => return Err(error),
        }
    }

    Err(FetchError::TooManyRedirects)
}
