//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Lifecycle of one orchestrator (idle, running, done)
//! - `PageOutcome`: Classification produced for every dequeued URL

mod crawl_state;
mod outcome;

// Re-export main types
pub use crawl_state::CrawlState;
pub use outcome::PageOutcome;
