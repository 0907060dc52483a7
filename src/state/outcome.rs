use crate::crawler::FetchError;

/// Result of processing one dequeued URL
///
/// Exactly one outcome is produced per URL taken off the frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page satisfied the search criterion
    Matched(String),

    /// The page was fetched and parsed but did not satisfy the criterion
    Unmatched(String),

    /// The page could not be fetched; its links were never extracted
    Failed(String, FetchError),
}

impl PageOutcome {
    /// The URL this outcome belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::Matched(url) | Self::Unmatched(url) | Self::Failed(url, _) => url,
        }
    }
}
