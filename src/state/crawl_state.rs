/// Lifecycle states of a crawl orchestrator
use std::fmt;

/// Represents where an orchestrator is in its single crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Constructed, frontier not yet seeded
    Idle,

    /// Frontier seeded, pages being processed
    Running,

    /// Frontier exhausted; the result has been or can be handed out
    Done,
}

impl CrawlState {
    /// Returns true if the orchestrator accepts no further work
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` is a legal successor of this state
    ///
    /// Running may be re-entered while the frontier still has work.
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running) | (Self::Running, Self::Running) | (Self::Running, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
