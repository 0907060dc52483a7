//! Frontier and visited set
//!
//! Together these drive a breadth-first traversal in which every URL is
//! visited at most once:
//! - A URL is marked visited when it is enqueued, before any fetch is issued
//! - The queue is strictly first-in-first-out
//! - `offer` is the single check-and-insert step; there is no separate
//!   "contains" followed by "insert" for callers to race on

use std::collections::{HashSet, VecDeque};

/// Pending URLs plus every URL ever admitted
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, oldest first
    queue: VecDeque<String>,

    /// Every URL ever enqueued; only grows
    visited: HashSet<String>,

    /// Number of URLs handed out by `dequeue`
    dequeued: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes the starting URL and marks it visited
    pub fn enqueue_seed(&mut self, seed: &str) {
        self.offer(seed);
    }

    /// Pops the oldest pending URL
    ///
    /// `None` means nothing is pending.
    pub fn dequeue(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.dequeued += 1;
        Some(url)
    }

    /// Enqueues `url` unless it has been seen before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and is now pending
    /// * `false` - The URL was already visited; nothing changed
    pub fn offer(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string());
        self.queue.push_back(url.to_string());
        true
    }

    /// Returns whether `url` has ever been admitted
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of URLs waiting to be fetched
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs ever admitted
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs handed out so far
    pub fn dequeued_count(&self) -> usize {
        self.dequeued
    }

    /// Pending URLs in the order they will be dequeued
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frontier() {
        let frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
        assert_eq!(frontier.visited_count(), 0);
    }

    #[test]
    fn test_seed_is_marked_visited() {
        let mut frontier = Frontier::new();
        frontier.enqueue_seed("https://example.test/");

        assert!(frontier.is_visited("https://example.test/"));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.offer("https://example.test/1");
        frontier.offer("https://example.test/2");
        frontier.offer("https://example.test/3");

        assert_eq!(frontier.dequeue().as_deref(), Some("https://example.test/1"));
        assert_eq!(frontier.dequeue().as_deref(), Some("https://example.test/2"));
        assert_eq!(frontier.dequeue().as_deref(), Some("https://example.test/3"));
        assert_eq!(frontier.dequeue(), None);
    }

    #[test]
    fn test_offer_rejects_duplicates() {
        let mut frontier = Frontier::new();
        assert!(frontier.offer("https://example.test/a"));
        assert!(!frontier.offer("https://example.test/a"));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_offer_rejects_already_dequeued() {
        let mut frontier = Frontier::new();
        frontier.enqueue_seed("https://example.test/");
        frontier.dequeue();

        assert!(!frontier.offer("https://example.test/"));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_pending_bounded_by_visited_minus_dequeued() {
        let mut frontier = Frontier::new();
        for i in 0..5 {
            frontier.offer(&format!("https://example.test/{}", i));
        }
        frontier.dequeue();
        frontier.dequeue();
        frontier.offer("https://example.test/0");

        assert_eq!(frontier.dequeued_count(), 2);
        assert_eq!(frontier.visited_count(), 5);
        assert!(frontier.len() <= frontier.visited_count() - frontier.dequeued_count());
    }

    #[test]
    fn test_pending_iterates_in_queue_order() {
        let mut frontier = Frontier::new();
        frontier.offer("https://example.test/b");
        frontier.offer("https://example.test/a");

        let pending: Vec<&str> = frontier.pending().collect();
        assert_eq!(pending, vec!["https://example.test/b", "https://example.test/a"]);
    }
}
