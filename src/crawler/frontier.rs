//! Crawl frontier: the FIFO of discovered, not-yet-fetched URLs
//!
//! The frontier owns the visited set as well, so that "has this URL been
//! seen" and "enqueue it" happen in one step. A URL is marked visited when it
//! is accepted, not when its fetch completes, which keeps concurrent workers
//! from ever scheduling the same URL twice.

use std::collections::{HashSet, VecDeque};

/// Breadth-first queue of normalized URLs plus the set of URLs ever accepted
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs waiting to be fetched, in discovery order
    queue: VecDeque<String>,

    /// Every URL ever accepted into the queue
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the seed URL
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.offer(seed);
        frontier
    }

    /// Offers a URL to the frontier
    ///
    /// The URL is enqueued and marked visited only if it was never seen
    /// before. Returns true if it was accepted.
    pub fn offer(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();

        if self.visited.contains(&url) {
            return false;
        }

        self.visited.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Offers several URLs, returning how many were accepted
    pub fn offer_all<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        urls.into_iter()
            .map(|url| self.offer(url))
            .filter(|accepted| *accepted)
            .count()
    }

    /// Takes the oldest queued URL
    pub fn next_url(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Returns the number of URLs waiting to be fetched
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether no URL is waiting
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of URLs ever accepted
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
