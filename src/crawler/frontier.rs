use crate::url::normalized_key;
use std::collections::{HashSet, VecDeque};

/// A URL queued for fetching, paired with its normalized dedup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    url: String,
    key: String,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let key = normalized_key(&url);
        Self { url, key }
    }

    /// The URL exactly as it was enqueued
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The normalized key the frontier dedups on
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Ordered queue of URLs still to fetch
///
/// URLs come out in the order they went in, so link discovery walks a
/// site breadth-first. A single key set covers both the queue and every
/// URL already popped, so nothing is fetched twice under different
/// schemes, and popping never reopens a URL for re-entry.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<CrawlTarget>,
    seen: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless its key has been seen before
    ///
    /// Returns `true` if the URL was accepted.
    pub fn push(&mut self, url: impl Into<String>) -> bool {
        let target = CrawlTarget::new(url);
        if self.seen.contains(target.key()) {
            return false;
        }
        self.seen.insert(target.key().to_string());
        self.pending.push_back(target);
        true
    }

    /// Removes and returns the oldest queued URL
    ///
    /// Its key stays in the seen set, so the URL cannot come back.
    pub fn pop(&mut self) -> Option<CrawlTarget> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
