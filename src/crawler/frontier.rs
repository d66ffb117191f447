//! Breadth-first crawl frontier
//!
//! The queue is reset for every seed, while the visited set and the processed
//! page counter live as long as the controller that owns the frontier. A URL
//! that has been visited is never queued again, and within one seed a URL is
//! queued at most once.

use crate::crawler::types::CrawlTask;
use std::collections::{HashSet, VecDeque};

/// FIFO queue of crawl tasks plus the set of processed URLs
#[derive(Debug, Default)]
pub struct Frontier {
    /// Tasks waiting to be processed, oldest first
    queue: VecDeque<CrawlTask>,

    /// URLs queued since the last reset, including ones already dequeued
    scheduled: HashSet<String>,

    /// URLs that produced a result
    visited: HashSet<String>,

    /// Number of results produced
    processed: u32,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue with the seed task at depth 0
    ///
    /// The visited set and processed counter are left untouched.
    pub fn reset(&mut self, seed: &str) {
        self.queue.clear();
        self.scheduled.clear();
        self.scheduled.insert(seed.to_string());
        self.queue.push_back(CrawlTask::new(seed, 0));
    }

    /// Discards every waiting task
    ///
    /// URLs already queued this seed stay blocked from being queued again.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Removes and returns the oldest task
    pub fn pop(&mut self) -> Option<CrawlTask> {
        self.queue.pop_front()
    }

    /// Queues a task unless its URL was visited or already queued this seed
    ///
    /// Returns true when the task was queued.
    pub fn push(&mut self, task: CrawlTask) -> bool {
        if self.visited.contains(&task.url) || !self.scheduled.insert(task.url.clone()) {
            return false;
        }
        self.queue.push_back(task);
        true
    }

    /// Records a URL as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Tasks still waiting, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &CrawlTask> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn record_processed(&mut self) {
        self.processed += 1;
    }

    pub fn processed(&self) -> u32 {
        self.processed
    }

    pub fn reset_processed(&mut self) {
        self.processed = 0;
    }
}
