//! Crawl tasks, per-page results and per-seed results

use crate::config::{CrawlerConfig, DepthPolicy, PageLimitScope};
use crate::outline::DocumentNode;
use crate::OutlineError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// A URL waiting in the frontier, with its link distance from the seed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawlTask {
    pub url: String,
    pub depth: u32,
}

impl CrawlTask {
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

/// Everything recorded for one successfully processed page
#[derive(Debug, Clone, Serialize)]
pub struct CrawlResult {
    pub page_url: String,

    /// Extracted outline, or the summarizer's rewrite of it
    pub document_tree: Vec<DocumentNode>,

    /// True when `document_tree` came back from the summarizer
    pub rewritten: bool,

    /// Description and keywords meta strings
    pub meta_info: Vec<String>,

    /// Captions, for video pages that have them
    pub transcript: Option<String>,

    pub image_urls: Vec<String>,

    /// Resolved links that had not been visited when this page was processed
    pub child_urls: Vec<String>,

    pub depth: u32,

    pub fetched_at: DateTime<Utc>,
}

/// Results collected while draining the frontier of one seed
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub base_url: String,

    /// Results in the order their tasks were dequeued
    #[serde(rename = "data")]
    pub results: Vec<CrawlResult>,

    pub started_at: DateTime<Utc>,

    pub finished_at: DateTime<Utc>,
}

/// Limits and switches for one call to `CrawlController::run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlPolicy {
    pub max_depth: u32,
    pub max_pages: u32,
    pub use_rewrite: bool,
    pub depth_policy: DepthPolicy,
    pub page_limit_scope: PageLimitScope,
}

impl CrawlPolicy {
    /// Creates a policy with the default depth and page-limit behavior
    pub fn new(max_depth: u32, max_pages: u32, use_rewrite: bool) -> Self {
        Self {
            max_depth,
            max_pages,
            use_rewrite,
            depth_policy: DepthPolicy::default(),
            page_limit_scope: PageLimitScope::default(),
        }
    }

    pub fn with_depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    pub fn with_page_limit_scope(mut self, page_limit_scope: PageLimitScope) -> Self {
        self.page_limit_scope = page_limit_scope;
        self
    }
}

impl From<&CrawlerConfig> for CrawlPolicy {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_pages: config.max_pages,
            use_rewrite: config.use_rewrite,
            depth_policy: config.depth_policy,
            page_limit_scope: config.page_limit_scope,
        }
    }
}

/// A multi-seed run stopped by a fatal error
///
/// Seeds that finished before the failure are returned in `completed`; the
/// results gathered for the failing seed up to that point are in `partial`.
#[derive(Debug, Error)]
#[error("crawl aborted after {} completed seed(s): {source}", .completed.len())]
pub struct RunAborted {
    pub completed: Vec<RunResult>,
    pub partial: Option<RunResult>,
    pub source: OutlineError,
}
