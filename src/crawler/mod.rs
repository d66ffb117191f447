//! Crawler module for breadth-first page crawling
//!
//! This module contains the core crawling logic, including:
//! - Page rendering over HTTP
//! - The breadth-first frontier and visited set
//! - Overall crawl control across seeds

mod controller;
mod frontier;
mod renderer;
mod types;

pub use controller::CrawlController;
pub use frontier::Frontier;
pub use renderer::{build_http_client, HttpRenderer, Renderer};
pub use types::{CrawlPolicy, CrawlResult, CrawlTask, RunAborted, RunResult};

use crate::config::Config;

/// Runs a complete crawl of the configured seeds
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP renderer, summarizer and transcript fetcher
/// 2. Crawl each seed breadth-first
/// 3. Return one result set per seed
///
/// # Example
///
/// ```no_run
/// use sumi_outline::config::load_config;
/// use sumi_outline::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("outline.toml"))?;
/// let runs = crawl(&config).await?;
/// println!("Crawled {} seed(s)", runs.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<Vec<RunResult>, RunAborted> {
    let mut controller = CrawlController::from_config(config).map_err(|source| RunAborted {
        completed: Vec::new(),
        partial: None,
        source,
    })?;

    controller
        .run(&config.seeds, &CrawlPolicy::from(&config.crawler))
        .await
}

