//! Output module for crawl results
//!
//! This module handles:
//! - Serializing run results as JSON, to a string or a file
//! - Summarizing what a crawl produced

pub mod stats;

pub use stats::{print_statistics, write_statistics, CrawlStatistics};

use crate::crawler::RunResult;
use crate::OutlineError;
use std::fs;
use std::path::Path;

/// Serializes run results as pretty-printed JSON
///
/// Each run becomes an object with its `base_url` and the page results under
/// `data`, in crawl order.
pub fn render_json(runs: &[RunResult]) -> Result<String, OutlineError> {
    Ok(serde_json::to_string_pretty(runs)?)
}

/// Writes run results as pretty-printed JSON to `path`
pub fn write_json(runs: &[RunResult], path: &Path) -> Result<(), OutlineError> {
    let json = render_json(runs)?;
    fs::write(path, json)?;
    tracing::info!("Wrote {} run(s) to {}", runs.len(), path.display());
    Ok(())
}
