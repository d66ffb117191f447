//! Statistics over crawl results
//!
//! This module condenses a list of run results into counts that are printed
//! after a crawl.

use crate::crawler::RunResult;
use crate::outline::DocumentNode;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Number of seeds crawled
    pub seeds: usize,

    /// Pages that produced a result
    pub pages: usize,

    /// Count of pages by link depth
    pub pages_by_depth: BTreeMap<u32, usize>,

    /// Outline sections across all pages, nested ones included
    pub sections: usize,

    /// Pages whose outline came back from the summarizer
    pub rewritten: usize,

    /// Pages with a transcript attached
    pub transcripts: usize,

    /// Image URLs recorded
    pub images: usize,

    /// Child links recorded
    pub child_links: usize,
}

impl CrawlStatistics {
    pub fn from_runs(runs: &[RunResult]) -> Self {
        let mut stats = CrawlStatistics {
            seeds: runs.len(),
            ..Default::default()
        };

        for result in runs.iter().flat_map(|run| &run.results) {
            stats.pages += 1;
            *stats.pages_by_depth.entry(result.depth).or_default() += 1;
            stats.sections += result
                .document_tree
                .iter()
                .map(DocumentNode::section_count)
                .sum::<usize>();
            if result.rewritten {
                stats.rewritten += 1;
            }
            if result.transcript.is_some() {
                stats.transcripts += 1;
            }
            stats.images += result.image_urls.len();
            stats.child_links += result.child_urls.len();
        }

        stats
    }
}

/// Writes statistics in a human-readable layout
pub fn write_statistics<W: Write>(stats: &CrawlStatistics, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===\n")?;

    writeln!(out, "Overview:")?;
    writeln!(out, "  Seeds crawled: {}", stats.seeds)?;
    writeln!(out, "  Pages with content: {}", stats.pages)?;
    writeln!(out, "  Outline sections: {}", stats.sections)?;
    writeln!(out, "  Child links recorded: {}", stats.child_links)?;
    writeln!(out, "  Images recorded: {}", stats.images)?;
    writeln!(out)?;

    if !stats.pages_by_depth.is_empty() {
        writeln!(out, "Pages by Depth:")?;
        for (depth, count) in &stats.pages_by_depth {
            let percentage = (*count as f64 / stats.pages as f64) * 100.0;
            writeln!(out, "  {}: {} ({:.1}%)", depth, count, percentage)?;
        }
        writeln!(out)?;
    }

    if stats.rewritten > 0 {
        writeln!(out, "Rewritten outlines: {}", stats.rewritten)?;
    }
    if stats.transcripts > 0 {
        writeln!(out, "Transcripts: {}", stats.transcripts)?;
    }

    Ok(())
}

/// Prints statistics to stderr, keeping stdout free for JSON
pub fn print_statistics(stats: &CrawlStatistics) {
    if let Err(e) = write_statistics(stats, &mut io::stderr().lock()) {
        tracing::warn!("Failed to print statistics: {}", e);
    }
}
