//! Crawl controller - breadth-first orchestration across seeds
//!
//! For every seed the controller resets the frontier queue to the seed and
//! drains it in FIFO order:
//! - tasks deeper than the policy allows end the drain, discarding the rest
//!   of the queue, or are skipped
//! - each page is rendered, sanitized and turned into an outline
//! - video pages get their transcript attached
//! - with rewriting enabled the outline goes through the summarizer
//! - unvisited links are queued one level deeper
//!
//! Pages that fail to render or yield no outline are dropped without a result.
//! A summarizer failure aborts the whole run.

use crate::config::{Config, DepthPolicy, PageLimitScope};
use crate::crawler::frontier::Frontier;
use crate::crawler::renderer::{build_http_client, HttpRenderer, Renderer};
use crate::crawler::types::{CrawlPolicy, CrawlResult, CrawlTask, RunAborted, RunResult};
use crate::outline::{DocumentTreeBuilder, OutlineOptions};
use crate::page::analyze_page;
use crate::summarizer::{InteractionSummarizer, Summarizer};
use crate::transcript::{NoTranscripts, TimedTextFetcher, TranscriptFetcher};
use crate::url::{is_video_page, resolve_link, video_id};
use crate::{ConfigError, OutlineError};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Pages between progress log lines
const PROGRESS_INTERVAL: u32 = 10;

/// Drives renderer, outline builder, transcript fetcher and summarizer over
/// a breadth-first frontier
pub struct CrawlController {
    renderer: Arc<dyn Renderer>,
    summarizer: Option<Arc<dyn Summarizer>>,
    transcripts: Arc<dyn TranscriptFetcher>,
    builder: DocumentTreeBuilder,
    frontier: Frontier,
}

impl CrawlController {
    /// Creates a controller with no summarizer and transcripts disabled
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        Self {
            renderer,
            summarizer: None,
            transcripts: Arc::new(NoTranscripts),
            builder: DocumentTreeBuilder::default(),
            frontier: Frontier::new(),
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_transcripts(mut self, transcripts: Arc<dyn TranscriptFetcher>) -> Self {
        self.transcripts = transcripts;
        self
    }

    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.builder = DocumentTreeBuilder::new(options);
        self
    }

    /// Builds a controller with the HTTP-backed collaborators described by
    /// `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, OutlineError> {
        let client = build_http_client(&config.renderer)?;

        let mut controller = Self::new(Arc::new(HttpRenderer::new(
            client.clone(),
            &config.renderer,
        )))
        .with_outline_options(OutlineOptions {
            capture_link_text: config.crawler.capture_link_text,
        });

        if let Some(summarizer) = &config.summarizer {
            controller = controller.with_summarizer(Arc::new(InteractionSummarizer::new(
                client.clone(),
                summarizer,
            )));
        }

        if config.transcripts.enabled {
            controller = controller
                .with_transcripts(Arc::new(TimedTextFetcher::new(client, &config.transcripts)));
        }

        Ok(controller)
    }

    /// Frontier state left behind by the last run
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Tasks still queued after the last run, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &CrawlTask> {
        self.frontier.pending()
    }

    pub fn visited(&self) -> &HashSet<String> {
        self.frontier.visited()
    }

    /// Crawls every seed in order and returns one result set per seed
    ///
    /// The visited set is shared by all seeds, so a page reached from an
    /// earlier seed is never processed again for a later one.
    ///
    /// # Errors
    ///
    /// Returns [`RunAborted`] when rewriting fails; seeds finished before the
    /// failure and the partial results of the failing seed are carried in it.
    pub async fn run(
        &mut self,
        seeds: &[String],
        policy: &CrawlPolicy,
    ) -> Result<Vec<RunResult>, RunAborted> {
        let mut completed = Vec::with_capacity(seeds.len());

        if policy.use_rewrite && self.summarizer.is_none() {
            return Err(RunAborted {
                completed,
                partial: None,
                source: ConfigError::Validation(
                    "rewriting is enabled but no summarizer is configured".to_string(),
                )
                .into(),
            });
        }

        tracing::info!(
            "Starting crawl of {} seed(s): max depth {}, max pages {}",
            seeds.len(),
            policy.max_depth,
            policy.max_pages
        );

        for seed in seeds {
            let started_at = Utc::now();
            let mut results = Vec::new();
            let outcome = self.drain_seed(seed, policy, &mut results).await;

            let run = RunResult {
                base_url: seed.clone(),
                results,
                started_at,
                finished_at: Utc::now(),
            };

            match outcome {
                Ok(()) => {
                    tracing::info!("Seed {} finished with {} page(s)", seed, run.results.len());
                    completed.push(run);
                }
                Err(source) => {
                    tracing::error!("Aborting crawl at seed {}: {}", seed, source);
                    return Err(RunAborted {
                        completed,
                        partial: Some(run),
                        source,
                    });
                }
            }
        }

        tracing::info!(
            "Crawl completed: {} page(s) processed, {} left in frontier",
            self.frontier.processed(),
            self.frontier.len()
        );

        Ok(completed)
    }

    /// Drains the frontier of one seed, appending results as pages complete
    async fn drain_seed(
        &mut self,
        seed: &str,
        policy: &CrawlPolicy,
        results: &mut Vec<CrawlResult>,
    ) -> Result<(), OutlineError> {
        self.frontier.reset(seed);
        if policy.page_limit_scope == PageLimitScope::Seed {
            self.frontier.reset_processed();
        }

        tracing::info!("Crawling from seed {}", seed);
        let start_time = Instant::now();

        while self.frontier.processed() < policy.max_pages {
            let Some(task) = self.frontier.pop() else {
                tracing::debug!("Frontier of {} is empty", seed);
                break;
            };

            if task.depth > policy.max_depth {
                match policy.depth_policy {
                    DepthPolicy::Terminate => {
                        tracing::info!(
                            "Reached depth {} at {}, ending seed {} and discarding {} queued task(s)",
                            task.depth,
                            task.url,
                            seed,
                            self.frontier.len()
                        );
                        self.frontier.clear_queue();
                        break;
                    }
                    DepthPolicy::Skip => {
                        tracing::debug!("Skipping {} at depth {}", task.url, task.depth);
                        continue;
                    }
                }
            }

            if let Some(result) = self.process_task(&task, policy).await? {
                results.push(result);
                self.frontier.record_processed();

                let processed = self.frontier.processed();
                if processed % PROGRESS_INTERVAL == 0 {
                    let rate = results.len() as f64 / start_time.elapsed().as_secs_f64();
                    tracing::info!(
                        "Progress: {} pages processed, {} in frontier, {:.2} pages/sec",
                        processed,
                        self.frontier.len(),
                        rate
                    );
                }
            }
        }

        Ok(())
    }

    /// Processes one task; `Ok(None)` means the page was dropped
    async fn process_task(
        &mut self,
        task: &CrawlTask,
        policy: &CrawlPolicy,
    ) -> Result<Option<CrawlResult>, OutlineError> {
        tracing::debug!("Processing {} (depth {})", task.url, task.depth);

        let html = match self.renderer.render(&task.url).await {
            Ok(html) if !html.trim().is_empty() => html,
            Ok(_) => {
                tracing::debug!("Dropping {}: empty page", task.url);
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Dropping {}: {}", task.url, e);
                return Ok(None);
            }
        };

        let page = analyze_page(&html, &self.builder);

        let transcript = match video_id(&task.url) {
            Some(id) if is_video_page(&task.url) => self.transcripts.fetch(&id).await,
            _ => None,
        };

        let mut document_tree = page.outline;
        let mut rewritten = false;
        if policy.use_rewrite && !document_tree.is_empty() {
            if let Some(summarizer) = &self.summarizer {
                document_tree = summarizer.rewrite(&document_tree).await.map_err(|source| {
                    OutlineError::Rewrite {
                        url: task.url.clone(),
                        source,
                    }
                })?;
                rewritten = true;
            }
        }

        if document_tree.is_empty() {
            tracing::debug!("Dropping {}: no structured content", task.url);
            return Ok(None);
        }

        self.frontier.mark_visited(&task.url);

        let child_urls = match Url::parse(&task.url) {
            Ok(base) => self.enqueue_links(&page.links, &base, task.depth + 1),
            Err(e) => {
                tracing::warn!("Not following links of {}: {}", task.url, e);
                Vec::new()
            }
        };

        Ok(Some(CrawlResult {
            page_url: task.url.clone(),
            document_tree,
            rewritten,
            meta_info: page.meta,
            transcript,
            image_urls: page.images,
            child_urls,
            depth: task.depth,
            fetched_at: Utc::now(),
        }))
    }

    /// Resolves raw links and queues the unvisited ones at `depth`
    ///
    /// Returns every resolved link that had not been visited, in page order.
    fn enqueue_links(&mut self, links: &[String], base: &Url, depth: u32) -> Vec<String> {
        let mut child_urls = Vec::new();

        for link in links {
            let Some(absolute) = resolve_link(link, base) else {
                continue;
            };

            if self.frontier.is_visited(&absolute) {
                continue;
            }

            self.frontier.push(CrawlTask::new(absolute.clone(), depth));
            child_urls.push(absolute);
        }

        child_urls
    }
}
