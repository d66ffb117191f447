//! Sumi-Outline main entry point
//!
//! This is the command-line interface for the Sumi-Outline structured-page
//! crawler.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use sumi_outline::config::{load_config_with_hash, validate, Config};
use sumi_outline::crawler::{CrawlController, CrawlPolicy};
use sumi_outline::output::{print_statistics, render_json, write_json, CrawlStatistics};
use tracing_subscriber::EnvFilter;

/// Sumi-Outline: a structured-page crawler
///
/// Sumi-Outline crawls websites breadth-first from seed URLs and turns every
/// page into an outline of titled sections, optionally rewritten by a
/// language-model service. Results are printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "sumi-outline")]
#[command(version = "1.0.0")]
#[command(about = "A structured-page crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Extra seed URL, crawled after the configured seeds (repeatable)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Override the configured maximum link depth
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// Override the configured maximum number of pages
    #[arg(long, value_name = "PAGES")]
    max_pages: Option<u32>,

    /// Rewrite outlines through the configured summarizer
    #[arg(long)]
    rewrite: bool,

    /// Write JSON results to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print crawl statistics to stderr when done
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration after command-line overrides")?;

    if config.seeds.is_empty() {
        anyhow::bail!("no seed URLs: add `seeds` to the config or pass --seed");
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the JSON results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_outline=info,warn"),
            1 => EnvFilter::new("sumi_outline=debug,info"),
            2 => EnvFilter::new("sumi_outline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Folds command-line seeds and policy overrides into the loaded config
fn apply_overrides(config: &mut Config, cli: &Cli) {
    config.seeds.extend(cli.seeds.iter().cloned());

    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if cli.rewrite {
        config.crawler.use_rewrite = true;
    }
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Outline Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Depth policy: {:?}", config.crawler.depth_policy);
    println!("  Page limit scope: {:?}", config.crawler.page_limit_scope);
    println!("  Rewrite outlines: {}", config.crawler.use_rewrite);
    println!("  Capture link text: {}", config.crawler.capture_link_text);

    println!("\nRenderer:");
    println!("  Timeout: {}s", config.renderer.timeout_secs);
    println!("  Settle delay: {}ms", config.renderer.settle_delay_ms);
    println!("  User agents: {}", config.renderer.user_agents.len());

    if let Some(summarizer) = &config.summarizer {
        println!("\nSummarizer:");
        println!("  Endpoint: {}:{}", summarizer.host, summarizer.port);
        println!("  Model: {}", summarizer.model);
    }

    println!("\nTranscripts:");
    if config.transcripts.enabled {
        println!("  Source: {}", config.transcripts.base_url);
        println!("  Language: {}", config.transcripts.language);
    } else {
        println!("  Disabled");
    }

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, cli: &Cli) -> Result<()> {
    tracing::info!("Total seed URLs: {}", config.seeds.len());

    let mut controller =
        CrawlController::from_config(config).context("failed to set up the crawler")?;
    let policy = CrawlPolicy::from(&config.crawler);

    let runs = match controller.run(&config.seeds, &policy).await {
        Ok(runs) => runs,
        Err(aborted) => {
            // Keep what finished before the failure
            let mut runs = aborted.completed;
            runs.extend(aborted.partial);
            emit(&runs, cli)?;
            return Err(anyhow::Error::new(aborted.source).context("crawl aborted"));
        }
    };

    tracing::info!(
        "Crawl completed: {} page(s), {} URL(s) left in frontier",
        controller.visited().len(),
        controller.frontier().len()
    );

    emit(&runs, cli)
}

/// Writes results to the output file or stdout, plus statistics if asked
fn emit(runs: &[sumi_outline::RunResult], cli: &Cli) -> Result<()> {
    match &cli.output {
        Some(path) => write_json(runs, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", render_json(runs)?),
    }

    if cli.stats {
        print_statistics(&CrawlStatistics::from_runs(runs));
    }

    Ok(())
}
