//! Integration tests for the crawler
//!
//! Most tests drive the controller with an in-memory renderer so the crawl
//! order is fully deterministic; the HTTP tests use wiremock to run the full
//! fetch, outline and link cycle end-to-end.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use sumi_outline::config::{parse_config, DepthPolicy, PageLimitScope, TranscriptConfig};
use sumi_outline::crawler::{CrawlController, CrawlPolicy, Renderer};
use sumi_outline::outline::DocumentNode;
use sumi_outline::summarizer::{Summarizer, SummarizerError};
use sumi_outline::transcript::TimedTextFetcher;
use sumi_outline::{build_outline, FetchError, OutlineError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renderer serving pages from a map and recording every request
#[derive(Default)]
struct MapRenderer {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MapRenderer {
    fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Renderer for MapRenderer {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Summarizer that fails on any outline titled "Boom"
struct TripwireSummarizer;

#[async_trait]
impl Summarizer for TripwireSummarizer {
    async fn rewrite(&self, outline: &[DocumentNode]) -> Result<Vec<DocumentNode>, SummarizerError> {
        if outline.iter().any(|node| node.title == "Boom") {
            return Err(SummarizerError::Status(503));
        }
        Ok(outline.to_vec())
    }
}

/// A page with one heading, one paragraph and the given links, without
/// inter-element whitespace
fn page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!("<h1>{}</h1><p>About {}</p>{}", title, title, anchors)
}

fn seeds(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

fn page_urls(results: &[sumi_outline::CrawlResult]) -> Vec<&str> {
    results.iter().map(|r| r.page_url.as_str()).collect()
}

#[tokio::test]
async fn test_end_to_end_example() {
    let renderer = Arc::new(
        MapRenderer::default()
            .page(
                "https://example.test/",
                r#"<h1>Example</h1><p>Hello world</p><a href="/about">About</a>"#,
            )
            .page("https://example.test/about", &page("About us", &[])),
    );
    let mut controller = CrawlController::new(renderer);

    let runs = controller
        .run(&seeds(&["https://example.test/"]), &CrawlPolicy::new(1, 2, false))
        .await
        .unwrap();

    assert_eq!(runs.len(), 1);
    let run = &runs[0];
    assert_eq!(run.base_url, "https://example.test/");
    assert_eq!(run.results.len(), 2);

    let first = &run.results[0];
    let mut expected = DocumentNode::new(1, "Example");
    expected.content.push("Hello world".to_string());
    assert_eq!(first.document_tree, vec![expected]);
    assert_eq!(first.child_urls, vec!["https://example.test/about"]);
    assert_eq!(first.depth, 0);

    let second = &run.results[1];
    assert_eq!(second.page_url, "https://example.test/about");
    assert_eq!(second.depth, 1);
    assert_eq!(second.document_tree[0].title, "About us");
}

#[tokio::test]
async fn test_max_depth_zero_processes_only_seed() {
    let renderer = Arc::new(
        MapRenderer::default()
            .page("https://a.test/", &page("Home", &["/one", "/two", "/three"]))
            .page("https://a.test/one", &page("One", &[]))
            .page("https://a.test/two", &page("Two", &[]))
            .page("https://a.test/three", &page("Three", &[])),
    );
    let mut controller = CrawlController::new(renderer.clone());

    let runs = controller
        .run(&seeds(&["https://a.test/"]), &CrawlPolicy::new(0, 100, false))
        .await
        .unwrap();

    assert_eq!(page_urls(&runs[0].results), vec!["https://a.test/"]);
    assert_eq!(
        runs[0].results[0].child_urls,
        vec!["https://a.test/one", "https://a.test/two", "https://a.test/three"]
    );
    assert_eq!(renderer.requests(), vec!["https://a.test/"]);
}

#[tokio::test]
async fn test_visited_set_persists_across_seeds() {
    let renderer = Arc::new(
        MapRenderer::default()
            .page("https://a.test/", &page("A", &["/shared"]))
            .page("https://a.test/shared", &page("Shared", &[]))
            .page("https://b.test/", &page("B", &["https://a.test/shared", "/own"]))
            .page("https://b.test/own", &page("Own", &[])),
    );
    let mut controller = CrawlController::new(renderer.clone());

    let runs = controller
        .run(
            &seeds(&["https://a.test/", "https://b.test/"]),
            &CrawlPolicy::new(1, 100, false),
        )
        .await
        .unwrap();

    assert_eq!(runs.len(), 2);
    assert_eq!(
        page_urls(&runs[0].results),
        vec!["https://a.test/", "https://a.test/shared"]
    );
    assert_eq!(
        page_urls(&runs[1].results),
        vec!["https://b.test/", "https://b.test/own"]
    );
    assert_eq!(runs[1].results[0].child_urls, vec!["https://b.test/own"]);

    let shared_requests = renderer
        .requests()
        .iter()
        .filter(|url| url.as_str() == "https://a.test/shared")
        .count();
    assert_eq!(shared_requests, 1);
}

#[tokio::test]
async fn test_max_pages_one_leaves_frontier() {
    let renderer = Arc::new(MapRenderer::default().page(
        "https://a.test/",
        &page("Home", &["/1", "/2", "/3", "/4", "/5"]),
    ));
    let mut controller = CrawlController::new(renderer);

    let runs = controller
        .run(&seeds(&["https://a.test/"]), &CrawlPolicy::new(3, 1, false))
        .await
        .unwrap();

    assert_eq!(runs[0].results.len(), 1);
    assert!(!controller.frontier().is_empty());
    assert_eq!(controller.pending().count(), 5);
    assert!(controller.pending().all(|task| task.depth == 1));
}

#[tokio::test]
async fn test_depth_policy_terminate_discards_queue() {
    let site = || {
        Arc::new(
            MapRenderer::default()
                .page("https://a.test/", &page("Home", &["/x", "/y"]))
                .page("https://a.test/x", &page("X", &[]))
                .page("https://a.test/y", &page("Y", &[])),
        )
    };

    let terminate_renderer = site();
    let mut terminate = CrawlController::new(terminate_renderer.clone());
    let runs = terminate
        .run(&seeds(&["https://a.test/"]), &CrawlPolicy::new(0, 100, false))
        .await
        .unwrap();
    assert_eq!(runs[0].results.len(), 1);
    // Ending the drain discards the over-deep task and its queued sibling
    assert_eq!(terminate.pending().count(), 0);

    let skip_renderer = site();
    let mut skip = CrawlController::new(skip_renderer.clone());
    let policy = CrawlPolicy::new(0, 100, false).with_depth_policy(DepthPolicy::Skip);
    let runs = skip
        .run(&seeds(&["https://a.test/"]), &policy)
        .await
        .unwrap();
    assert_eq!(runs[0].results.len(), 1);
    assert_eq!(skip.pending().count(), 0);

    assert_eq!(terminate_renderer.requests(), skip_renderer.requests());
}

#[tokio::test]
async fn test_page_limit_scope() {
    let site = || {
        Arc::new(
            MapRenderer::default()
                .page("https://a.test/", &page("A", &["/next"]))
                .page("https://a.test/next", &page("A next", &[]))
                .page("https://b.test/", &page("B", &["/next"]))
                .page("https://b.test/next", &page("B next", &[])),
        )
    };
    let both = seeds(&["https://a.test/", "https://b.test/"]);

    let mut run_scoped = CrawlController::new(site());
    let runs = run_scoped
        .run(&both, &CrawlPolicy::new(1, 1, false))
        .await
        .unwrap();
    assert_eq!(runs[0].results.len(), 1);
    assert!(runs[1].results.is_empty());

    let mut seed_scoped = CrawlController::new(site());
    let policy = CrawlPolicy::new(1, 1, false).with_page_limit_scope(PageLimitScope::Seed);
    let runs = seed_scoped.run(&both, &policy).await.unwrap();
    assert_eq!(page_urls(&runs[0].results), vec!["https://a.test/"]);
    assert_eq!(page_urls(&runs[1].results), vec!["https://b.test/"]);
}

#[tokio::test]
async fn test_failed_render_is_dropped() {
    let renderer = Arc::new(
        MapRenderer::default()
            .page("https://a.test/", &page("Home", &["/missing", "/ok"]))
            .page("https://a.test/ok", &page("Ok", &["/missing"])),
    );
    let mut controller = CrawlController::new(renderer.clone());

    let runs = controller
        .run(&seeds(&["https://a.test/"]), &CrawlPolicy::new(5, 100, false))
        .await
        .unwrap();

    assert_eq!(
        page_urls(&runs[0].results),
        vec!["https://a.test/", "https://a.test/ok"]
    );
    assert!(!controller.visited().contains("https://a.test/missing"));
    // Dropped tasks are not retried within the seed
    let attempts = renderer
        .requests()
        .iter()
        .filter(|url| url.ends_with("/missing"))
        .count();
    assert_eq!(attempts, 1);
}

#[tokio::test]
async fn test_rewrite_failure_aborts_run_with_completed_results() {
    let renderer = Arc::new(
        MapRenderer::default()
            .page("https://a.test/", &page("Fine", &[]))
            .page("https://b.test/", &page("Boom", &[]))
            .page("https://c.test/", &page("Never", &[])),
    );
    let mut controller =
        CrawlController::new(renderer.clone()).with_summarizer(Arc::new(TripwireSummarizer));

    let aborted = controller
        .run(
            &seeds(&["https://a.test/", "https://b.test/", "https://c.test/"]),
            &CrawlPolicy::new(0, 100, true),
        )
        .await
        .unwrap_err();

    assert_eq!(aborted.completed.len(), 1);
    assert_eq!(aborted.completed[0].base_url, "https://a.test/");
    assert!(aborted.completed[0].results[0].rewritten);

    let partial = aborted.partial.as_ref().unwrap();
    assert_eq!(partial.base_url, "https://b.test/");
    assert!(partial.results.is_empty());

    match &aborted.source {
        OutlineError::Rewrite { url, source } => {
            assert_eq!(url, "https://b.test/");
            assert!(matches!(source, SummarizerError::Status(503)));
        }
        other => panic!("expected a rewrite failure, got {:?}", other),
    }

    assert!(!renderer.requests().contains(&"https://c.test/".to_string()));
}

#[tokio::test]
async fn test_transcript_attached_to_video_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/timedtext"))
        .and(query_param("v", "TitZV6k8zfA"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<transcript><text start="0" dur="1">Hello</text><text start="1" dur="1">viewers</text></transcript>"#,
        ))
        .mount(&server)
        .await;

    let watch = "https://www.youtube.com/watch?v=TitZV6k8zfA";
    let renderer = Arc::new(
        MapRenderer::default()
            .page(
                "https://a.test/",
                r#"<h1>Home</h1><p>Our video</p><iframe src="https://www.youtube.com/embed/TitZV6k8zfA?autoplay=1"></iframe>"#,
            )
            .page(watch, &page("Video", &[])),
    );
    let transcripts = TimedTextFetcher::new(
        reqwest::Client::new(),
        &TranscriptConfig {
            enabled: true,
            base_url: format!("{}/api/timedtext", server.uri()),
            language: "en".to_string(),
        },
    );
    let mut controller = CrawlController::new(renderer).with_transcripts(Arc::new(transcripts));

    let runs = controller
        .run(&seeds(&["https://a.test/"]), &CrawlPolicy::new(1, 10, false))
        .await
        .unwrap();

    let results = &runs[0].results;
    assert_eq!(page_urls(results), vec!["https://a.test/", watch]);
    assert_eq!(results[0].transcript, None);
    assert_eq!(results[1].transcript.as_deref(), Some("Hello viewers"));
}

#[test]
fn test_outline_shape_and_dedup() {
    let document = scraper::Html::parse_document(
        "<h1>One</h1><p>intro</p><h2>A</h2><p>same</p><div>same</div><h2>B</h2><h1>Two</h1>",
    );

    let outline = build_outline(&document);

    assert_eq!(outline.len(), 2);
    assert_eq!(outline[0].title, "One");
    assert_eq!(outline[0].children.len(), 2);
    assert_eq!(outline[0].children[0].content, vec!["same"]);
    assert_eq!(outline[1].title, "Two");
    assert!(outline[1].children.is_empty());
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(
                    r#"<h1>Example</h1><p>Hello world</p><a href="/about">About</a><a href="/report.pdf">Report</a><img src="http://cdn.test/logo.png"><img src="/local.png">"#,
                    "text/html",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page("About", &["/"]), "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("%PDF-1.4", "application/pdf"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = parse_config(&format!(
        r#"
        seeds = ["{base_url}/"]

        [crawler]
        max-depth = 1
        max-pages = 10

        [renderer]
        timeout-secs = 5
        settle-delay-ms = 0
        user-agents = ["IntegrationTest/1.0"]

        [transcripts]
        enabled = false
        "#
    ))
    .unwrap();

    let mut controller = CrawlController::from_config(&config).unwrap();
    let runs = controller
        .run(&config.seeds, &CrawlPolicy::from(&config.crawler))
        .await
        .unwrap();

    let results = &runs[0].results;
    assert_eq!(
        page_urls(results),
        vec![format!("{}/", base_url), format!("{}/about", base_url)]
    );
    assert_eq!(results[0].document_tree[0].content, vec!["Hello world"]);
    assert_eq!(results[0].image_urls, vec!["http://cdn.test/logo.png"]);
    assert_eq!(
        results[0].child_urls,
        vec![format!("{}/about", base_url), format!("{}/report.pdf", base_url)]
    );
    // The about page links back to the already-visited root
    assert!(results[1].child_urls.is_empty());
    assert!(!controller.visited().contains(&format!("{}/report.pdf", base_url)));
}
