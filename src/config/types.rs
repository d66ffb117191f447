use serde::Deserialize;

/// User agents rotated by the HTTP renderer when none are configured
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
];

/// Main configuration structure for Sumi-Outline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Seed URLs, crawled in order
    #[serde(default)]
    pub seeds: Vec<String>,

    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub renderer: RendererConfig,

    /// Required only when `crawler.use-rewrite` is set
    #[serde(default)]
    pub summarizer: Option<SummarizerConfig>,

    #[serde(default)]
    pub transcripts: TranscriptConfig,
}

/// What happens when a dequeued task is deeper than `max-depth`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthPolicy {
    /// Stop draining the current seed's frontier altogether
    #[default]
    Terminate,
    /// Drop only the offending task and keep draining
    Skip,
}

/// Scope of the `max-pages` counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLimitScope {
    /// One counter shared by every seed of a controller
    #[default]
    Run,
    /// The counter restarts at zero for each seed
    Seed,
}

/// Crawl policy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link depth from a seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages that produce a result
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Pass every outline through the summarizer
    #[serde(rename = "use-rewrite", default)]
    pub use_rewrite: bool,

    #[serde(rename = "depth-policy", default)]
    pub depth_policy: DepthPolicy,

    #[serde(rename = "page-limit-scope", default)]
    pub page_limit_scope: PageLimitScope,

    /// Treat text of standalone links as section content
    #[serde(rename = "capture-link-text", default)]
    pub capture_link_text: bool,
}

/// HTTP renderer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time to wait after a page has loaded (milliseconds)
    #[serde(rename = "settle-delay-ms", default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Pool of user agent strings, one picked at random per request
    #[serde(rename = "user-agents", default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            settle_delay_ms: default_settle_delay_ms(),
            user_agents: default_user_agents(),
        }
    }
}

/// Remote summarizer endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    pub host: String,

    pub port: u16,

    #[serde(rename = "api-key")]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,
}

/// Video transcript configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Timed-text endpoint queried with `v` and `lang` parameters
    #[serde(rename = "base-url", default = "default_transcript_url")]
    pub base_url: String,

    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_transcript_url(),
            language: default_language(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_settle_delay_ms() -> u64 {
    5000
}

fn default_user_agents() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_true() -> bool {
    true
}

fn default_transcript_url() -> String {
    "https://www.youtube.com/api/timedtext".to_string()
}

fn default_language() -> String {
    "en".to_string()
}
