//! Page rendering
//!
//! A [`Renderer`] turns a URL into the HTML the crawler should analyze. The
//! HTTP implementation picks a user agent at random for every request, checks
//! the status and Content-Type, and waits for a settle delay before handing
//! the body back, so pages behind slow upstreams get a chance to finish.

use crate::config::{RendererConfig, DEFAULT_USER_AGENTS};
use crate::FetchError;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Fetches the final HTML of a page
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds the HTTP client used for page requests
///
/// # Example
///
/// ```no_run
/// use sumi_outline::config::RendererConfig;
/// use sumi_outline::crawler::build_http_client;
///
/// let client = build_http_client(&RendererConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RendererConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer backed by plain HTTP GET requests
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
    user_agents: Vec<String>,
    settle_delay: Duration,
}

impl HttpRenderer {
    pub fn new(client: Client, config: &RendererConfig) -> Self {
        Self {
            client,
            user_agents: config.user_agents.clone(),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }

    fn pick_user_agent(&self) -> String {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| DEFAULT_USER_AGENTS[0].to_string())
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, url: &str) -> Result<String, FetchError> {
        let user_agent = self.pick_user_agent();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        if body.trim().is_empty() {
            return Err(FetchError::Empty {
                url: url.to_string(),
            });
        }

        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }

        Ok(body)
    }
}

fn classify_error(url: &str, source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source,
        }
    }
}
