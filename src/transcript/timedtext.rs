use crate::config::TranscriptConfig;
use crate::transcript::TranscriptFetcher;
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

/// Fetches captions from a timed-text XML endpoint
///
/// The endpoint is queried as `GET {base_url}?v={video_id}&lang={language}`
/// and answers with a document of `<text start=".." dur="..">` entries.
#[derive(Debug, Clone)]
pub struct TimedTextFetcher {
    client: Client,
    base_url: String,
    language: String,
}

impl TimedTextFetcher {
    pub fn new(client: Client, config: &TranscriptConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            language: config.language.clone(),
        }
    }
}

#[async_trait]
impl TranscriptFetcher for TimedTextFetcher {
    async fn fetch(&self, video_id: &str) -> Option<String> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("v", video_id), ("lang", self.language.as_str())])
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::debug!(
                    "No transcript for {}: HTTP {}",
                    video_id,
                    response.status().as_u16()
                );
                return None;
            }
            Err(e) => {
                tracing::debug!("Transcript request for {} failed: {}", video_id, e);
                return None;
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Failed to read transcript for {}: {}", video_id, e);
                return None;
            }
        };

        parse_timed_text(&body)
    }
}

/// Joins the `<text>` entries of a timed-text document with single spaces
///
/// Returns `None` when the document holds no non-blank entries.
pub fn parse_timed_text(document: &str) -> Option<String> {
    let Ok(text_selector) = Selector::parse("text") else {
        return None;
    };

    let fragment = Html::parse_fragment(document);
    let lines: Vec<String> = fragment
        .select(&text_selector)
        .map(|entry| entry.text().collect::<String>().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
