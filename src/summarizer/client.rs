use crate::config::SummarizerConfig;
use crate::outline::{flatten_outline, DocumentNode};
use crate::summarizer::{Summarizer, SummarizerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for the interaction-output endpoint of the rewriting service
///
/// The service takes a prompt and a model name and answers with
/// `{"results": "<text>"}`, where the text is the JSON outline the prompt
/// asks for.
#[derive(Debug, Clone)]
pub struct InteractionSummarizer {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct InteractionRequest<'a> {
    parameters: InteractionParameters<'a>,
}

#[derive(Serialize)]
struct InteractionParameters<'a> {
    prompt: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct InteractionResponse {
    results: String,
}

/// A section as written back by the model
#[derive(Deserialize)]
struct RewrittenSection {
    #[serde(default = "default_level")]
    level: u8,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: Option<SectionContent>,
    #[serde(default)]
    children: Vec<RewrittenSection>,
}

/// The model is asked for a string but sometimes answers with a list
#[derive(Deserialize)]
#[serde(untagged)]
enum SectionContent {
    Text(String),
    Lines(Vec<String>),
}

fn default_level() -> u8 {
    1
}

impl RewrittenSection {
    /// Converts to an outline node; sections with nothing in them are dropped
    fn into_node(self) -> Option<DocumentNode> {
        let content: Vec<String> = match self.content {
            Some(SectionContent::Text(text)) => vec![text],
            Some(SectionContent::Lines(lines)) => lines,
            None => Vec::new(),
        }
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

        let children: Vec<DocumentNode> = self
            .children
            .into_iter()
            .filter_map(RewrittenSection::into_node)
            .collect();

        let title = self.title.trim().to_string();
        if title.is_empty() && content.is_empty() && children.is_empty() {
            return None;
        }

        Some(DocumentNode {
            level: self.level.clamp(1, 6),
            title,
            content,
            children,
        })
    }
}

impl InteractionSummarizer {
    pub fn new(client: Client, config: &SummarizerConfig) -> Self {
        Self {
            client,
            endpoint: format!(
                "http://{}:{}/api/v1/get-interaction-output/",
                config.host, config.port
            ),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl Summarizer for InteractionSummarizer {
    async fn rewrite(&self, outline: &[DocumentNode]) -> Result<Vec<DocumentNode>, SummarizerError> {
        let prompt = build_prompt(&flatten_outline(outline));
        let request = InteractionRequest {
            parameters: InteractionParameters {
                prompt: &prompt,
                model: &self.model,
            },
        };

        tracing::debug!("Requesting rewrite of {} sections", outline.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SummarizerError::Status(response.status().as_u16()));
        }

        let body: InteractionResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::MalformedResponse(e.to_string()))?;

        parse_sections(&body.results)
    }
}

/// Parses the JSON outline embedded in the service's `results` string
fn parse_sections(results: &str) -> Result<Vec<DocumentNode>, SummarizerError> {
    let sections: Vec<RewrittenSection> = serde_json::from_str(results.trim())
        .map_err(|e| SummarizerError::MalformedResponse(e.to_string()))?;

    Ok(sections
        .into_iter()
        .filter_map(RewrittenSection::into_node)
        .collect())
}

/// Builds the rewriting prompt around the flattened page text
pub fn build_prompt(page_text: &str) -> String {
    format!(
        r#"Below is text scraped from a website. It will be split into sentences and
vectorized, so it must describe the company or product clearly. The text is
only partly structured. Remove noise, rephrase unclear sentences, and keep only
sentences or paragraphs that help someone understand the company or product.
Prefer quality over quantity.

Text:
{page_text}

Reply with only a JSON list of sections shaped like this:

[
    {{
        "level": 1,
        "title": "Main Title",
        "content": "There are many services available.",
        "children": [
            {{
                "level": 2,
                "title": "Service-1",
                "content": "This is the first service.",
                "children": []
            }}
        ]
    }}
]
"#
    )
}
