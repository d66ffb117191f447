//! Outline rewriting through a remote language-model service
//!
//! A [`Summarizer`] receives the outline extracted from a page and returns a
//! cleaner outline of the same shape. Failures are surfaced to the crawler,
//! which treats them as fatal for the whole run.

mod client;

pub use client::{build_prompt, InteractionSummarizer};

use crate::outline::DocumentNode;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while rewriting an outline
#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Summarizer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarizer returned HTTP {0}")]
    Status(u16),

    #[error("Malformed summarizer response: {0}")]
    MalformedResponse(String),
}

/// Rewrites page outlines into higher-quality prose
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn rewrite(&self, outline: &[DocumentNode]) -> Result<Vec<DocumentNode>, SummarizerError>;
}
