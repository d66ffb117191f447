//! Video transcript retrieval
//!
//! When a crawled URL is a video watch page, the crawler asks a
//! [`TranscriptFetcher`] for the video's captions. Fetchers never fail: a
//! missing transcript, an unavailable video or a transport error all come
//! back as `None`.

mod timedtext;

pub use timedtext::{parse_timed_text, TimedTextFetcher};

use async_trait::async_trait;

/// Source of video captions
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Returns the transcript of `video_id` as a single string, if one exists
    async fn fetch(&self, video_id: &str) -> Option<String>;
}

/// Fetcher used when transcripts are disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranscripts;

#[async_trait]
impl TranscriptFetcher for NoTranscripts {
    async fn fetch(&self, _video_id: &str) -> Option<String> {
        None
    }
}
