//! URL handling module for Sumi-Outline
//!
//! This module resolves raw `href`/`src` values against the page that
//! referenced them and recognizes video page URLs.

use url::Url;

/// Prefix of embedded video player URLs found in iframes
pub const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

/// Prefix of canonical video watch pages
pub const WATCH_PREFIX: &str = "https://www.youtube.com/watch";

/// Length of a video identifier
const VIDEO_ID_LEN: usize = 11;

/// Resolves a link found on `base` to an absolute URL
///
/// Relative references are joined onto the page URL; absolute ones are
/// re-serialized as-is. Returns `None` for links that cannot be resolved.
///
/// # Examples
///
/// ```
/// use sumi_outline::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.test/docs/intro").unwrap();
/// assert_eq!(resolve_link("/about", &base).as_deref(), Some("https://example.test/about"));
/// assert_eq!(resolve_link("next", &base).as_deref(), Some("https://example.test/docs/next"));
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    match base.join(href) {
        Ok(absolute) => Some(absolute.to_string()),
        Err(e) => {
            tracing::debug!("Dropping unresolvable link {:?} on {}: {}", href, base, e);
            None
        }
    }
}

/// Rewrites an embedded player URL into its watch page URL
///
/// Returns `None` when `src` is not an embed URL.
pub fn embed_to_watch(src: &str) -> Option<String> {
    let rest = src.strip_prefix(EMBED_PREFIX)?;
    let video_id: String = rest.chars().take(VIDEO_ID_LEN).collect();
    Some(format!("{}?v={}", WATCH_PREFIX, video_id))
}

/// Returns true if `url` is a video watch page
pub fn is_video_page(url: &str) -> bool {
    url.starts_with(WATCH_PREFIX)
}

/// Extracts the video identifier (`v` query parameter) from a video page URL
pub fn video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !parsed.host_str()?.contains("youtube") {
        return None;
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
}
