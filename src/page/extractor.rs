//! Link, image and SEO metadata extraction
//!
//! Values are returned raw, in document order; resolving links against the
//! page URL is left to the caller.

use crate::url::embed_to_watch;
use scraper::{Html, Selector};

/// Extracts link targets from the document
///
/// # Link Extraction Rules
///
/// - every `<a href="...">` value, unchanged
/// - `<iframe src="...">` values that embed a video player, rewritten to the
///   video's watch page URL
///
/// Anchors come first, then embedded videos.
pub fn extract_links(document: &Html) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    if let Ok(iframe_selector) = Selector::parse("iframe[src]") {
        for element in document.select(&iframe_selector) {
            if let Some(watch_url) = element.value().attr("src").and_then(embed_to_watch) {
                links.push(watch_url);
            }
        }
    }

    links
}

/// Extracts absolute image URLs from `<img src="...">` tags
///
/// Relative and data URIs are skipped.
pub fn extract_images(document: &Html) -> Vec<String> {
    let Ok(img_selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    document
        .select(&img_selector)
        .filter_map(|element| element.value().attr("src"))
        .filter(|src| src.starts_with("http"))
        .map(str::to_string)
        .collect()
}

/// Extracts the `content` of description and keywords `<meta>` tags
///
/// The `name` attribute is matched case-insensitively; a missing `content`
/// attribute yields an empty string.
pub fn extract_meta(document: &Html) -> Vec<String> {
    let Ok(meta_selector) = Selector::parse("meta[name]") else {
        return Vec::new();
    };

    document
        .select(&meta_selector)
        .filter(|element| {
            let name = element.value().attr("name").unwrap_or("").to_lowercase();
            name == "description" || name == "keywords"
        })
        .map(|element| element.value().attr("content").unwrap_or("").to_string())
        .collect()
}
