//! Rendered page processing
//!
//! This module takes the HTML returned by a renderer and produces everything
//! the crawler records about a page:
//! - `sanitize`: removal of scripts, comments, navigation and ads
//! - `extractor`: raw links, image URLs and SEO meta strings
//!
//! The outline itself comes from [`crate::outline`].

mod extractor;
mod sanitize;

pub use extractor::{extract_images, extract_links, extract_meta};
pub use sanitize::strip_unwanted;

use crate::outline::{DocumentNode, DocumentTreeBuilder};
use scraper::Html;

/// Everything extracted from one rendered page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    /// Section outline of the sanitized page
    pub outline: Vec<DocumentNode>,

    /// Raw link targets, unresolved
    pub links: Vec<String>,

    /// Absolute image URLs
    pub images: Vec<String>,

    /// Description and keywords meta strings
    pub meta: Vec<String>,
}

/// Parses, sanitizes and extracts a rendered page
///
/// The parsed document never leaves this function, so callers can hold the
/// result across `.await` points.
pub fn analyze_page(html: &str, builder: &DocumentTreeBuilder) -> PageContent {
    let mut document = Html::parse_document(html);
    strip_unwanted(&mut document);

    PageContent {
        outline: builder.build(&document),
        links: extract_links(&document),
        images: extract_images(&document),
        meta: extract_meta(&document),
    }
}
