//! Page outline extraction
//!
//! This module turns a parsed page into a forest of [`DocumentNode`]s:
//! - `builder`: the heading-stack traversal
//! - `cleaner`: normalization applied to every extracted string
//! - `node`: the section type, its construction arena and plain-text rendering

mod builder;
mod cleaner;
mod node;

pub use builder::{build_outline, DocumentTreeBuilder, OutlineOptions};
pub use cleaner::clean_text;
pub use node::{flatten_outline, DocumentNode};
