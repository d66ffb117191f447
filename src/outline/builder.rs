//! Heading-outline extraction
//!
//! HTML headings do not nest, so the outline is recovered from the flat,
//! document-ordered sequence of elements by keeping a stack of open sections
//! keyed by heading level. Every element is visited, including containers and
//! their children, so text picked up through a parent registers the child's
//! tag name in a skip-once queue to keep it from being captured twice.

use crate::outline::cleaner::clean_text;
use crate::outline::node::{DocumentNode, OutlineArena};
use scraper::{ElementRef, Html, Node};
use std::collections::VecDeque;

/// Knobs for outline extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Capture the text of anchor elements reached on their own
    ///
    /// Link labels picked up through a parent element are captured either way.
    pub capture_link_text: bool,
}

/// Builds section outlines from parsed pages
#[derive(Debug, Clone, Default)]
pub struct DocumentTreeBuilder {
    options: OutlineOptions,
}

impl DocumentTreeBuilder {
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Extracts the outline forest from a parsed document
    ///
    /// # Example
    ///
    /// ```
    /// use scraper::Html;
    /// use sumi_outline::outline::DocumentTreeBuilder;
    ///
    /// let html = Html::parse_document("<h1>Intro</h1><p>Hello world</p>");
    /// let outline = DocumentTreeBuilder::default().build(&html);
    /// assert_eq!(outline[0].title, "Intro");
    /// assert_eq!(outline[0].content, vec!["Hello world"]);
    /// ```
    pub fn build(&self, document: &Html) -> Vec<DocumentNode> {
        let mut traversal = Traversal::new(self.options);

        for node in document.tree.root().descendants() {
            if let Some(element) = ElementRef::wrap(node) {
                traversal.visit(element);
            }
        }

        traversal.finish()
    }
}

/// Extracts the outline of a document with default options
pub fn build_outline(document: &Html) -> Vec<DocumentNode> {
    DocumentTreeBuilder::default().build(document)
}

/// Per-call traversal state
struct Traversal<'a> {
    options: OutlineOptions,
    arena: OutlineArena,
    /// Open sections, levels strictly increasing from bottom to top
    stack: Vec<usize>,
    /// Tag names whose next direct visit must not capture text
    skip_once: VecDeque<String>,
    /// Element promoted to a level-1 heading because it preceded any heading
    synthetic_heading: Option<ElementRef<'a>>,
    heading_seen: bool,
}

impl<'a> Traversal<'a> {
    fn new(options: OutlineOptions) -> Self {
        Self {
            options,
            arena: OutlineArena::default(),
            stack: Vec::new(),
            skip_once: VecDeque::new(),
            synthetic_heading: None,
            heading_seen: false,
        }
    }

    fn visit(&mut self, element: ElementRef<'a>) {
        if !self.heading_seen {
            let has_text = own_string(element).map_or(false, |s| !s.trim().is_empty());
            if has_text {
                self.synthetic_heading = Some(element);
                self.open_section(1, element);
                return;
            }
        }

        if let Some(level) = heading_level(element.value().name()) {
            self.open_section(level, element);
            return;
        }

        if self.has_valuable_text(element) {
            self.capture(element);
        }
    }

    /// Closes every open section at `level` or deeper, then opens a new one
    fn open_section(&mut self, level: u8, element: ElementRef<'a>) {
        while let Some(&top) = self.stack.last() {
            if self.arena.level(top) < level {
                break;
            }
            self.stack.pop();
        }

        let title = clean_text(&element.text().collect::<String>());
        let parent = self.stack.last().copied();
        let index = self.arena.open(parent, level, title);
        self.stack.push(index);
        self.heading_seen = true;
    }

    fn has_valuable_text(&mut self, element: ElementRef<'a>) -> bool {
        let name = element.value().name();

        // A pending match consumes the oldest entry, not necessarily its own
        if self.skip_once.iter().any(|pending| pending == name) {
            self.skip_once.pop_front();
            return false;
        }

        if self.is_under_heading(element) {
            return false;
        }

        if !self.options.capture_link_text && name == "a" {
            return false;
        }

        element.children().any(|child| child.value().is_text())
    }

    fn is_under_heading(&self, element: ElementRef<'a>) -> bool {
        element.ancestors().any(|ancestor| {
            let promoted = self
                .synthetic_heading
                .map_or(false, |heading| heading.id() == ancestor.id());
            promoted
                || ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| heading_level(el.name()).is_some())
        })
    }

    /// Adds an element's direct text, and its children's own strings, to the
    /// innermost open section
    fn capture(&mut self, element: ElementRef<'a>) {
        let Some(&current) = self.stack.last() else {
            return;
        };

        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    let cleaned = clean_text(text);
                    if !cleaned.is_empty() {
                        self.arena.push_content(current, cleaned);
                    }
                }
                Node::Element(child_element) => {
                    let Some(raw) = ElementRef::wrap(child).and_then(own_string) else {
                        continue;
                    };
                    let cleaned = clean_text(raw);
                    if !cleaned.is_empty() && self.arena.push_content(current, cleaned) {
                        self.skip_once.push_back(child_element.name().to_string());
                    }
                }
                _ => {}
            }
        }
    }

    fn finish(self) -> Vec<DocumentNode> {
        self.arena.into_forest()
    }
}

/// Returns the rank of `h1`..`h6`
fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// The single string an element wraps
///
/// Defined only when the element has exactly one child and that child is
/// either a text node or an element that itself wraps a single string.
fn own_string<'a>(element: ElementRef<'a>) -> Option<&'a str> {
    let mut children = element.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }

    match only.value() {
        Node::Text(text) => Some(&**text),
        Node::Element(_) => ElementRef::wrap(only).and_then(own_string),
        _ => None,
    }
}
