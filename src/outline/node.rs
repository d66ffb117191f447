//! Outline sections and the arena they are assembled in

use serde::{Deserialize, Serialize};

/// One section of a page outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Heading rank, 1 through 6
    pub level: u8,

    /// Cleaned heading text
    pub title: String,

    /// Cleaned text fragments owned directly by this section, in page order
    #[serde(default)]
    pub content: Vec<String>,

    /// Subsections, each with a level greater than this one
    #[serde(default)]
    pub children: Vec<DocumentNode>,
}

impl DocumentNode {
    /// Creates an empty section
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            content: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Total number of sections in this subtree, including this one
    pub fn section_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DocumentNode::section_count)
            .sum::<usize>()
    }
}

/// A section while the outline is still being assembled
#[derive(Debug)]
struct Section {
    level: u8,
    title: String,
    content: Vec<String>,
    children: Vec<usize>,
}

/// Index-addressed storage for sections under construction
///
/// Sections are owned by the arena; parents refer to children by index, and
/// the builder's stack of open sections is a stack of indices into it.
#[derive(Debug, Default)]
pub(crate) struct OutlineArena {
    sections: Vec<Section>,
    roots: Vec<usize>,
}

impl OutlineArena {
    /// Adds a section under `parent`, or at the top level when there is none
    pub(crate) fn open(&mut self, parent: Option<usize>, level: u8, title: String) -> usize {
        let index = self.sections.len();
        self.sections.push(Section {
            level,
            title,
            content: Vec::new(),
            children: Vec::new(),
        });

        match parent {
            Some(parent) => self.sections[parent].children.push(index),
            None => self.roots.push(index),
        }

        index
    }

    pub(crate) fn level(&self, index: usize) -> u8 {
        self.sections[index].level
    }

    /// Appends a fragment unless the section already holds it
    ///
    /// Returns true when the fragment was added.
    pub(crate) fn push_content(&mut self, index: usize, text: String) -> bool {
        let content = &mut self.sections[index].content;
        if content.contains(&text) {
            return false;
        }
        content.push(text);
        true
    }

    /// Converts the arena into an owned forest
    pub(crate) fn into_forest(self) -> Vec<DocumentNode> {
        let mut slots: Vec<Option<Section>> = self.sections.into_iter().map(Some).collect();
        self.roots
            .iter()
            .filter_map(|&root| take_node(&mut slots, root))
            .collect()
    }
}

fn take_node(slots: &mut [Option<Section>], index: usize) -> Option<DocumentNode> {
    let section = slots.get_mut(index)?.take()?;
    let children = section
        .children
        .iter()
        .filter_map(|&child| take_node(slots, child))
        .collect();

    Some(DocumentNode {
        level: section.level,
        title: section.title,
        content: section.content,
        children,
    })
}

/// Renders an outline as plain text
///
/// Each section contributes its title line followed by one line per content
/// fragment, then its children. Top-level sections are separated by a blank
/// line.
pub fn flatten_outline(outline: &[DocumentNode]) -> String {
    fn write_node(node: &DocumentNode, out: &mut String) {
        out.push_str(&node.title);
        out.push('\n');
        out.push_str(&node.content.join("\n"));
        out.push('\n');
        for child in &node.children {
            write_node(child, out);
        }
    }

    let mut out = String::new();
    for node in outline {
        write_node(node, &mut out);
        out.push('\n');
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_builds_nested_forest() {
        let mut arena = OutlineArena::default();
        let intro = arena.open(None, 1, "Intro".to_string());
        let detail = arena.open(Some(intro), 2, "Detail".to_string());
        arena.push_content(detail, "fine print".to_string());
        arena.open(None, 1, "Outro".to_string());

        let forest = arena.into_forest();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].content, vec!["fine print"]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_push_content_rejects_duplicates() {
        let mut arena = OutlineArena::default();
        let index = arena.open(None, 1, "Title".to_string());

        assert!(arena.push_content(index, "same".to_string()));
        assert!(!arena.push_content(index, "same".to_string()));
        assert!(arena.push_content(index, "other".to_string()));

        let forest = arena.into_forest();
        assert_eq!(forest[0].content, vec!["same", "other"]);
    }

    #[test]
    fn test_flatten_outline() {
        let mut root = DocumentNode::new(1, "Company");
        root.content.push("We make widgets.".to_string());
        let mut child = DocumentNode::new(2, "Widgets");
        child.content.push("Round ones.".to_string());
        child.content.push("Square ones.".to_string());
        root.children.push(child);
        let second = DocumentNode::new(1, "Contact");

        let text = flatten_outline(&[root, second]);
        assert_eq!(
            text,
            "Company\nWe make widgets.\nWidgets\nRound ones.\nSquare ones.\n\nContact"
        );
    }

    #[test]
    fn test_flatten_empty_outline() {
        assert_eq!(flatten_outline(&[]), "");
    }

    #[test]
    fn test_section_count() {
        let mut root = DocumentNode::new(1, "a");
        let mut child = DocumentNode::new(2, "b");
        child.children.push(DocumentNode::new(3, "c"));
        root.children.push(child);
        assert_eq!(root.section_count(), 3);
    }

    #[test]
    fn test_serialized_shape() {
        let node = DocumentNode::new(2, "Heading");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"level": 2, "title": "Heading", "content": [], "children": []})
        );
    }
}
