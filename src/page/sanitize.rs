use scraper::{Html, Node};

/// Elements removed before any extraction
const UNWANTED_TAGS: &[&str] = &["style", "script", "svg", "nav", "form", "br"];

/// Elements carrying one of these classes are removed as well
const UNWANTED_CLASSES: &[&str] = &["ad", "popup"];

/// Detaches comments, scripts, styling, navigation, forms, line breaks and
/// ad/popup containers from the document
pub fn strip_unwanted(document: &mut Html) {
    let doomed: Vec<_> = document
        .tree
        .root()
        .descendants()
        .filter(|node| match node.value() {
            Node::Comment(_) => true,
            Node::Element(element) => {
                UNWANTED_TAGS.contains(&element.name())
                    || element
                        .classes()
                        .any(|class| UNWANTED_CLASSES.contains(&class))
            }
            _ => false,
        })
        .map(|node| node.id())
        .collect();

    tracing::trace!("Stripping {} unwanted nodes", doomed.len());

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}
