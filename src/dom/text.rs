use super::search::{find_all, is_text};
use super::{Document, NodeId};

/// All text below `id` in document order, joined by single spaces with
/// whitespace collapsed and trimmed.
pub fn text(doc: &Document, id: NodeId) -> String {
    let parts: Vec<&str> = find_all(doc, id, is_text)
        .into_iter()
        .filter_map(|t| doc.node(t).text())
        .flat_map(str::split_whitespace)
        .collect();
    parts.join(" ")
}
