//! Predicate driven tree search.
//!
//! Both [`find_first`] and [`find_all`] walk the subtree in preorder (a node
//! before its children, children in document order) using one shared walker.
//! A match never prunes its subtree: descendants of a matching node are still
//! tested on their own.

use super::{Document, Node, NodeId};

pub fn by_tag(tag: &str) -> impl Fn(&Node) -> bool + '_ {
    move |node| node.tag() == Some(tag)
}

pub fn by_attr<'a>(key: &'a str, value: &'a str) -> impl Fn(&Node) -> bool + 'a {
    move |node| node.tag().is_some() && node.attr(key) == value
}

pub fn is_text(node: &Node) -> bool {
    node.text().is_some()
}

/// First node under (and including) `root` that satisfies `pred`.
pub fn find_first<P>(doc: &Document, root: NodeId, pred: P) -> Option<NodeId>
where
    P: Fn(&Node) -> bool,
{
    let mut found = None;
    walk(doc, root, &pred, |id| {
        found = Some(id);
        false
    });
    found
}

/// Every node under (and including) `root` that satisfies `pred`.
pub fn find_all<P>(doc: &Document, root: NodeId, pred: P) -> Vec<NodeId>
where
    P: Fn(&Node) -> bool,
{
    let mut found = vec![];
    walk(doc, root, &pred, |id| {
        found.push(id);
        true
    });
    found
}

// Preorder walk that hands each match to `on_match`; returning false from it
// stops the walk.
fn walk<P, F>(doc: &Document, root: NodeId, pred: &P, mut on_match: F)
where
    P: Fn(&Node) -> bool,
    F: FnMut(NodeId) -> bool,
{
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = doc.node(id);
        if pred(node) && !on_match(id) {
            return;
        }
        stack.extend(node.children().iter().rev());
    }
}
