//! Read-only document tree.
//!
//! The parsed page is flattened into an arena of [`Node`]s addressed by
//! [`NodeId`] handles. Parent, sibling and child links are stored as handles
//! into the same arena, so navigating upward or sideways never needs shared
//! ownership.

use std::iter;

use ego_tree::iter::Edge;
use ego_tree::NodeRef;

pub mod search;
pub mod text;

/// Stable handle of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
enum NodeData {
    Document,
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    /// Comments, doctypes and processing instructions.
    Other,
}

#[derive(Debug)]
pub struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Lower-case tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Value of attribute `key`, or an empty string when the attribute is
    /// absent or the node is not an element.
    pub fn attr(&self, key: &str) -> &str {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .unwrap_or(""),
            _ => "",
        }
    }

    /// True if every token in `wanted` is one of the whitespace separated
    /// tokens of the `class` attribute.
    pub fn has_classes(&self, wanted: &[&str]) -> bool {
        let classes: Vec<&str> = self.attr("class").split_whitespace().collect();
        wanted.iter().all(|w| classes.contains(w))
    }

    pub fn text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Parse an HTML page. html5ever recovers from malformed markup, so this
    /// never fails; undecodable bodies are rejected before reaching here.
    pub fn parse(html: &str) -> Self {
        let parsed = scraper::Html::parse_document(html);
        let mut doc = Self { nodes: vec![] };
        doc.build(parsed.tree.root());
        doc
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Parent, grandparent and so on up to the document node. `id` itself is
    /// not included.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.node(id).parent, move |&p| self.node(p).parent)
    }

    /// Siblings after `id`, in document order.
    pub fn following_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        iter::successors(self.node(id).next_sibling, move |&s| self.node(s).next_sibling)
    }

    fn build(&mut self, root: NodeRef<scraper::Node>) {
        // Open elements, each with the last child linked under it so far.
        let mut open: Vec<(NodeId, Option<NodeId>)> = vec![];
        for edge in root.traverse() {
            match edge {
                Edge::Open(source) => {
                    let id = NodeId(self.nodes.len());
                    let (parent, prev_sibling) = match open.last_mut() {
                        Some((parent, last)) => (Some(*parent), last.replace(id)),
                        None => (None, None),
                    };
                    self.nodes.push(Node {
                        data: convert(source.value()),
                        parent,
                        prev_sibling,
                        next_sibling: None,
                        children: vec![],
                    });
                    if let Some(parent_id) = parent {
                        self.nodes[parent_id.0].children.push(id);
                    }
                    if let Some(prev_id) = prev_sibling {
                        self.nodes[prev_id.0].next_sibling = Some(id);
                    }
                    open.push((id, None));
                }
                Edge::Close(_) => {
                    open.pop();
                }
            }
        }
    }
}

fn convert(node: &scraper::Node) -> NodeData {
    match node {
        scraper::Node::Document | scraper::Node::Fragment => NodeData::Document,
        scraper::Node::Element(el) => NodeData::Element {
            name: el.name().to_owned(),
            attrs: el
                .attrs()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        },
        scraper::Node::Text(text) => NodeData::Text(String::from(&**text)),
        _ => NodeData::Other,
    }
}
