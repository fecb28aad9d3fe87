//! Document tree shared by both sides of a transformation.
//!
//!     Both the AKN side and the HTML side are loaded into the same structure: an arena of
//!     element and text nodes addressed by [`NodeId`]. Each node knows its parent and its
//!     ordered children, and children order is document order.
//!
//!     The arena owns every node exactly once. Parent links are plain ids, so they never keep
//!     anything alive and are only used for path computation and sibling or ancestor lookups.
//!
//!     Element names are matched lower-cased. Text nodes report the name `text`, which is the
//!     segment they contribute to a hierarchical path (see [`path`]). The source spelling of
//!     a mixed-case name (`blockList`) is kept for output, see [`Tree::tag`].

pub mod path;

pub use path::PathCache;

use serde::Serialize;

/// Name reported for text nodes.
pub const TEXT_NAME: &str = "text";

/// Identity of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Payload of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    data: NodeData,
    /// Source spelling when it differs from the lower-cased name
    spelling: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed ordered tree.
///
/// A tree may hold several top-level nodes (a parsed HTML fragment usually does); they are
/// available through [`Tree::roots`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<Entry>,
    roots: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level nodes in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// First top-level node, if any
    pub fn root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// Append an element under `parent`, or as a new top-level node when `parent` is `None`.
    pub fn add_element(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        let lower = name.to_ascii_lowercase();
        let spelling = (lower != name).then(|| name.to_string());
        let id = self.push(
            parent,
            NodeData::Element {
                name: lower,
                attributes: Vec::new(),
            },
        );
        self.entries[id.0].spelling = spelling;
        id
    }

    /// Append a text node under `parent`, or as a new top-level node when `parent` is `None`.
    pub fn add_text(&mut self, parent: Option<NodeId>, value: &str) -> NodeId {
        self.push(parent, NodeData::Text(value.to_string()))
    }

    fn push(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry {
            data,
            spelling: None,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.entries[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Set an attribute, replacing an existing value with the same name.
    ///
    /// Text nodes carry no attributes; the call is ignored for them.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.entries[node.0].data {
            match attributes.iter_mut().find(|(existing, _)| existing == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.entries[node.0].data
    }

    /// Element name, or [`TEXT_NAME`] for text nodes
    pub fn name(&self, node: NodeId) -> &str {
        match &self.entries[node.0].data {
            NodeData::Element { name, .. } => name,
            NodeData::Text(_) => TEXT_NAME,
        }
    }

    /// Element name as spelled in the source
    pub fn tag(&self, node: NodeId) -> &str {
        match &self.entries[node.0].spelling {
            Some(spelling) => spelling,
            None => self.name(node),
        }
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.entries[node.0].data, NodeData::Text(_))
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        !self.is_text(node)
    }

    /// Text value of a text node
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.entries[node.0].data {
            NodeData::Text(value) => Some(value),
            NodeData::Element { .. } => None,
        }
    }

    /// Ordered attributes of an element (empty for text nodes)
    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match &self.entries[node.0].data {
            NodeData::Element { attributes, .. } => attributes,
            NodeData::Text(_) => &[],
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.entries[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.entries[node.0].children
    }

    /// Nearest strict ancestor with the given element name
    pub fn ancestor_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if self.is_element(id) && self.name(id) == name {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Last direct child element with the given name
    pub fn last_child_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .rev()
            .copied()
            .find(|&child| self.is_element(child) && self.name(child) == name)
    }

    /// Concatenated text of `node` and all of its descendants
    pub fn text_content(&self, node: NodeId) -> String {
        let mut walk = self.walk(node);
        let mut out = String::new();
        while let Some(id) = walk.next() {
            if let Some(value) = self.text(id) {
                out.push_str(value);
            }
        }
        out
    }

    /// Pre-order walk of the subtree rooted at `root` (inclusive).
    pub fn walk(&self, root: NodeId) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![root],
            pending: None,
        }
    }
}

/// Pre-order traversal that can prune the subtree of the node it just yielded.
///
/// Children of a yielded node are scheduled lazily, on the following call to
/// [`Walk::next`]; calling [`Walk::skip_subtree`] in between drops them.
pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
    pending: Option<NodeId>,
}

impl Walk<'_> {
    /// Do not descend into the node returned by the last call to `next`.
    pub fn skip_subtree(&mut self) {
        self.pending = None;
    }
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if let Some(pending) = self.pending.take() {
            self.stack
                .extend(self.tree.children(pending).iter().rev().copied());
        }
        let node = self.stack.pop()?;
        self.pending = Some(node);
        Some(node)
    }
}
