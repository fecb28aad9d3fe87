//! Target-tree construction directives
//!
//!     A transformation pass never touches its destination. It returns an ordered list of
//!     [`Product`]s, and a builder (see [`crate::convert`]) replays them in emission order.
//!     Later products may reference paths created by earlier ones, so order matters.
//!
//!     Paths are slash-joined element names starting at the family's target root, e.g.
//!     `list/indent/content/mp`. Resolving a path always picks the most recently created
//!     element for each segment.

use crate::tree::NodeId;
use serde::Serialize;

/// One resolved attribute on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Product {
    /// Resolve (or create) the element at `path` and set `attributes` on it
    Element {
        path: String,
        attributes: Vec<Attribute>,
    },
    /// Append a new `tag` element under the element at `path`
    Child {
        path: String,
        tag: String,
        attributes: Vec<Attribute>,
    },
    /// Append a text node; `path` ends with the `text` segment
    Text { path: String, value: String },
    /// Set a single attribute on the element at `path`
    SetAttribute {
        path: String,
        name: String,
        value: String,
    },
    /// Convert the source subtree rooted at `source` under the element at `path`
    Nested {
        path: String,
        source: NodeId,
        attributes: Vec<Attribute>,
    },
}

impl Product {
    pub fn path(&self) -> &str {
        match self {
            Product::Element { path, .. }
            | Product::Child { path, .. }
            | Product::Text { path, .. }
            | Product::SetAttribute { path, .. }
            | Product::Nested { path, .. } => path,
        }
    }

    pub(crate) fn element(path: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Product::Element {
            path: path.into(),
            attributes,
        }
    }

    pub(crate) fn child(
        path: impl Into<String>,
        tag: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Product::Child {
            path: path.into(),
            tag: tag.into(),
            attributes,
        }
    }

    pub(crate) fn text(path: impl Into<String>, value: impl Into<String>) -> Self {
        Product::Text {
            path: path.into(),
            value: value.into(),
        }
    }

    pub(crate) fn nested(path: impl Into<String>, source: NodeId, attributes: Vec<Attribute>) -> Self {
        Product::Nested {
            path: path.into(),
            source,
            attributes,
        }
    }
}

/// Join path segments with `/`, skipping empty ones.
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
