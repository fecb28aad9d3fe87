//! AKN export (Tree → XML)

use super::LEOS_NAMESPACE;
use crate::error::FormatError;
use crate::tree::{NodeData, NodeId, Tree};
use std::fmt::Write;

const LEOS_PREFIX: &str = "leos:";

/// Serialize every top-level node of `tree`, in order.
pub fn serialize_akn(tree: &Tree) -> Result<String, FormatError> {
    let mut out = String::new();
    for &root in tree.roots() {
        let declare = uses_leos(tree, root) && tree.attribute(root, "xmlns:leos").is_none();
        write_node(tree, root, declare, &mut out)
            .map_err(|e| FormatError::SerializationError(format!("XML serialization failed: {e}")))?;
    }
    Ok(out)
}

fn uses_leos(tree: &Tree, root: NodeId) -> bool {
    tree.walk(root).any(|node| {
        tree.name(node).starts_with(LEOS_PREFIX)
            || tree
                .attributes(node)
                .iter()
                .any(|(name, _)| name.starts_with(LEOS_PREFIX))
    })
}

fn write_node(tree: &Tree, node: NodeId, declare: bool, out: &mut String) -> std::fmt::Result {
    match tree.data(node) {
        NodeData::Text(value) => out.write_str(&escape(value, false)),
        NodeData::Element { attributes, .. } => {
            let name = tree.tag(node);
            write!(out, "<{name}")?;
            if declare {
                write!(out, " xmlns:leos=\"{LEOS_NAMESPACE}\"")?;
            }
            for (key, value) in attributes {
                write!(out, " {key}=\"{}\"", escape(value, true))?;
            }
            let children = tree.children(node);
            if children.is_empty() {
                return out.write_str("/>");
            }
            out.write_char('>')?;
            for &child in children {
                write_node(tree, child, false, out)?;
            }
            write!(out, "</{name}>")
        }
    }
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
