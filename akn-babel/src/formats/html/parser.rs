//! HTML import (HTML → Tree)
//!
//! Pipeline: HTML string → html5ever → RcDom → `<body>` children → Tree

use crate::error::FormatError;
use crate::tree::{NodeId, Tree};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML document or fragment into a tree holding the `<body>` children.
pub fn parse_html(source: &str) -> Result<Tree, FormatError> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut source.as_bytes())
        .map_err(|e| FormatError::ParseError(format!("HTML parsing failed: {e}")))?;

    let body = find_element(&dom.document, "body")
        .ok_or_else(|| FormatError::ParseError("HTML document has no body".to_string()))?;

    let mut tree = Tree::new();
    for child in body.children.borrow().iter() {
        import(&mut tree, child, None);
    }
    Ok(tree)
}

/// First element named `name` in document order
fn find_element(handle: &Handle, name: &str) -> Option<Handle> {
    if let NodeData::Element { name: qual, .. } = &handle.data {
        if &*qual.local == name {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, name))
}

fn import(tree: &mut Tree, handle: &Handle, parent: Option<NodeId>) {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let node = tree.add_element(parent, &name.local);
            for attr in attrs.borrow().iter() {
                tree.set_attribute(node, &attribute_name(&attr.name), &attr.value);
            }
            for child in handle.children.borrow().iter() {
                import(tree, child, Some(node));
            }
        }
        NodeData::Text { contents } => {
            tree.add_text(parent, &contents.borrow());
        }
        _ => {}
    }
}

fn attribute_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}
