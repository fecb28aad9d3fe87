//! AKN import (XML → Tree)

use super::LEOS_NAMESPACE;
use crate::error::FormatError;
use crate::tree::{NodeId, Tree};
use roxmltree::{Node, NodeType};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const WRAPPER: &str = "akn-fragment";

/// Parse an AKN document or fragment.
///
/// Top-level whitespace between fragment elements is dropped.
pub fn parse_akn(source: &str) -> Result<Tree, FormatError> {
    let wrapped = format!(
        "<{WRAPPER} xmlns:leos=\"{LEOS_NAMESPACE}\">{}</{WRAPPER}>",
        strip_declaration(source)
    );
    let doc = roxmltree::Document::parse(&wrapped)
        .map_err(|e| FormatError::ParseError(format!("XML parsing error: {e}")))?;

    let mut tree = Tree::new();
    for child in doc.root_element().children() {
        if child.is_text() && child.text().is_some_and(|text| text.trim().is_empty()) {
            continue;
        }
        import(&mut tree, child, None);
    }
    Ok(tree)
}

/// Drop a leading `<?xml ...?>` declaration, which may not appear inside the wrapper
fn strip_declaration(source: &str) -> &str {
    let trimmed = source.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    source
}

fn import(tree: &mut Tree, node: Node, parent: Option<NodeId>) {
    match node.node_type() {
        NodeType::Element => {
            let id = tree.add_element(parent, node.tag_name().name());
            for attr in node.attributes() {
                let name = match attr.namespace() {
                    Some(XML_NAMESPACE) => format!("xml:{}", attr.name()),
                    Some(uri) => match node.lookup_prefix(uri) {
                        Some(prefix) => format!("{prefix}:{}", attr.name()),
                        None => attr.name().to_string(),
                    },
                    None => attr.name().to_string(),
                };
                tree.set_attribute(id, &name, attr.value());
            }
            for child in node.children() {
                import(tree, child, Some(id));
            }
        }
        NodeType::Text => {
            if let Some(text) = node.text() {
                tree.add_text(parent, text);
            }
        }
        _ => {}
    }
}
