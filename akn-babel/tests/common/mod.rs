//! Shared helpers for the conversion tests.

use akn_babel::formats::akn::parse_akn;
use akn_babel::{convert_document, Converter, FormatRegistry, Tree};
use std::path::PathBuf;

/// Read a file from `tests/fixtures`
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Convert `source` with the default formats and families
pub fn convert(source: &str, from: &str, to: &str) -> String {
    convert_document(
        &FormatRegistry::with_defaults(),
        &Converter::with_defaults(),
        source,
        from,
        to,
    )
    .unwrap_or_else(|e| panic!("conversion {from} -> {to} failed: {e}"))
}

pub fn akn_to_html(source: &str) -> String {
    convert(source, "akn", "html")
}

pub fn html_to_akn(source: &str) -> String {
    convert(source, "html", "akn")
}

/// Values of attribute `name` over the whole document, in document order
pub fn attribute_values(source: &str, name: &str) -> Vec<String> {
    let tree: Tree = parse_akn(source).expect("AKN should parse");
    tree.roots()
        .iter()
        .flat_map(|&root| tree.walk(root))
        .filter_map(|node| tree.attribute(node, name).map(str::to_string))
        .collect()
}
