//! Built-in families and leaf mappings
//!
//! These mirror `defaults/akn.default.toml` in the `akn-config` crate, so a registry built
//! without any configuration file behaves like one loaded from the defaults.

use crate::convert::LeafMapping;
use crate::error::ConfigError;
use crate::transform::config::{
    AttrCorrespondence, CellMapping, CellTags, ElementMapping, RootSegment, Selector, TableConfig,
    TransformationConfig,
};
use crate::vocabulary as vocab;

fn editable_list(name: &str) -> Vec<AttrCorrespondence> {
    vec![
        AttrCorrespondence::pass("leos:editable", "contenteditable"),
        AttrCorrespondence::pass(vocab::XML_ID, vocab::ID),
        AttrCorrespondence::html_only(&format!("{}={name}", vocab::DATA_AKN_NAME)),
    ]
}

fn marker(name: &str) -> Vec<AttrCorrespondence> {
    vec![AttrCorrespondence::html_only(&format!(
        "{}={name}",
        vocab::DATA_AKN_NAME
    ))]
}

fn selector(tag: &str, name: &str) -> Result<Selector, ConfigError> {
    format!("{tag}[{}={name}]", vocab::DATA_AKN_NAME).parse()
}

pub fn unordered_list() -> Result<TransformationConfig, ConfigError> {
    TransformationConfig::new(
        "unordered-list",
        ElementMapping::new("list", Selector::tag("ul"), editable_list("aknUnorderedList")),
        vec![RootSegment::from("list"), RootSegment::from("indent")],
        "alinea",
        vec!["ul".into(), "li".into()],
    )
}

pub fn ordered_list() -> Result<TransformationConfig, ConfigError> {
    TransformationConfig::new(
        "ordered-list",
        ElementMapping::new(
            "list",
            selector("ol", "aknOrderedList")?,
            editable_list("aknOrderedList"),
        ),
        vec![RootSegment::from("list"), RootSegment::from("point")],
        "alinea",
        vec!["ol".into(), "li".into()],
    )
}

pub fn numbered_paragraph() -> Result<TransformationConfig, ConfigError> {
    TransformationConfig::new(
        "numbered-paragraph",
        ElementMapping::new(
            "paragraph",
            selector("ol", "aknNumberedParagraph")?,
            marker("aknNumberedParagraph"),
        ),
        vec![RootSegment::from("paragraph")],
        "subparagraph",
        vec!["ol".into(), "li".into()],
    )
}

pub fn alinea_mandate() -> Result<TransformationConfig, ConfigError> {
    TransformationConfig::new(
        "alinea-mandate",
        ElementMapping::new(
            "alinea",
            selector("ol", "aknAlineaMandate")?,
            marker("aknAlineaMandate"),
        ),
        vec![RootSegment::from("alinea")],
        "alinea",
        vec!["ol".into(), "li".into()],
    )
}

pub fn table() -> Result<TableConfig, ConfigError> {
    let identity = AttrCorrespondence::from_pairs(vocab::IDENTITY);
    let table = identity
        .iter()
        .cloned()
        .chain(
            ["border", "cellpadding", "cellspacing"]
                .iter()
                .map(|name| AttrCorrespondence::pass(name, name)),
        )
        .collect();
    let cell = identity
        .iter()
        .cloned()
        .chain(
            ["colspan", "rowspan"]
                .iter()
                .map(|name| AttrCorrespondence::pass(name, name)),
        )
        .collect();

    TableConfig::new(
        "table",
        ElementMapping::new("table", Selector::tag("table"), table),
        ElementMapping::new("tr", Selector::tag("tr"), identity),
        CellMapping {
            akn: CellTags::new("th", "td"),
            html: CellTags::new("th", "td"),
            attributes: cell,
        },
    )
}

/// Hierarchical families in registration order
pub fn hierarchical() -> Vec<Result<TransformationConfig, ConfigError>> {
    vec![
        unordered_list(),
        ordered_list(),
        numbered_paragraph(),
        alinea_mandate(),
    ]
}

pub fn tables() -> Vec<Result<TableConfig, ConfigError>> {
    vec![table()]
}

/// Element renames applied outside of any family
pub fn leaves() -> Vec<LeafMapping> {
    vec![
        LeafMapping::new(
            "mp",
            "p",
            AttrCorrespondence::from_pairs(vocab::IDENTITY),
        ),
        LeafMapping::new("b", "strong", Vec::new()),
        LeafMapping::new("i", "em", Vec::new()),
    ]
}
