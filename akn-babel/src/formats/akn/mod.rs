//! Akoma Ntoso XML format implementation
//!
//! AKN documents are parsed with `roxmltree`. Element names are stored by local name,
//! lower-cased. Namespaced attributes keep the prefix they are declared with in the
//! document (`leos:editable`); attributes in the XML namespace are always `xml:*`.
//!
//! Editor content is often a fragment: several sibling elements, no namespace
//! declarations. The source is therefore parsed inside a synthetic wrapper that declares
//! the LEOS namespace, and the wrapper's children become the tree's top-level nodes.
//!
//! Namespace declarations are not part of the tree. On export the LEOS namespace is
//! declared on every top-level element that uses a `leos:` name.

mod parser;
mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::transform::Side;
use crate::tree::Tree;

pub use parser::parse_akn;
pub use serializer::serialize_akn;

/// Namespace URI bound to the `leos` prefix
pub const LEOS_NAMESPACE: &str = "urn:eu:europa:ec:leos";

/// Format implementation for Akoma Ntoso XML
#[derive(Debug, Default, Clone, Copy)]
pub struct AknFormat;

impl Format for AknFormat {
    fn name(&self) -> &str {
        "akn"
    }

    fn description(&self) -> &str {
        "Akoma Ntoso XML"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xml", "akn"]
    }

    fn side(&self) -> Side {
        Side::Akn
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Tree, FormatError> {
        parse_akn(source)
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        serialize_akn(tree)
    }
}
