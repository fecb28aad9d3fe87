//! HTML format implementation
//!
//! This module loads editor HTML into the shared tree and writes converted trees back out.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for both directions:
//! - `html5ever`: HTML5 parser and serializer from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM the parser builds into
//!
//! Editor content is usually a fragment (`<ul>...</ul>`), not a document. The parser always
//! builds a full document around it, so import takes the children of `<body>`. Comments
//! and doctypes are dropped; whitespace text is kept.
//!
//! # Output Format
//!
//! Export serializes each top-level node in order, without a surrounding document, so that
//! the result can be handed back to an editor as-is.

mod parser;
mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::transform::Side;
use crate::tree::Tree;

pub use parser::parse_html;
pub use serializer::serialize_html;

/// Format implementation for editor HTML
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Editable HTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn side(&self) -> Side {
        Side::Html
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Tree, FormatError> {
        parse_html(source)
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        serialize_html(tree)
    }
}
