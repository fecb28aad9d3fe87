//! Format trait definition
//!
//! This module defines the Format trait that the AKN and HTML adapters implement. A format
//! loads source text into a [`Tree`] and writes a [`Tree`] back out; which side of a
//! transformation the tree belongs to is given by [`Format::side`].

use crate::error::FormatError;
use crate::transform::Side;
use crate::tree::Tree;

/// Trait for document formats
///
/// Implementors provide conversion between a string representation and the shared tree.
/// Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn side(&self) -> Side {
///         Side::Html
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Tree, FormatError> {
///         // Load source into a Tree
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "akn", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["xml", "akn"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Side of a transformation this format's trees belong to
    fn side(&self) -> Side;

    /// Whether this format supports parsing (source → Tree)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Tree → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a Tree
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Tree, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Tree into source text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _tree: &Tree) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
