//! Error types for format and configuration operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Requested operation has no meaning for the given formats
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Errors raised while building a transformation family.
///
/// These are construction-time failures: a family that fails to build is
/// reported once and left out of the registry. Nothing in a tree walk
/// produces a `ConfigError`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A root element list has an arity the transformer cannot express
    #[error("family '{family}': {side} root elements must have 1 or 2 entries, found {found}")]
    RootArity {
        family: String,
        side: &'static str,
        found: usize,
    },
    /// A required element name is empty
    #[error("family '{family}': {field} must not be empty")]
    EmptyName {
        family: String,
        field: &'static str,
    },
    /// The first-level element does not match the first root segment
    #[error("family '{family}': first level element '{element}' does not match root segment '{segment}'")]
    FirstLevelMismatch {
        family: String,
        element: String,
        segment: String,
    },
    /// An HTML selector could not be parsed
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),
    /// A compiled path pattern was rejected by the regex engine
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
