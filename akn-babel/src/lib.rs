//! Structure transformation between Akoma Ntoso and editable HTML
//!
//!     Legal documents are stored as Akoma Ntoso XML ("AKN") but edited in a rich-text editor
//!     that only understands HTML. This crate converts AKN-shaped trees into HTML-shaped trees
//!     and back, for the elements whose nesting differs between the two: numbered list items,
//!     numbered paragraphs, alinea mandates and tables.
//!
//!     The conversion is lossless on what matters structurally (element identity, `xml:id`,
//!     `leos:origin` and the LEOS soft-action markers) and lenient on what does not: whether a
//!     run of inline text sits in a wrapper element is decided again on every pass.
//!
//!     This is a pure lib: it powers the akn cli but is shell agnostic, no code here prints,
//!     reads env vars or touches files.
//!
//! Architecture
//!
//!     Transformation passes never build their destination. A pass walks one subtree, classifies
//!     every node by its path from the family root, and returns an ordered list of products
//!     (`Element`, `Child`, `Text`, `SetAttribute`, `Nested`, see ./product.rs). Building the
//!     destination tree from products is a separate step (./convert.rs), which keeps the passes
//!     pure and easy to test in isolation.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── tree                    # Arena tree shared by both sides, path side table
//!     ├── vocabulary.rs           # AKN/HTML attribute name pairs
//!     ├── product.rs              # Products emitted by passes
//!     ├── transform
//!     │   ├── pattern.rs          # Anchored path patterns, first match wins
//!     │   ├── attributes.rs       # Directional attribute rules
//!     │   ├── classify.rs         # Wrap decision, inline runs
//!     │   ├── config.rs           # Family configuration types
//!     │   ├── hierarchical.rs     # Numbered units with optional wrapping
//!     │   └── table.rs            # Tables, rows and cells
//!     ├── families.rs             # FamilyRegistry, first registered family wins
//!     ├── builtin.rs              # Default families and leaf mappings
//!     ├── convert.rs              # Product replay, whole-document conversion
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     └── formats
//!         ├── akn                 # roxmltree import, XML export
//!         └── html                # html5ever import and export
//!
//! Testing
//!     tests
//!     └── <concern>
//!         ├── <testname>.rs
//!         └── snapshots
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     The AKN to HTML direction is a path-driven walk: `list/indent/num/text` becomes the
//!     `data-akn-num` attribute of the `li`, `list/indent/content/mp` text becomes `li` text,
//!     and so on (see ./transform/hierarchical.rs for the whole role table).
//!
//!     The HTML to AKN direction looks at each unit once. If the unit mixes several children
//!     with at least one block, every piece of content gets its own wrapper (`alinea`);
//!     otherwise content goes straight under the unit. Inline runs always become `content/mp`.
//!
//! Library Choices
//!
//!     Parsing and serializing are offloaded to specialized crates: `roxmltree` for AKN XML,
//!     `html5ever` with `markup5ever_rcdom` for HTML. Path patterns use `regex`.
//!
pub mod builtin;
pub mod convert;
pub mod error;
pub mod families;
pub mod format;
pub mod formats;
pub mod product;
pub mod registry;
pub mod transform;
pub mod tree;
pub mod vocabulary;

pub use convert::{Converter, LeafMapping, LeafTable};
pub use error::{ConfigError, FormatError};
pub use families::FamilyRegistry;
pub use format::Format;
pub use product::{Attribute, Product};
pub use registry::FormatRegistry;
pub use transform::{Direction, Side, StructuralFamily};
pub use tree::{NodeId, Tree};

/// Converts `source` from format `from` into format `to`.
///
/// The direction follows the sides of the two formats. Converting between two formats of the
/// same side only re-serializes the parsed tree.
pub fn convert_document(
    formats: &FormatRegistry,
    converter: &Converter,
    source: &str,
    from: &str,
    to: &str,
) -> Result<String, FormatError> {
    let input = formats.get(from)?;
    let output = formats.get(to)?;
    let tree = formats.parse(source, from)?;
    match Direction::between(input.side(), output.side()) {
        Some(direction) => formats.serialize(&converter.convert(&tree, direction), to),
        None => formats.serialize(&tree, to),
    }
}
