//! Structural transformation between AKN and HTML trees
//!
//!     A family is the set of path patterns anchored at one AKN element type and its HTML
//!     counterpart (`list/indent` and `ul/li`, `table/tr/td` and `table/tbody/tr/td`, ...). Each
//!     family walks a subtree in document order, classifies every node by its path relative to
//!     the family root, and emits [`Product`]s for the destination side.
//!
//!     Two family kinds exist:
//!         - [`hierarchical::HierarchicalTransformer`]: numbered units with optional wrapping
//!           (`num`, `content/mp`, wrapper elements such as `alinea`).
//!         - [`table::TableTransformer`]: rows and cells with the derived head/body split.
//!
//!     Building blocks are shared by both:
//!         - [`pattern`]: ordered anchored path patterns, first match wins.
//!         - [`attributes`]: directional attribute correspondence rules.
//!         - [`classify`]: wrap decision and inline-run partitioning.
//!
//!     Families are immutable once built and hold no per-call state; the path cache lives in
//!     the walk. Transforming the same tree twice yields the same products.

pub mod attributes;
pub mod classify;
pub mod config;
pub mod hierarchical;
pub mod pattern;
pub mod table;

use crate::product::Product;
use crate::tree::{NodeId, Tree};
use std::fmt;

/// One of the two document representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Akn,
    Html,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Akn => "akn",
            Side::Html => "html",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of a transformation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    AknToHtml,
    HtmlToAkn,
}

impl Direction {
    /// Direction converting `from` into `to`, or `None` when both sides are the same.
    pub fn between(from: Side, to: Side) -> Option<Direction> {
        match (from, to) {
            (Side::Akn, Side::Html) => Some(Direction::AknToHtml),
            (Side::Html, Side::Akn) => Some(Direction::HtmlToAkn),
            _ => None,
        }
    }
}

/// A configured structural family.
pub trait StructuralFamily: Send + Sync {
    /// Family name, used for logging and listing
    fn name(&self) -> &str;

    /// Whether `root` anchors this family for the given direction.
    ///
    /// Checked before any classification; an unsupported root is skipped without error.
    fn supports(&self, tree: &Tree, root: NodeId, direction: Direction) -> bool;

    /// Walk the subtree at `root` and return its products in emission order.
    fn transform(&self, tree: &Tree, root: NodeId, direction: Direction) -> Vec<Product>;

    /// Whether consecutive sibling roots share one target container.
    ///
    /// True for families whose source unit has no container of its own (`paragraph` to
    /// `ol/li`): adjacent paragraphs become items of a single `ol`.
    fn groups_siblings(&self, _direction: Direction) -> bool {
        false
    }
}
