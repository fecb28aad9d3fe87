//! Content classification for block containers
//!
//! HTML keeps a structural unit's inline text loose inside the unit (`<li>text <b>x</b></li>`)
//! while AKN always groups it as `content/mp`, optionally under a wrapper element. Deciding
//! whether a wrapper is needed, and how children split into emission units, happens here.

use crate::tree::{NodeId, Tree};

/// Element kinds that flow inside a paragraph
pub const INLINE: &[&str] = &[
    "text", "span", "strong", "em", "u", "sup", "sub", "br", "a", "img", "mref",
];

/// AKN element kinds that flow inside `mp`
pub const AKN_INLINE: &[&str] = &[
    "b", "i", "u", "sup", "sub", "span", "inline", "ref", "mref", "br",
];

pub fn is_inline(name: &str) -> bool {
    INLINE.contains(&name)
}

pub fn is_table(name: &str) -> bool {
    name == "table"
}

pub fn is_paragraph(name: &str) -> bool {
    name == "p"
}

/// Text node made only of whitespace
pub fn is_blank(tree: &Tree, node: NodeId) -> bool {
    tree.text(node).is_some_and(|value| value.trim().is_empty())
}

/// Whether the blank text at `index` separates two inline siblings.
///
/// Blank text that comes first, comes last or touches a block is layout.
pub fn is_inline_gap(tree: &Tree, siblings: &[NodeId], index: usize) -> bool {
    if index == 0 || index + 1 >= siblings.len() {
        return false;
    }
    let flows = |node: NodeId| {
        let name = tree.name(node);
        tree.is_text(node) || is_inline(name) || AKN_INLINE.contains(&name)
    };
    flows(siblings[index - 1]) && flows(siblings[index + 1])
}

/// Whether `node` mixes more than one significant child with at least one non-inline child.
///
/// Whitespace-only text is ignored. A container with a single significant child, or with
/// inline children only, never needs a wrapper.
pub fn should_wrap(tree: &Tree, node: NodeId) -> bool {
    let mut significant = 0;
    let mut block_seen = false;
    for &child in tree.children(node) {
        if is_blank(tree, child) {
            continue;
        }
        significant += 1;
        if !is_inline(tree.name(child)) {
            block_seen = true;
        }
        if significant > 1 && block_seen {
            return true;
        }
    }
    false
}

/// One emission unit of a container's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentUnit {
    /// Consecutive inline siblings
    Run(Vec<NodeId>),
    /// A `p` child, already grouped
    Paragraph(NodeId),
    Table(NodeId),
    /// Any other block child
    Block(NodeId),
}

impl ContentUnit {
    /// Whether the unit is a run made only of blank text
    pub fn is_blank_run(&self, tree: &Tree) -> bool {
        match self {
            ContentUnit::Run(nodes) => nodes.iter().all(|&node| is_blank(tree, node)),
            _ => false,
        }
    }
}

/// Split `children` into runs of inline siblings and single block units, in order.
pub fn partition_runs(tree: &Tree, children: &[NodeId]) -> Vec<ContentUnit> {
    let mut units = Vec::new();
    let mut run = Vec::new();
    for &child in children {
        let name = tree.name(child);
        if is_inline(name) {
            run.push(child);
            continue;
        }
        if !run.is_empty() {
            units.push(ContentUnit::Run(std::mem::take(&mut run)));
        }
        units.push(if is_paragraph(name) {
            ContentUnit::Paragraph(child)
        } else if is_table(name) {
            ContentUnit::Table(child)
        } else {
            ContentUnit::Block(child)
        });
    }
    if !run.is_empty() {
        units.push(ContentUnit::Run(run));
    }
    units
}
