//! Whole-document conversion
//!
//!     A [`Converter`] walks a source tree and builds the destination tree. Every node is
//!     offered to the family registry first; a family that supports it returns products,
//!     which are replayed into the destination through a [`Session`]. Nodes no family claims
//!     are copied through the leaf table (`mp` becomes `p`, `b` becomes `strong`, anything
//!     unknown keeps its name) and their children are converted the same way.
//!
//!     Nested products hand their source subtree back to the converter, so a list inside a
//!     table cell inside a list is handled by the right family at every level.
//!
//! Path resolution
//!
//!     Product paths start at the family's target root. The first segment resolves to the
//!     most recent top-level element the session created with that name (creating it under
//!     the attach point if there is none); every following segment resolves to the last child
//!     with that name. An empty path is the attach point itself.

use crate::builtin;
use crate::families::FamilyRegistry;
use crate::product::{Attribute, Product};
use crate::transform::attributes::AttributeMap;
use crate::transform::classify::is_blank;
use crate::transform::config::AttrCorrespondence;
use crate::transform::{Direction, StructuralFamily};
use crate::tree::{NodeId, Tree, TEXT_NAME};
use log::trace;
use std::collections::HashSet;

/// An element renamed between the two sides outside of any family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafMapping {
    pub akn: String,
    pub html: String,
    pub attributes: Vec<AttrCorrespondence>,
}

impl LeafMapping {
    pub fn new(akn: &str, html: &str, attributes: Vec<AttrCorrespondence>) -> Self {
        Self {
            akn: akn.to_ascii_lowercase(),
            html: html.to_ascii_lowercase(),
            attributes,
        }
    }
}

/// Compiled leaf rule for one direction
#[derive(Debug)]
struct Leaf {
    from: String,
    to: String,
    attributes: AttributeMap,
    /// Source attributes consumed by `attributes`
    consumed: HashSet<String>,
}

/// Leaf mappings compiled for both directions
#[derive(Debug, Default)]
pub struct LeafTable {
    to_html: Vec<Leaf>,
    to_akn: Vec<Leaf>,
}

impl LeafTable {
    pub fn new(mappings: &[LeafMapping]) -> Self {
        let compile = |direction: Direction| {
            mappings
                .iter()
                .map(|mapping| {
                    let (from, to) = match direction {
                        Direction::AknToHtml => (&mapping.akn, &mapping.html),
                        Direction::HtmlToAkn => (&mapping.html, &mapping.akn),
                    };
                    let consumed = mapping
                        .attributes
                        .iter()
                        .filter_map(|entry| match direction {
                            Direction::AknToHtml => entry.akn.clone(),
                            Direction::HtmlToAkn => entry.html.clone(),
                        })
                        .collect();
                    Leaf {
                        from: from.clone(),
                        to: to.clone(),
                        attributes: AttributeMap::compile(&mapping.attributes, direction),
                        consumed,
                    }
                })
                .collect()
        };
        Self {
            to_html: compile(Direction::AknToHtml),
            to_akn: compile(Direction::HtmlToAkn),
        }
    }

    fn find(&self, name: &str, direction: Direction) -> Option<&Leaf> {
        let leaves = match direction {
            Direction::AknToHtml => &self.to_html,
            Direction::HtmlToAkn => &self.to_akn,
        };
        leaves.iter().find(|leaf| leaf.from == name)
    }

    /// Target name for a source element, `None` when no leaf mapping applies
    pub fn rename(&self, name: &str, direction: Direction) -> Option<&str> {
        self.find(name, direction).map(|leaf| leaf.to.as_str())
    }

    /// Target attributes of a copied element: mapped ones first, then the untouched rest
    fn attributes(&self, tree: &Tree, node: NodeId, direction: Direction) -> Vec<Attribute> {
        let Some(leaf) = self.find(tree.name(node), direction) else {
            return copy_attributes(tree, node, |_| true);
        };
        let mut attributes = leaf.attributes.apply(tree, node);
        attributes.extend(copy_attributes(tree, node, |name| !leaf.consumed.contains(name)));
        attributes
    }
}

fn copy_attributes(tree: &Tree, node: NodeId, keep: impl Fn(&str) -> bool) -> Vec<Attribute> {
    tree.attributes(node)
        .iter()
        .filter(|(name, _)| keep(name))
        .map(|(name, value)| Attribute::new(name.as_str(), value.as_str()))
        .collect()
}

/// Converts whole trees between the two sides
pub struct Converter {
    families: FamilyRegistry,
    leaves: LeafTable,
}

impl Converter {
    pub fn new(families: FamilyRegistry, leaves: LeafTable) -> Self {
        Self { families, leaves }
    }

    /// Converter with the built-in families and leaf mappings
    pub fn with_defaults() -> Self {
        Self::new(
            FamilyRegistry::with_defaults(),
            LeafTable::new(&builtin::leaves()),
        )
    }

    pub fn families(&self) -> &FamilyRegistry {
        &self.families
    }

    /// Convert every top-level node of `tree`
    pub fn convert(&self, tree: &Tree, direction: Direction) -> Tree {
        let mut target = Tree::new();
        self.convert_children(tree, tree.roots(), &mut target, None, direction);
        target
    }

    /// Convert the subtree at `node` under `parent`, returning the top-level nodes created.
    pub fn convert_node(
        &self,
        tree: &Tree,
        node: NodeId,
        target: &mut Tree,
        parent: Option<NodeId>,
        direction: Direction,
    ) -> Vec<NodeId> {
        if let Some(value) = tree.text(node) {
            return vec![target.add_text(parent, value)];
        }
        if let Some(family) = self.families.find(tree, node, direction) {
            let mut session = Session::new(self, tree, direction, parent);
            session.replay(target, family, node);
            return session.tops;
        }
        vec![self.copy_leaf(tree, node, target, parent, direction)]
    }

    fn copy_leaf(
        &self,
        tree: &Tree,
        node: NodeId,
        target: &mut Tree,
        parent: Option<NodeId>,
        direction: Direction,
    ) -> NodeId {
        let name = self
            .leaves
            .rename(tree.name(node), direction)
            .unwrap_or_else(|| tree.tag(node));
        let copy = target.add_element(parent, name);
        for attribute in self.leaves.attributes(tree, node, direction) {
            target.set_attribute(copy, &attribute.name, &attribute.value);
        }
        self.convert_children(tree, tree.children(node), target, Some(copy), direction);
        copy
    }

    fn convert_children(
        &self,
        tree: &Tree,
        children: &[NodeId],
        target: &mut Tree,
        parent: Option<NodeId>,
        direction: Direction,
    ) {
        // A grouping family keeps its session open across adjacent sibling roots.
        let mut open: Option<(usize, Session<'_>)> = None;
        for &child in children {
            if let Some(index) = self.families.position(tree, child, direction) {
                let Some(family) = self.families.get(index) else {
                    continue;
                };
                if let Some((current, session)) = open.as_mut() {
                    if *current == index {
                        session.replay(target, family, child);
                        continue;
                    }
                }
                let mut session = Session::new(self, tree, direction, parent);
                session.replay(target, family, child);
                open = family
                    .groups_siblings(direction)
                    .then_some((index, session));
                continue;
            }
            if open.is_some() && is_blank(tree, child) {
                if let Some(value) = tree.text(child) {
                    target.add_text(parent, value);
                }
                continue;
            }
            open = None;
            self.convert_node(tree, child, target, parent, direction);
        }
    }

    /// Products of the outermost family-anchored nodes, in document order
    pub fn products<'a>(&'a self, tree: &Tree, direction: Direction) -> Vec<(&'a str, Vec<Product>)> {
        let mut out = Vec::new();
        for &root in tree.roots() {
            let mut walk = tree.walk(root);
            while let Some(node) = walk.next() {
                if let Some(found) = self.families.transform(tree, node, direction) {
                    out.push(found);
                    walk.skip_subtree();
                }
            }
        }
        out
    }
}

/// Replays products into the destination tree.
///
/// A session belongs to one family pass (or to several adjacent ones for grouping families)
/// and remembers the top-level elements it created.
pub struct Session<'a> {
    converter: &'a Converter,
    source: &'a Tree,
    direction: Direction,
    parent: Option<NodeId>,
    tops: Vec<NodeId>,
}

impl<'a> Session<'a> {
    fn new(converter: &'a Converter, source: &'a Tree, direction: Direction, parent: Option<NodeId>) -> Self {
        Self {
            converter,
            source,
            direction,
            parent,
            tops: Vec::new(),
        }
    }

    /// Top-level elements created so far
    pub fn tops(&self) -> &[NodeId] {
        &self.tops
    }

    fn replay(&mut self, target: &mut Tree, family: &dyn StructuralFamily, root: NodeId) {
        let products = family.transform(self.source, root, self.direction);
        trace!("{}: replaying {} products", family.name(), products.len());
        for product in products {
            self.apply(target, product);
        }
    }

    /// Apply a single product
    pub fn apply(&mut self, target: &mut Tree, product: Product) {
        match product {
            Product::Element { path, attributes } => {
                if let Some(node) = self.resolve(target, &path) {
                    set_attributes(target, node, &attributes);
                }
            }
            Product::Child {
                path,
                tag,
                attributes,
            } => {
                let parent = self.attach(target, &path);
                let child = target.add_element(parent, &tag);
                set_attributes(target, child, &attributes);
                if path.is_empty() {
                    self.tops.push(child);
                }
            }
            Product::Text { path, value } => {
                let parent_path = path
                    .strip_suffix(TEXT_NAME)
                    .map(|parent| parent.trim_end_matches('/'))
                    .unwrap_or(&path);
                let parent = self.attach(target, parent_path);
                target.add_text(parent, &value);
            }
            Product::SetAttribute { path, name, value } => {
                if let Some(node) = self.resolve(target, &path) {
                    target.set_attribute(node, &name, &value);
                }
            }
            Product::Nested {
                path,
                source,
                attributes,
            } => {
                let parent = self.attach(target, &path);
                let created = self
                    .converter
                    .convert_node(self.source, source, target, parent, self.direction);
                for node in created {
                    set_attributes(target, node, &attributes);
                }
            }
        }
    }

    /// Element at `path`, or the attach point for an empty path
    fn attach(&mut self, target: &mut Tree, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            self.parent
        } else {
            self.resolve(target, path)
        }
    }

    /// Latest element at `path`, creating missing segments
    fn resolve(&mut self, target: &mut Tree, path: &str) -> Option<NodeId> {
        let mut current = None;
        for (depth, segment) in path.split('/').filter(|s| !s.is_empty()).enumerate() {
            let found = match current {
                None if depth == 0 => self
                    .tops
                    .iter()
                    .rev()
                    .copied()
                    .find(|&node| target.name(node) == segment),
                None => None,
                Some(node) => target.last_child_named(node, segment),
            };
            let node = match found {
                Some(node) => node,
                None => {
                    let parent = if depth == 0 { self.parent } else { current };
                    let created = target.add_element(parent, segment);
                    if depth == 0 {
                        self.tops.push(created);
                    }
                    created
                }
            };
            current = Some(node);
        }
        current
    }
}

fn set_attributes(target: &mut Tree, node: NodeId, attributes: &[Attribute]) {
    for attribute in attributes {
        target.set_attribute(node, &attribute.name, &attribute.value);
    }
}
