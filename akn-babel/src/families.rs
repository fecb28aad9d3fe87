//! Family registry
//!
//! Families are kept in registration order. Several families may anchor on the same
//! element (`list` for both unordered and ordered lists, `ol` for every numbered HTML
//! family); the first registered family whose `supports` holds handles the node.
//!
//! Registration never fails: a family whose configuration is rejected is logged once and
//! left out, and the remaining families keep working.

use crate::builtin;
use crate::error::ConfigError;
use crate::product::Product;
use crate::transform::config::{TableConfig, TransformationConfig};
use crate::transform::hierarchical::HierarchicalTransformer;
use crate::transform::table::TableTransformer;
use crate::transform::{Direction, StructuralFamily};
use crate::tree::{NodeId, Tree};
use log::{debug, error};

/// Ordered set of structural families
///
/// # Examples
///
/// ```ignore
/// let registry = FamilyRegistry::with_defaults();
/// if let Some(family) = registry.find(&tree, node, Direction::AknToHtml) {
///     let products = family.transform(&tree, node, Direction::AknToHtml);
/// }
/// ```
#[derive(Default)]
pub struct FamilyRegistry {
    families: Vec<Box<dyn StructuralFamily>>,
}

impl FamilyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built family after the existing ones
    pub fn register<F: StructuralFamily + 'static>(&mut self, family: F) {
        self.families.push(Box::new(family));
    }

    /// Register `family` if it was built, otherwise log the rejection.
    ///
    /// Returns whether the family was registered.
    pub fn register_or_log<F: StructuralFamily + 'static>(
        &mut self,
        family: Result<F, ConfigError>,
    ) -> bool {
        match family {
            Ok(family) => {
                debug!("registered family '{}'", family.name());
                self.register(family);
                true
            }
            Err(err) => {
                error!("family rejected: {err}");
                false
            }
        }
    }

    pub fn register_hierarchical(&mut self, config: Result<TransformationConfig, ConfigError>) -> bool {
        self.register_or_log(config.and_then(HierarchicalTransformer::new))
    }

    pub fn register_table(&mut self, config: Result<TableConfig, ConfigError>) -> bool {
        self.register_or_log(config.and_then(TableTransformer::new))
    }

    /// First family anchored at `node`
    pub fn find(&self, tree: &Tree, node: NodeId, direction: Direction) -> Option<&dyn StructuralFamily> {
        self.position(tree, node, direction)
            .map(|index| self.families[index].as_ref())
    }

    /// Registration index of the first family anchored at `node`
    pub fn position(&self, tree: &Tree, node: NodeId, direction: Direction) -> Option<usize> {
        self.families
            .iter()
            .position(|family| family.supports(tree, node, direction))
    }

    pub fn get(&self, index: usize) -> Option<&dyn StructuralFamily> {
        self.families.get(index).map(|family| family.as_ref())
    }

    /// Products of the family anchored at `node`, with its name
    pub fn transform(&self, tree: &Tree, node: NodeId, direction: Direction) -> Option<(&str, Vec<Product>)> {
        let family = self.find(tree, node, direction)?;
        Some((family.name(), family.transform(tree, node, direction)))
    }

    /// Family names in priority order
    pub fn names(&self) -> Vec<&str> {
        self.families.iter().map(|family| family.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Create a registry with the built-in families
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for config in builtin::hierarchical() {
            registry.register_hierarchical(config);
        }
        for config in builtin::tables() {
            registry.register_table(config);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::config::{ElementMapping, RootSegment, Selector};

    fn list(tag: &str, unit: &str) -> (Tree, NodeId) {
        let mut tree = Tree::new();
        let list = tree.add_element(None, tag);
        tree.add_element(Some(list), unit);
        (tree, list)
    }

    #[test]
    fn test_registry_creation() {
        let registry = FamilyRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FamilyRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![
                "unordered-list",
                "ordered-list",
                "numbered-paragraph",
                "alinea-mandate",
                "table"
            ]
        );
    }

    #[test]
    fn test_find_by_unit_segment() {
        let registry = FamilyRegistry::with_defaults();

        let (tree, root) = list("list", "indent");
        let family = registry.find(&tree, root, Direction::AknToHtml).unwrap();
        assert_eq!(family.name(), "unordered-list");

        let (tree, root) = list("list", "point");
        let family = registry.find(&tree, root, Direction::AknToHtml).unwrap();
        assert_eq!(family.name(), "ordered-list");

        let (tree, root) = list("list", "blockcontainer");
        assert!(registry.find(&tree, root, Direction::AknToHtml).is_none());
    }

    #[test]
    fn test_find_by_html_marker() {
        let registry = FamilyRegistry::with_defaults();
        let (mut tree, ol) = list("ol", "li");
        assert!(registry.find(&tree, ol, Direction::HtmlToAkn).is_none());

        tree.set_attribute(ol, "data-akn-name", "aknNumberedParagraph");
        let family = registry.find(&tree, ol, Direction::HtmlToAkn).unwrap();
        assert_eq!(family.name(), "numbered-paragraph");
    }

    #[test]
    fn test_invalid_family_is_excluded() {
        let mut registry = FamilyRegistry::new();
        let broken = TransformationConfig::new(
            "broken",
            ElementMapping::new("list", Selector::tag("ul"), Vec::new()),
            vec![RootSegment::from("list"), RootSegment::from("indent")],
            "alinea",
            vec!["ul".into(), "li".into(), "p".into()],
        );
        assert!(!registry.register_hierarchical(broken));
        assert!(registry.register_hierarchical(builtin::unordered_list()));

        assert_eq!(registry.names(), vec!["unordered-list"]);
        let (tree, root) = list("list", "indent");
        let (name, products) = registry.transform(&tree, root, Direction::AknToHtml).unwrap();
        assert_eq!(name, "unordered-list");
        assert!(!products.is_empty());
    }

    #[test]
    fn test_first_registered_family_wins() {
        let shadow = TransformationConfig::new(
            "shadow",
            ElementMapping::new("list", Selector::tag("ul"), Vec::new()),
            vec![RootSegment::from("list"), RootSegment::from("indent")],
            "alinea",
            vec!["ul".into(), "li".into()],
        );

        let mut registry = FamilyRegistry::new();
        registry.register_hierarchical(shadow.clone());
        registry.register_hierarchical(builtin::unordered_list());
        let (tree, root) = list("list", "indent");
        assert_eq!(registry.find(&tree, root, Direction::AknToHtml).unwrap().name(), "shadow");
        assert_eq!(registry.position(&tree, root, Direction::AknToHtml), Some(0));

        let mut registry = FamilyRegistry::new();
        registry.register_hierarchical(builtin::unordered_list());
        registry.register_hierarchical(shadow);
        assert_eq!(
            registry.find(&tree, root, Direction::AknToHtml).unwrap().name(),
            "unordered-list"
        );
    }
}
