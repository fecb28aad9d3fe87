//! Directional attribute mapping
//!
//! A correspondence list is compiled once per direction into an ordered list of
//! [`AttrRule`]s. Applying the rules to a node never fails: an absent source attribute simply
//! produces no entry.

use super::config::AttrCorrespondence;
use super::Direction;
use crate::product::Attribute;
use crate::tree::{NodeId, Tree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrRule {
    /// Copy the source attribute value when present
    Pass { from: String, to: String },
    /// Always emit a literal value
    Fixed { to: String, value: String },
    /// Copy an attribute of the nearest ancestor named `ancestor`
    Inherit {
        ancestor: String,
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    rules: Vec<AttrRule>,
}

impl AttributeMap {
    pub fn new(rules: Vec<AttrRule>) -> Self {
        Self { rules }
    }

    /// Compile correspondences for one direction.
    ///
    /// Entries without a target side are dropped. A target written as `name=value` becomes a
    /// fixed rule; a source written that way can never be read and the entry is dropped.
    pub fn compile(correspondences: &[AttrCorrespondence], direction: Direction) -> Self {
        let rules = correspondences
            .iter()
            .filter_map(|entry| {
                let (source, target) = match direction {
                    Direction::AknToHtml => (entry.akn.as_deref(), entry.html.as_deref()),
                    Direction::HtmlToAkn => (entry.html.as_deref(), entry.akn.as_deref()),
                };
                let target = target?;
                if let Some((to, value)) = target.split_once('=') {
                    return Some(AttrRule::Fixed {
                        to: to.to_string(),
                        value: value.to_string(),
                    });
                }
                let source = source.filter(|source| !source.contains('='))?;
                Some(AttrRule::Pass {
                    from: source.to_string(),
                    to: target.to_string(),
                })
            })
            .collect();
        Self { rules }
    }

    /// Pass rules for a table of `(akn, html)` name pairs
    pub fn pairs(pairs: &[(&str, &str)], direction: Direction) -> Self {
        Self::compile(&AttrCorrespondence::from_pairs(pairs), direction)
    }

    /// Rules reading `(akn, html)` pairs from the nearest `ancestor`, writing the HTML side.
    pub fn inherit(ancestor: &str, pairs: &[(&str, &str)]) -> Self {
        let rules = pairs
            .iter()
            .map(|(akn, html)| AttrRule::Inherit {
                ancestor: ancestor.to_string(),
                from: akn.to_string(),
                to: html.to_string(),
            })
            .collect();
        Self { rules }
    }

    /// Concatenate two maps, keeping rule order
    pub fn chain(mut self, other: AttributeMap) -> Self {
        self.rules.extend(other.rules);
        self
    }

    pub fn rules(&self) -> &[AttrRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the rules against `node`
    pub fn apply(&self, tree: &Tree, node: NodeId) -> Vec<Attribute> {
        self.rules
            .iter()
            .filter_map(|rule| match rule {
                AttrRule::Pass { from, to } => tree
                    .attribute(node, from)
                    .map(|value| Attribute::new(to.as_str(), value)),
                AttrRule::Fixed { to, value } => Some(Attribute::new(to.as_str(), value.as_str())),
                AttrRule::Inherit { ancestor, from, to } => tree
                    .ancestor_named(node, ancestor)
                    .and_then(|found| tree.attribute(found, from))
                    .map(|value| Attribute::new(to.as_str(), value)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correspondences() -> Vec<AttrCorrespondence> {
        vec![
            AttrCorrespondence::pass("leos:editable", "contenteditable"),
            AttrCorrespondence::pass("xml:id", "id"),
            AttrCorrespondence::html_only("data-akn-name=aknUnorderedList"),
        ]
    }

    #[test]
    fn test_compile_akn_to_html() {
        let map = AttributeMap::compile(&correspondences(), Direction::AknToHtml);
        assert_eq!(
            map.rules(),
            &[
                AttrRule::Pass {
                    from: "leos:editable".into(),
                    to: "contenteditable".into()
                },
                AttrRule::Pass {
                    from: "xml:id".into(),
                    to: "id".into()
                },
                AttrRule::Fixed {
                    to: "data-akn-name".into(),
                    value: "aknUnorderedList".into()
                },
            ]
        );
    }

    #[test]
    fn test_compile_html_to_akn_drops_fixed_sources() {
        let map = AttributeMap::compile(&correspondences(), Direction::HtmlToAkn);
        assert_eq!(map.rules().len(), 2);
        assert!(map
            .rules()
            .iter()
            .all(|rule| matches!(rule, AttrRule::Pass { .. })));
    }

    #[test]
    fn test_absent_attributes_are_omitted() {
        let mut tree = Tree::new();
        let ul = tree.add_element(None, "ul");
        tree.set_attribute(ul, "id", "l1");

        let map = AttributeMap::compile(&correspondences(), Direction::HtmlToAkn);
        assert_eq!(map.apply(&tree, ul), vec![Attribute::new("xml:id", "l1")]);
    }

    #[test]
    fn test_fixed_values_are_always_emitted() {
        let mut tree = Tree::new();
        let list = tree.add_element(None, "list");

        let map = AttributeMap::compile(&correspondences(), Direction::AknToHtml);
        assert_eq!(
            map.apply(&tree, list),
            vec![Attribute::new("data-akn-name", "aknUnorderedList")]
        );
    }

    #[test]
    fn test_inherit_reads_nearest_ancestor() {
        let mut tree = Tree::new();
        let alinea = tree.add_element(None, "alinea");
        tree.set_attribute(alinea, "xml:id", "a1");
        let content = tree.add_element(Some(alinea), "content");
        tree.set_attribute(content, "xml:id", "c1");
        let mp = tree.add_element(Some(content), "mp");

        let map = AttributeMap::inherit("alinea", &[("xml:id", "id"), ("leos:origin", "data-origin")])
            .chain(AttributeMap::inherit("content", &[("xml:id", "data-akn-wrapped-content-id")]));
        assert_eq!(
            map.apply(&tree, mp),
            vec![
                Attribute::new("id", "a1"),
                Attribute::new("data-akn-wrapped-content-id", "c1"),
            ]
        );
    }

    #[test]
    fn test_pairs_follow_direction() {
        let to_html = AttributeMap::pairs(&[("xml:id", "data-akn-num-id")], Direction::AknToHtml);
        let to_akn = AttributeMap::pairs(&[("xml:id", "data-akn-num-id")], Direction::HtmlToAkn);
        assert_eq!(
            to_html.rules(),
            &[AttrRule::Pass {
                from: "xml:id".into(),
                to: "data-akn-num-id".into()
            }]
        );
        assert_eq!(
            to_akn.rules(),
            &[AttrRule::Pass {
                from: "data-akn-num-id".into(),
                to: "xml:id".into()
            }]
        );
    }
}
