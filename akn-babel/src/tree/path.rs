//! Hierarchical paths relative to a transformation root.
//!
//! A path is the slash-joined sequence of lower-cased element names from the transformation
//! root (inclusive) down to the node; text nodes contribute `text`. For
//! `<ul><li>one</li></ul>` transformed from `ul`, the text node's path is `ul/li/text`.
//!
//! Paths are kept in a side table owned by the walk instead of on the nodes, so computing them
//! never mutates the caller's tree. Each entry is derived from the parent's cached entry, which
//! keeps the cost amortized O(1) per node across a full pre-order walk.

use super::{NodeId, Tree};
use std::collections::HashMap;

/// Side table of computed paths for one transformation root.
#[derive(Debug, Clone)]
pub struct PathCache {
    root: NodeId,
    paths: HashMap<NodeId, String>,
}

impl PathCache {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            paths: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Path of `node`, computing and caching it and any missing ancestors.
    ///
    /// Nodes outside the root's subtree get a path starting at their own top-level ancestor.
    pub fn path(&mut self, tree: &Tree, node: NodeId) -> &str {
        if !self.paths.contains_key(&node) {
            let mut missing = Vec::new();
            let mut current = Some(node);
            while let Some(id) = current {
                if self.paths.contains_key(&id) {
                    break;
                }
                missing.push(id);
                current = if id == self.root {
                    None
                } else {
                    tree.parent(id)
                };
            }

            let mut prefix = current.and_then(|id| self.paths.get(&id)).cloned();
            for id in missing.into_iter().rev() {
                let path = match prefix {
                    Some(parent) => format!("{parent}/{}", tree.name(id)),
                    None => tree.name(id).to_string(),
                };
                self.paths.insert(id, path.clone());
                prefix = Some(path);
            }
        }
        &self.paths[&node]
    }

    #[cfg(test)]
    fn is_cached(&self, node: NodeId) -> bool {
        self.paths.contains_key(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list_tree() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let wrapper = tree.add_element(None, "body");
        let list = tree.add_element(Some(wrapper), "list");
        let indent = tree.add_element(Some(list), "indent");
        let num = tree.add_element(Some(indent), "num");
        let text = tree.add_text(Some(num), "1.");
        (tree, list, indent, text)
    }

    #[test]
    fn test_path_is_relative_to_root() {
        let (tree, list, indent, text) = list_tree();
        let mut paths = PathCache::new(list);
        assert_eq!(paths.path(&tree, list), "list");
        assert_eq!(paths.path(&tree, indent), "list/indent");
        assert_eq!(paths.path(&tree, text), "list/indent/num/text");
    }

    #[test]
    fn test_path_caches_ancestors() {
        let (tree, list, indent, text) = list_tree();
        let mut paths = PathCache::new(list);
        paths.path(&tree, text);
        assert!(paths.is_cached(indent));
        assert!(paths.is_cached(list));
    }

    #[test]
    fn test_fresh_cache_gives_same_path() {
        let (tree, list, indent, text) = list_tree();
        let mut warm = PathCache::new(list);
        warm.path(&tree, indent);
        let mut cold = PathCache::new(list);
        assert_eq!(warm.path(&tree, text), cold.path(&tree, text));
    }

    const NAMES: [&str; 6] = ["list", "indent", "content", "mp", "b", "text"];

    fn build(shape: &[(usize, usize)]) -> Tree {
        let mut tree = Tree::new();
        let root = tree.add_element(None, "root");
        let mut elements = vec![root];
        for &(parent, name) in shape {
            let parent = elements[parent % elements.len()];
            let name = NAMES[name % NAMES.len()];
            if name == "text" {
                tree.add_text(Some(parent), "x");
            } else {
                elements.push(tree.add_element(Some(parent), name));
            }
        }
        tree
    }

    proptest! {
        #[test]
        fn path_extends_parent_path(shape in prop::collection::vec((0usize..64, 0usize..6), 0..40)) {
            let tree = build(&shape);
            let root = tree.root().unwrap();
            let mut paths = PathCache::new(root);
            for node in tree.walk(root).collect::<Vec<_>>() {
                let path = paths.path(&tree, node).to_string();
                match tree.parent(node) {
                    Some(parent) => {
                        let expected = format!("{}/{}", paths.path(&tree, parent), tree.name(node));
                        prop_assert_eq!(path, expected);
                    }
                    None => prop_assert_eq!(path, "root"),
                }
            }
        }

        #[test]
        fn path_is_stable_across_fresh_caches(shape in prop::collection::vec((0usize..64, 0usize..6), 0..40)) {
            let tree = build(&shape);
            let root = tree.root().unwrap();
            let nodes: Vec<_> = tree.walk(root).collect();
            let mut forward = PathCache::new(root);
            let mut backward = PathCache::new(root);
            let first: Vec<String> = nodes.iter().map(|&n| forward.path(&tree, n).to_string()).collect();
            let second: Vec<String> = nodes.iter().rev().map(|&n| backward.path(&tree, n).to_string()).collect();
            let second: Vec<String> = second.into_iter().rev().collect();
            prop_assert_eq!(first, second);
        }
    }
}
