//! Queries that walk the parent links: ancestry, lineage and common roots.

use super::{ArenaForest, NodeId};
use crate::Result;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::debug;
use tracing_attributes::instrument;

/// Iterator from a node up to its root (both inclusive)
pub struct Ancestors<'a, Load> {
    forest: &'a ArenaForest<Load>,
    next: Option<NodeId>,
}

impl<Load> Clone for Ancestors<'_, Load> {
    fn clone(&self) -> Self {
        Ancestors {
            forest: self.forest,
            next: self.next,
        }
    }
}

impl<Load> Iterator for Ancestors<'_, Load> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.forest.nodes[current.0].parent;
        Some(current)
    }
}

impl<Load> ArenaForest<Load> {
    /// Walks from `id` up to the root of its tree. The first item is `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Result<Ancestors<'_, Load>> {
        self.node(id)?;
        Ok(Ancestors {
            forest: self,
            next: Some(id),
        })
    }

    /// Distance to the root. Roots have depth 0.
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        Ok(self.ancestors(id)?.count() - 1)
    }

    /// The root of the tree containing `id`
    pub fn root(&self, id: NodeId) -> Result<NodeId> {
        // `ancestors` always yields at least `id`
        Ok(self.ancestors(id)?.last().unwrap_or(id))
    }

    /// Path from `ancestor` down to `descendant` (both inclusive). Empty if `ancestor` is not
    /// an ancestor of `descendant`. Every node is its own ancestor.
    pub fn lineage(&self, ancestor: NodeId, descendant: NodeId) -> Result<Vec<NodeId>> {
        self.node(ancestor)?;
        let mut path = Vec::with_capacity(self.max_depth);
        for id in self.ancestors(descendant)? {
            path.push(id);
            if id == ancestor {
                path.reverse();
                return Ok(path);
            }
        }
        Ok(vec![])
    }

    /// Whether `node` lies strictly below `ancestor`
    pub fn has_descendant(&self, ancestor: NodeId, node: NodeId) -> Result<bool> {
        self.node(ancestor)?;
        Ok(self.ancestors(node)?.skip(1).contains(&ancestor))
    }

    /// All nodes strictly below `id`, accumulated breadth-wise
    pub fn descendants(&self, id: NodeId) -> Result<HashSet<NodeId>> {
        Ok(self.iter_breadth(id)?.skip(1).map(|node| node.id).collect())
    }

    /// Paths from the root to both nodes, and the length of their shared prefix.
    /// `None` if the nodes are in different trees.
    fn split_lineages(&self, first: NodeId, second: NodeId) -> Result<Option<(Vec<NodeId>, Vec<NodeId>, usize)>> {
        let first_path = self.lineage(self.root(first)?, first)?;
        let second_path = self.lineage(self.root(second)?, second)?;
        if first_path[0] != second_path[0] {
            return Ok(None);
        }
        let shared = first_path
            .iter()
            .zip(second_path.iter())
            .take_while(|(a, b)| a == b)
            .count();
        Ok(Some((first_path, second_path, shared)))
    }

    /// Deepest node that is an ancestor of both nodes. `None` if they are in different trees.
    pub fn common_root(&self, first: NodeId, second: NodeId) -> Result<Option<NodeId>> {
        Ok(self
            .split_lineages(first, second)?
            .map(|(path, _, shared)| path[shared - 1]))
    }
}

impl<Load> ArenaForest<Load>
where
    Load: Clone,
{
    /// Builds the smallest tree connecting the common root of two nodes to each of them.
    ///
    /// The result consists of new, unattached nodes with cloned contents; its root is a copy
    /// of the common root. `None` if the nodes are in different trees.
    #[instrument(level = "debug", skip(self))]
    pub fn extract_subtree(&mut self, first: NodeId, second: NodeId) -> Result<Option<NodeId>> {
        let Some((first_path, second_path, shared)) = self.split_lineages(first, second)? else {
            return Ok(None);
        };
        debug!(
            shared,
            first = first_path.len() - shared,
            second = second_path.len() - shared,
            "Extracting branches"
        );

        let content = self.nodes[first_path[shared - 1].0].content.clone();
        let root = self.push(content);
        for branch in [&first_path[shared..], &second_path[shared..]] {
            let mut current = root;
            for original in branch {
                let content = self.nodes[original.0].content.clone();
                let copy = self.push(content);
                self.link(current, copy);
                current = copy;
            }
        }
        Ok(Some(root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaryError;
    use itertools::Itertools;

    /// Layout
    ///
    /// ```text
    ///       0
    ///      / \
    ///     1   2
    ///    / \   \
    ///   3   4   5
    ///   |
    ///   6          7 (separate tree)
    /// ```
    fn fixture() -> (ArenaForest<usize>, Vec<NodeId>) {
        let mut forest = ArenaForest::new();
        let nodes = (0..8).map(|i| forest.insert(i)).collect_vec();
        for (parent, child) in [(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (3, 6)] {
            forest.add_child(nodes[parent], nodes[child]).unwrap();
        }
        (forest, nodes)
    }

    fn contents(forest: &ArenaForest<usize>, ids: &[NodeId]) -> Vec<usize> {
        ids.iter().map(|id| *forest.content(*id).unwrap().unwrap()).collect()
    }

    #[test_log::test]
    fn test_depth_and_root() {
        let (forest, nodes) = fixture();
        assert_eq!(forest.depth(nodes[0]), Ok(0));
        assert_eq!(forest.depth(nodes[6]), Ok(3));
        assert_eq!(forest.root(nodes[6]), Ok(nodes[0]));
        assert_eq!(forest.root(nodes[7]), Ok(nodes[7]));
        assert_eq!(forest.ancestors(nodes[6]).unwrap().collect_vec(), vec![nodes[6], nodes[3], nodes[1], nodes[0]]);
    }

    #[test_log::test]
    fn test_lineage() {
        let (forest, nodes) = fixture();
        assert_eq!(contents(&forest, &forest.lineage(nodes[0], nodes[6]).unwrap()), vec![0, 1, 3, 6]);
        assert_eq!(forest.lineage(nodes[4], nodes[4]).unwrap(), vec![nodes[4]]);
        assert!(forest.lineage(nodes[2], nodes[6]).unwrap().is_empty());
        assert!(forest.lineage(nodes[6], nodes[0]).unwrap().is_empty());
    }

    #[test_log::test]
    fn test_descendants() {
        let (forest, nodes) = fixture();
        assert_eq!(
            forest.descendants(nodes[1]).unwrap(),
            HashSet::from([nodes[3], nodes[4], nodes[6]])
        );
        assert!(forest.descendants(nodes[7]).unwrap().is_empty());

        assert!(forest.has_descendant(nodes[0], nodes[6]).unwrap());
        assert!(!forest.has_descendant(nodes[6], nodes[6]).unwrap());
        assert!(!forest.has_descendant(nodes[2], nodes[6]).unwrap());
    }

    #[test_log::test]
    fn test_common_root() {
        let (forest, nodes) = fixture();
        assert_eq!(forest.common_root(nodes[6], nodes[4]), Ok(Some(nodes[1])));
        assert_eq!(forest.common_root(nodes[6], nodes[5]), Ok(Some(nodes[0])));
        assert_eq!(forest.common_root(nodes[3], nodes[6]), Ok(Some(nodes[3])));
        assert_eq!(forest.common_root(nodes[4], nodes[4]), Ok(Some(nodes[4])));
        assert_eq!(forest.common_root(nodes[6], nodes[7]), Ok(None));
        assert_eq!(
            forest.common_root(nodes[6], NodeId(99)),
            Err(NaryError::UnknownNode(NodeId(99)))
        );
    }

    #[test_log::test]
    fn test_extract_subtree() {
        let (mut forest, nodes) = fixture();

        //     1
        //    / \
        //   3   4
        //   |
        //   6
        let extracted = forest.extract_subtree(nodes[6], nodes[4]).unwrap().unwrap();
        assert_eq!(forest.parent(extracted), Ok(None));
        assert_eq!(
            forest.iter_depth(extracted).unwrap().map(|n| n.content.unwrap()).collect_vec(),
            vec![1, 3, 6, 4]
        );
        // The original is untouched
        assert_eq!(forest.children(nodes[1]).unwrap(), &[nodes[3], nodes[4]]);

        // One node is an ancestor of the other: a single branch
        let chain = forest.extract_subtree(nodes[0], nodes[5]).unwrap().unwrap();
        assert_eq!(
            forest.iter_depth(chain).unwrap().map(|n| n.content.unwrap()).collect_vec(),
            vec![0, 2, 5]
        );

        assert_eq!(forest.extract_subtree(nodes[5], nodes[7]), Ok(None));
    }
}
