//! Depth-first traversal of an [ArenaForest]

use super::{ArenaForest, ArenaNode, NodeId};

/// Lazy depth-first (pre-order) iterator. Children are visited in insertion order.
///
/// Nothing is computed ahead; a new traversal is started by requesting a new iterator
/// (or cloning this one).
pub struct DepthFirstIterator<'a, Load> {
    forest: &'a ArenaForest<Load>,
    stack: Vec<std::slice::Iter<'a, NodeId>>,
    root: Option<NodeId>,
}

impl<'a, Load> DepthFirstIterator<'a, Load> {
    pub(super) fn new(forest: &'a ArenaForest<Load>, root: NodeId) -> Self {
        DepthFirstIterator {
            forest,
            stack: Vec::with_capacity(forest.max_depth),
            root: Some(root),
        }
    }
}

// Derived `Clone` would require `Load: Clone`
impl<Load> Clone for DepthFirstIterator<'_, Load> {
    fn clone(&self) -> Self {
        DepthFirstIterator {
            forest: self.forest,
            stack: self.stack.clone(),
            root: self.root,
        }
    }
}

impl<'a, Load> Iterator for DepthFirstIterator<'a, Load> {
    type Item = &'a ArenaNode<Load>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            let root = &self.forest.nodes[root.0];
            self.stack.push(root.children.iter());
            return Some(root);
        }
        while let Some(last) = self.stack.last_mut() {
            match last.next() {
                Some(child_ref) => {
                    let node = &self.forest.nodes[child_ref.0];
                    self.stack.push(node.children.iter());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
