//! Breadth-first traversal of an [ArenaForest]

use super::{ArenaForest, ArenaNode, NodeId};
use std::collections::VecDeque;

/// Lazy breadth-first (level-order) iterator. Siblings are visited in insertion order.
pub struct BreadthFirstIterator<'a, Load> {
    forest: &'a ArenaForest<Load>,
    queue: VecDeque<NodeId>,
}

impl<'a, Load> BreadthFirstIterator<'a, Load> {
    pub(super) fn new(forest: &'a ArenaForest<Load>, root: NodeId) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        BreadthFirstIterator { forest, queue }
    }
}

impl<Load> Clone for BreadthFirstIterator<'_, Load> {
    fn clone(&self) -> Self {
        BreadthFirstIterator {
            forest: self.forest,
            queue: self.queue.clone(),
        }
    }
}

impl<'a, Load> Iterator for BreadthFirstIterator<'a, Load> {
    type Item = &'a ArenaNode<Load>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.forest.nodes[self.queue.pop_front()?.0];
        self.queue.extend(node.children.iter().copied());
        Some(node)
    }
}
