//! Implementation of an [arena allocated](https://en.wikipedia.org/wiki/Region-based_memory_management)
//! forest of multi-way trees. Nodes reference each other through [NodeId] handles,
//! the arena owns all of them.

use super::iterables::{NodeLike, Order};
use super::{BreadthFirstIterator, DepthFirstIterator};
use crate::{NaryError, Result};
use core::fmt;
use itertools::Itertools;
use tracing::trace;
use tracing_attributes::instrument;

/// Handle of a node in an [ArenaForest].
///
/// Handles are only meaningful for the forest that issued them.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    /// Position in the arena
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node structure to be used in an arena allocated tree.
#[derive(Debug, Clone)]
pub struct ArenaNode<Load> {
    /// The user-defined content the node owns
    pub(super) content: Option<Load>,
    /// Index in the arena allocation
    pub(super) id: NodeId,
    /// References to the children in insertion order
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
}

impl<Load> NodeLike<Load> for ArenaNode<Load> {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn content(&self) -> Option<&Load> {
        self.content.as_ref()
    }

    fn id(&self) -> NodeId {
        self.id
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl<Load> fmt::Display for ArenaNode<Load>
where
    Load: fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.content {
            Some(content) => write!(f, "Node {}, children: [{}], content: {}", self.id, self.children.iter().join(", "), content),
            None => write!(f, "Node {}, children: [{}], no content", self.id, self.children.iter().join(", ")),
        }
    }
}

/// Arena holding a forest of disjoint, rooted trees.
///
/// Nodes are created unattached (i.e., as roots of their own tree) and linked with
/// [ArenaForest::add_child]. The forest guarantees that a node has at most one parent and
/// that no link closes a cycle. Nodes are never freed; detaching a node turns it into a
/// root again.
#[derive(Debug, Clone)]
pub struct ArenaForest<Load> {
    /// Memory allocated area for nodes
    pub(super) nodes: Vec<ArenaNode<Load>>,

    /// Expected depth of the trees. Only used to pre-allocate traversal stacks.
    pub(super) max_depth: usize,
}

impl<Load> Default for ArenaForest<Load> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Load> ArenaForest<Load> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructor. Reserves memory for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        ArenaForest {
            nodes: Vec::with_capacity(capacity),
            max_depth: 42,
        }
    }

    /// Sets the depth hint used to pre-allocate traversal stacks
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Number of nodes in all trees
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[ArenaNode<Load>] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Result<&ArenaNode<Load>> {
        self.nodes.get(id.0).ok_or(NaryError::UnknownNode(id))
    }

    /// Creates a new, unattached node
    pub fn insert(&mut self, content: Load) -> NodeId {
        self.push(Some(content))
    }

    /// Creates a new, unattached node without content
    pub fn insert_empty(&mut self) -> NodeId {
        self.push(None)
    }

    pub(super) fn push(&mut self, content: Option<Load>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ArenaNode {
            content,
            id,
            children: vec![],
            parent: None,
        });
        id
    }

    /// Links two nodes without any check. Callers guarantee that `child` is a fresh root.
    pub(super) fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    pub fn content(&self, id: NodeId) -> Result<Option<&Load>> {
        Ok(self.node(id)?.content.as_ref())
    }

    /// Replaces the content and returns the previous one
    pub fn set_content(&mut self, id: NodeId, content: Option<Load>) -> Result<Option<Load>> {
        self.node(id)?;
        Ok(std::mem::replace(&mut self.nodes[id.0].content, content))
    }

    /// Read-only view on the children. Use [ArenaForest::add_child] and
    /// [ArenaForest::remove_child] to change them.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn has_children(&self, id: NodeId) -> Result<bool> {
        Ok(!self.node(id)?.children.is_empty())
    }

    /// Whether `child` is a direct child of `parent`
    pub fn has_child(&self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.node(child)?;
        Ok(self.node(parent)?.children.contains(&child))
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn has_parent(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.parent.is_some())
    }

    /// Unattached nodes, i.e., the roots of all trees in the forest
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|node| node.parent.is_none()).map(|node| node.id)
    }

    /// Fails if linking `child` below `parent` would give it a second parent or close a cycle
    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let circular = NaryError::CircularReference { parent, child };
        if child == parent || self.node(child)?.parent.is_some() {
            return Err(circular);
        }
        // An unattached node is an ancestor of `parent` only if it is its root
        if self.root(parent)? == child {
            return Err(circular);
        }
        Ok(())
    }

    /// Attaches `child` to `parent`.
    ///
    /// Fails with [NaryError::CircularReference] if `child` already has a parent, is `parent`
    /// itself, or is an ancestor of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.check_attachable(parent, child)?;
        self.link(parent, child);
        Ok(())
    }

    /// Detaches `child` from `parent`, turning it into a root.
    ///
    /// Fails with [NaryError::NotAChild] if `child` is not currently a child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(child)?;
        let position = self
            .node(parent)?
            .children
            .iter()
            .position(|id| *id == child)
            .ok_or(NaryError::NotAChild { parent, child })?;
        self.nodes[parent.0].children.remove(position);
        self.nodes[child.0].parent = None;
        Ok(())
    }

    /// Replaces all children of `parent`. The previous children become roots.
    ///
    /// Every new child is checked like in [ArenaForest::add_child] (current children of
    /// `parent` may be listed again). Nothing changes if a check fails.
    #[instrument(level = "debug", skip(self))]
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> Result<()> {
        self.node(parent)?;
        if let Some(duplicate) = children.iter().duplicates().next() {
            return Err(NaryError::DuplicateChild(*duplicate));
        }
        for &child in children {
            if self.node(child)?.parent != Some(parent) {
                self.check_attachable(parent, child)?;
            }
        }

        let previous = std::mem::take(&mut self.nodes[parent.0].children);
        trace!(previous = previous.len(), new = children.len(), "Replacing children");
        for child in previous {
            self.nodes[child.0].parent = None;
        }
        for &child in children {
            self.link(parent, child);
        }
        Ok(())
    }

    /// Lazy depth-first (pre-order) traversal of the tree below (and including) `root`.
    /// Children are visited in insertion order.
    pub fn iter_depth(&self, root: NodeId) -> Result<DepthFirstIterator<'_, Load>> {
        self.node(root)?;
        Ok(DepthFirstIterator::new(self, root))
    }

    /// Lazy breadth-first (level-order) traversal of the tree below (and including) `root`.
    pub fn iter_breadth(&self, root: NodeId) -> Result<BreadthFirstIterator<'_, Load>> {
        self.node(root)?;
        Ok(BreadthFirstIterator::new(self, root))
    }

    /// Traversal in the given [Order]
    pub fn iter(&self, order: Order, root: NodeId) -> Result<Box<dyn Iterator<Item = &ArenaNode<Load>> + '_>> {
        Ok(match order {
            Order::DepthFirst => Box::new(self.iter_depth(root)?),
            Order::BreadthFirst => Box::new(self.iter_breadth(root)?),
        })
    }
}

impl<Load> ArenaForest<Load>
where
    Load: Clone,
{
    /// Deep structural copy of the tree below `id`.
    ///
    /// Creates new nodes with cloned contents. The copy is an unattached root.
    #[instrument(level = "debug", skip(self))]
    pub fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId> {
        let content = self.node(id)?.content.clone();
        let copy = self.push(content);
        let mut stack = Vec::with_capacity(self.max_depth);
        stack.push((id, copy));

        while let Some((original, copy)) = stack.pop() {
            let children = self.nodes[original.0].children.clone();
            for child in children {
                let content = self.nodes[child.0].content.clone();
                let child_copy = self.push(content);
                self.link(copy, child_copy);
                stack.push((child, child_copy));
            }
        }
        Ok(copy)
    }
}

impl<Load> ArenaForest<Load>
where
    Load: PartialEq,
{
    /// Whether the trees below `first` and `second` have equal contents and the same shape.
    /// The order of the children is not significant.
    ///
    /// Children are matched greedily against the unmatched children of the other node. The
    /// comparison keeps its own stack of pending matches, so deep trees are fine.
    pub fn subtree_eq(&self, first: NodeId, second: NodeId) -> Result<bool> {
        self.node(first)?;
        self.node(second)?;
        let Some(matching) = self.matching(first, second) else {
            return Ok(false);
        };
        let mut stack = Vec::with_capacity(self.max_depth);
        stack.push(matching);

        // Outcome of the last finished comparison, consumed by the frame below it
        let mut outcome = None;
        while let Some(frame) = stack.last_mut() {
            match outcome.take() {
                Some(true) => {
                    frame.unmatched.swap_remove(frame.candidate);
                    frame.child = None;
                }
                Some(false) => frame.candidate += 1,
                None => {}
            }

            let child = match frame.child {
                Some(child) => child,
                None => match frame.children.next() {
                    Some(&child) => {
                        frame.child = Some(child);
                        frame.candidate = 0;
                        child
                    }
                    None => {
                        stack.pop();
                        outcome = Some(true);
                        continue;
                    }
                },
            };
            let Some(&candidate) = frame.unmatched.get(frame.candidate) else {
                stack.pop();
                outcome = Some(false);
                continue;
            };
            match self.matching(child, candidate) {
                Some(matching) => stack.push(matching),
                None => outcome = Some(false),
            }
        }
        Ok(outcome == Some(true))
    }

    /// Starts matching the children of two nodes. `None` if contents or child counts differ.
    fn matching(&self, first: NodeId, second: NodeId) -> Option<Matching<'_>> {
        let (a, b) = (&self.nodes[first.0], &self.nodes[second.0]);
        if a.content != b.content || a.children.len() != b.children.len() {
            return None;
        }
        Some(Matching {
            children: a.children.iter(),
            child: None,
            unmatched: b.children.clone(),
            candidate: 0,
        })
    }
}

/// Pending comparison in [ArenaForest::subtree_eq]
struct Matching<'a> {
    children: std::slice::Iter<'a, NodeId>,
    /// Child currently looking for a partner
    child: Option<NodeId>,
    unmatched: Vec<NodeId>,
    /// Position in `unmatched` being compared to `child`
    candidate: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test_log::test]
    fn test_attach_and_detach() {
        let mut forest = ArenaForest::new();
        let root = forest.insert("root");
        let first = forest.insert("first");
        let second = forest.insert("second");

        forest.add_child(root, first).unwrap();
        assert_eq!(forest.parent(first), Ok(Some(root)));
        assert!(forest.has_child(root, first).unwrap());
        assert!(forest.has_children(root).unwrap());
        assert!(!forest.has_children(first).unwrap());

        // Second parent
        assert_eq!(
            forest.add_child(second, first),
            Err(NaryError::CircularReference { parent: second, child: first })
        );
        // Self
        assert!(forest.add_child(second, second).is_err());
        // Ancestor below its descendant
        assert_eq!(
            forest.add_child(first, root),
            Err(NaryError::CircularReference { parent: first, child: root })
        );
        assert_eq!(forest.children(root).unwrap(), &[first]);
        assert!(forest.children(first).unwrap().is_empty());

        assert_eq!(
            forest.remove_child(second, first),
            Err(NaryError::NotAChild { parent: second, child: first })
        );
        forest.remove_child(root, first).unwrap();
        assert!(!forest.has_parent(first).unwrap());
        assert_eq!(forest.roots().collect_vec(), vec![root, first, second]);

        forest.add_child(second, first).unwrap();
        assert_eq!(forest.parent(first), Ok(Some(second)));
    }

    #[test_log::test]
    fn test_unknown_nodes() {
        let mut forest = ArenaForest::<i32>::new();
        let node = forest.insert(1);
        let unknown = NodeId(42);

        assert_eq!(forest.content(unknown), Err(NaryError::UnknownNode(unknown)));
        assert_eq!(forest.add_child(node, unknown), Err(NaryError::UnknownNode(unknown)));
        assert_eq!(forest.add_child(unknown, node), Err(NaryError::UnknownNode(unknown)));
        assert!(forest.iter_depth(unknown).is_err());
    }

    #[test_log::test]
    fn test_content() {
        let mut forest = ArenaForest::with_capacity(2);
        let full = forest.insert(String::from("full"));
        let empty = forest.insert_empty();

        assert_eq!(forest.content(full).unwrap().map(String::as_str), Some("full"));
        assert_eq!(forest.content(empty), Ok(None));
        assert_eq!(forest.set_content(full, None), Ok(Some(String::from("full"))));
        assert_eq!(forest.set_content(empty, Some(String::from("now"))), Ok(None));
        assert_eq!(forest.node(empty).unwrap().content(), Some(&String::from("now")));
        assert_eq!(forest.node(full).unwrap().to_string(), "Node #0, children: [], no content");
    }

    #[test_log::test]
    fn test_set_children() {
        let mut forest = ArenaForest::new();
        let root = forest.insert(0);
        let nodes = (1..=4).map(|i| forest.insert(i)).collect_vec();

        forest.set_children(root, &nodes[..2]).unwrap();
        assert_eq!(forest.children(root).unwrap(), &nodes[..2]);

        // Keeps the second child, drops the first
        forest.set_children(root, &nodes[1..3]).unwrap();
        assert_eq!(forest.children(root).unwrap(), &nodes[1..3]);
        assert_eq!(forest.parent(nodes[0]), Ok(None));
        assert_eq!(forest.parent(nodes[2]), Ok(Some(root)));

        // Failing checks leave the children untouched
        assert_eq!(
            forest.set_children(root, &[nodes[3], nodes[3]]),
            Err(NaryError::DuplicateChild(nodes[3]))
        );
        forest.add_child(nodes[0], nodes[3]).unwrap();
        assert!(forest.set_children(root, &[nodes[3]]).is_err());
        assert!(forest.set_children(root, &[root]).is_err());
        assert_eq!(forest.children(root).unwrap(), &nodes[1..3]);

        forest.set_children(root, &[]).unwrap();
        assert!(forest.node(root).unwrap().is_leaf());
    }

    #[test_log::test]
    fn test_clone_subtree() {
        //     0
        //    / \
        //   1   2
        //   |
        //   3
        let mut forest = ArenaForest::new();
        let nodes = (0..4).map(|i| forest.insert(i)).collect_vec();
        forest.add_child(nodes[0], nodes[1]).unwrap();
        forest.add_child(nodes[0], nodes[2]).unwrap();
        forest.add_child(nodes[1], nodes[3]).unwrap();

        let copy = forest.clone_subtree(nodes[0]).unwrap();
        assert_eq!(forest.len(), 8);
        assert_ne!(copy, nodes[0]);
        assert_eq!(forest.parent(copy), Ok(None));
        assert!(forest.subtree_eq(copy, nodes[0]).unwrap());

        // Changing the copy leaves the original untouched
        let copied_children = forest.children(copy).unwrap().to_vec();
        forest.remove_child(copy, copied_children[0]).unwrap();
        assert_eq!(forest.children(nodes[0]).unwrap(), &nodes[1..3]);
        assert!(!forest.subtree_eq(copy, nodes[0]).unwrap());

        // Order of children does not matter, contents do
        forest.add_child(copy, copied_children[0]).unwrap();
        assert!(forest.subtree_eq(copy, nodes[0]).unwrap());
        forest.set_content(copied_children[0], Some(7)).unwrap();
        assert!(!forest.subtree_eq(copy, nodes[0]).unwrap());
    }

    #[test_log::test]
    fn test_subtree_eq_deep_chain() {
        const DEPTH: usize = 150_000;
        let mut forest = ArenaForest::with_capacity(2 * DEPTH);
        let nodes = (0..DEPTH).map(|i| forest.insert(i)).collect_vec();
        // Linked bottom-up so that every parent is still a root when attaching
        for (parent, child) in nodes.iter().tuple_windows().collect_vec().into_iter().rev() {
            forest.add_child(*parent, *child).unwrap();
        }

        let copy = forest.clone_subtree(nodes[0]).unwrap();
        assert!(forest.subtree_eq(nodes[0], copy).unwrap());
        assert!(forest.subtree_eq(copy, nodes[0]).unwrap());
        assert!(!forest.subtree_eq(nodes[0], nodes[1]).unwrap());

        let leaf = forest.iter_depth(copy).unwrap().last().unwrap().id();
        forest.set_content(leaf, Some(DEPTH)).unwrap();
        assert!(!forest.subtree_eq(nodes[0], copy).unwrap());
    }

    #[test_log::test]
    fn test_subtree_eq_backtracks_over_candidates() {
        //   a        b
        //  / \      / \
        // 1   1    1   1
        // |            |
        // 2            2
        // The first candidate for a's first child does not fit, the second one does
        let mut forest = ArenaForest::new();
        let [a, a1, a2, a3] = [0, 1, 1, 2].map(|i| forest.insert(i));
        let [b, b1, b2, b3] = [0, 1, 1, 2].map(|i| forest.insert(i));
        forest.set_children(a, &[a1, a2]).unwrap();
        forest.add_child(a1, a3).unwrap();
        forest.set_children(b, &[b1, b2]).unwrap();
        forest.add_child(b2, b3).unwrap();

        assert!(forest.subtree_eq(a, b).unwrap());
        forest.set_content(b3, Some(3)).unwrap();
        assert!(!forest.subtree_eq(a, b).unwrap());
        assert_eq!(forest.subtree_eq(a, NodeId(99)), Err(NaryError::UnknownNode(NodeId(99))));
    }
}
