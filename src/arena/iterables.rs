//! Definition of the interfaces for tree nodes and iteration

use super::NodeId;

/// Order of iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    DepthFirst,
    BreadthFirst,
}

/// Container that holds data in an [ArenaForest](super::ArenaForest)
pub trait NodeLike<Load> {
    fn is_leaf(&self) -> bool;

    /// The content may be absent
    fn content(&self) -> Option<&Load>;

    fn id(&self) -> NodeId;

    /// `None` for roots (i.e., unattached nodes)
    fn parent(&self) -> Option<NodeId>;

    /// Read-only; links are changed through the forest
    fn children(&self) -> &[NodeId];
}
