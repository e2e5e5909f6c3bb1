//! [Arena memory allocated](https://en.wikipedia.org/wiki/Region-based_memory_management)
//! trees. An [ArenaForest] owns all nodes, which refer to their parent and children through
//! [NodeId] handles instead of references.
//!
//! Traversal is lazy in both directions: [DepthFirstIterator] and [BreadthFirstIterator]
//! borrow the forest, so it cannot be changed while a traversal is running.

pub mod breadth;
pub mod depth;
pub mod forest;
pub mod iterables;
pub mod lineage;

pub use breadth::BreadthFirstIterator;
pub use depth::DepthFirstIterator;
pub use forest::{ArenaForest, ArenaNode, NodeId};
pub use iterables::{NodeLike, Order};
pub use lineage::Ancestors;
