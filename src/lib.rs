//! ## About
//!
//! This crate contains generic containers for relational data and hierarchies:
//!
//! * **Relations**: sets of fixed size [Tuple]s with projections, lookups, set algebra and
//!   closure properties (reflexive, symmetric, transitive, bijective). See [NaryRelation],
//!   [UnaryRelation] and [BinaryRelation].
//! * **Trees**: an [arena allocated](https://en.wikipedia.org/wiki/Region-based_memory_management)
//!   forest of multi-way trees with cycle-free linking, lineage queries, sub-tree extraction and
//!   lazy depth-/breadth-first traversal. See [ArenaForest] to get started.
//!
//! ## Naming conventions
//! * Traits – adjectives that indicate capability and behavior
//! * Structs – substantives that indicate entities implementing a behavior
//! * Methods – imperative forms, except for getters and factories, which use substantives
//!             (i.e., omit a `get_` prefix) much like the standard library.

pub mod arena;
pub mod errors;
pub mod relation;
pub mod tuple;

pub use arena::{
    Ancestors, ArenaForest, ArenaNode, BreadthFirstIterator, DepthFirstIterator, NodeId, NodeLike, Order,
    Order::{BreadthFirst, DepthFirst},
};
pub use errors::{NaryError, Result};
pub use relation::{BinaryRelation, NaryRelation, Relation, UnaryRelation};
pub use tuple::Tuple;
