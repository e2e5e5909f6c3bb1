//! Provides the error type used throughout this crate.

use crate::arena::NodeId;
use thiserror::Error;

/// Shortcut for results carrying a [NaryError]
pub type Result<T> = std::result::Result<T, NaryError>;

/// The error type used throughout this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NaryError {
    // Tuples and relations
    #[error("A tuple needs at least one value")]
    EmptyTuple,
    #[error("A relation needs a dimension of at least one")]
    ZeroDimension,
    #[error("Wrong tuple dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Index {index} is out of bound for dimension {dimension}")]
    IndexOutOfBound { index: usize, dimension: usize },
    #[error("Relation is not a function on its first coordinate")]
    NotAFunction,

    // Trees
    #[error("Node not in arena: {0}")]
    UnknownNode(NodeId),
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("Node {0} is listed more than once")]
    DuplicateChild(NodeId),
    #[error("Cannot attach {child} to {parent}: already attached or would close a cycle")]
    CircularReference { parent: NodeId, child: NodeId },
}
