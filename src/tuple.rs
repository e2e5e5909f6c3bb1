//! Immutable, fixed size tuples of values (i.e., the elements of a relation).

use crate::{NaryError, Result};
use core::fmt;
use itertools::Itertools;

/// An ordered, non-empty sequence of values with a fixed dimension.
///
/// Equality and hashing are element-wise, so two tuples are equal if and only if
/// they have the same dimension and hold equal values at every position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple<V> {
    values: Box<[V]>,
}

impl<V> Tuple<V> {
    /// Takes ownership of `values`. Fails if the sequence is empty.
    pub fn new(values: Vec<V>) -> Result<Self> {
        if values.is_empty() {
            return Err(NaryError::EmptyTuple);
        }
        Ok(Tuple {
            values: values.into_boxed_slice(),
        })
    }

    /// Tuple of dimension one
    pub fn single(value: V) -> Self {
        Tuple {
            values: Box::new([value]),
        }
    }

    /// Tuple of dimension two
    pub fn pair(first: V, second: V) -> Self {
        Tuple {
            values: Box::new([first, second]),
        }
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Value at coordinate `index`
    pub fn value(&self, index: usize) -> Result<&V> {
        self.values.get(index).ok_or(NaryError::IndexOutOfBound {
            index,
            dimension: self.dimension(),
        })
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<V> {
        self.values.into_vec()
    }
}

impl<V: Clone> Tuple<V> {
    /// The same values in reverse order. For pairs, `(a, b)` becomes `(b, a)`.
    pub fn reversed(&self) -> Self {
        Tuple {
            values: self.values.iter().rev().cloned().collect(),
        }
    }
}

impl<V> TryFrom<Vec<V>> for Tuple<V> {
    type Error = NaryError;

    fn try_from(values: Vec<V>) -> Result<Self> {
        Tuple::new(values)
    }
}

impl<'a, V> IntoIterator for &'a Tuple<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<V> fmt::Display for Tuple<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.values.iter().join(", "))
    }
}
