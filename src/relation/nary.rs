//! Relation of arbitrary (but fixed) dimension backed by a hash set.

use super::Relation;
use crate::{NaryError, Result, Tuple};
use core::fmt;
use itertools::Itertools;
use std::collections::{hash_set, HashSet};
use std::hash::Hash;
use tracing::trace;

/// A set of tuples that all have the same dimension.
#[derive(Debug, Clone)]
pub struct NaryRelation<V> {
    dimension: usize,
    pub(super) tuples: HashSet<Tuple<V>>,
}

impl<V> NaryRelation<V> {
    /// Constructor. Fails for a dimension of zero.
    pub fn new(dimension: usize) -> Result<Self> {
        Self::with_capacity(dimension, 0)
    }

    /// Constructor reserving space for `capacity` tuples.
    pub fn with_capacity(dimension: usize, capacity: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(NaryError::ZeroDimension);
        }
        trace!(dimension, capacity, "Creating relation");
        Ok(NaryRelation {
            dimension,
            tuples: HashSet::with_capacity(capacity),
        })
    }

    /// Infallible constructor for the specializations, which know their dimension is valid.
    pub(super) fn fixed(dimension: usize) -> Self {
        NaryRelation {
            dimension,
            tuples: HashSet::new(),
        }
    }
}

impl<V> NaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    /// Builds a relation from a collection of tuples, failing if any has the wrong dimension
    pub fn from_tuples<I>(dimension: usize, tuples: I) -> Result<Self>
    where
        I: IntoIterator<Item = Tuple<V>>,
    {
        let mut relation = Self::new(dimension)?;
        relation.add_all_tuples(tuples)?;
        Ok(relation)
    }
}

impl<V> Relation<V> for NaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn len(&self) -> usize {
        self.tuples.len()
    }

    fn tuples(&self) -> hash_set::Iter<'_, Tuple<V>> {
        self.tuples.iter()
    }

    fn add(&mut self, tuple: Tuple<V>) -> Result<bool> {
        self.check_dimension(&tuple)?;
        Ok(self.tuples.insert(tuple))
    }

    fn contains(&self, tuple: &Tuple<V>) -> Result<bool> {
        self.check_dimension(tuple)?;
        Ok(self.tuples.contains(tuple))
    }

    fn remove(&mut self, tuple: &Tuple<V>) -> Result<bool> {
        self.check_dimension(tuple)?;
        Ok(self.tuples.remove(tuple))
    }

    fn clear(&mut self) {
        self.tuples.clear();
    }
}

impl<V> PartialEq for NaryRelation<V>
where
    V: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.tuples == other.tuples
    }
}

impl<V> Eq for NaryRelation<V> where V: Eq + Hash {}

impl<'a, V> IntoIterator for &'a NaryRelation<V> {
    type Item = &'a Tuple<V>;
    type IntoIter = hash_set::Iter<'a, Tuple<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.iter()
    }
}

impl<V> IntoIterator for NaryRelation<V> {
    type Item = Tuple<V>;
    type IntoIter = hash_set::IntoIter<Tuple<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tuples.into_iter()
    }
}

impl<V> fmt::Display for NaryRelation<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.tuples.iter().join(", "))
    }
}
