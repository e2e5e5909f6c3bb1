//! Relation of dimension one, i.e., a set of values wrapped in tuples.

use super::{NaryRelation, Relation};
use crate::{NaryError, Result, Tuple};
use core::fmt;
use std::collections::{hash_set, HashSet};
use std::hash::Hash;

/// A [NaryRelation] with the dimension fixed to one.
#[derive(Debug, Clone)]
pub struct UnaryRelation<V>(NaryRelation<V>);

impl<V> UnaryRelation<V> {
    pub fn new() -> Self {
        UnaryRelation(NaryRelation::fixed(1))
    }
}

impl<V> Default for UnaryRelation<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> UnaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    pub fn add_value(&mut self, value: V) -> bool {
        self.0.tuples.insert(Tuple::single(value))
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.0.tuples.contains(&Tuple::single(value.clone()))
    }

    pub fn remove_value(&mut self, value: &V) -> bool {
        self.0.tuples.remove(&Tuple::single(value.clone()))
    }

    /// The values of the relation (projection on the only coordinate)
    pub fn values(&self) -> HashSet<V> {
        self.all()
    }
}

impl<V> Relation<V> for UnaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    fn dimension(&self) -> usize {
        self.0.dimension()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn tuples(&self) -> hash_set::Iter<'_, Tuple<V>> {
        self.0.tuples()
    }

    fn add(&mut self, tuple: Tuple<V>) -> Result<bool> {
        self.0.add(tuple)
    }

    fn contains(&self, tuple: &Tuple<V>) -> Result<bool> {
        self.0.contains(tuple)
    }

    fn remove(&mut self, tuple: &Tuple<V>) -> Result<bool> {
        self.0.remove(tuple)
    }

    fn clear(&mut self) {
        self.0.clear()
    }
}

impl<V> FromIterator<V> for UnaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut relation = Self::new();
        iter.into_iter().for_each(|value| {
            relation.add_value(value);
        });
        relation
    }
}

impl<V> PartialEq for UnaryRelation<V>
where
    V: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<V> Eq for UnaryRelation<V> where V: Eq + Hash {}

impl<V> From<UnaryRelation<V>> for NaryRelation<V> {
    fn from(value: UnaryRelation<V>) -> Self {
        value.0
    }
}

impl<V> TryFrom<NaryRelation<V>> for UnaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    type Error = NaryError;

    fn try_from(value: NaryRelation<V>) -> Result<Self> {
        match value.dimension() {
            1 => Ok(UnaryRelation(value)),
            actual => Err(NaryError::DimensionMismatch { expected: 1, actual }),
        }
    }
}

impl<V> fmt::Display for UnaryRelation<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
