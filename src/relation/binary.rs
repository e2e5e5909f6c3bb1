//! Relation of dimension two and its closure properties.

use super::{NaryRelation, Relation};
use crate::{NaryError, Result, Tuple};
use core::fmt;
use itertools::Itertools;
use std::collections::{hash_set, HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;
use tracing_attributes::instrument;

/// A [NaryRelation] with the dimension fixed to two, i.e., a set of pairs `(a, b)`.
#[derive(Debug, Clone)]
pub struct BinaryRelation<V>(NaryRelation<V>);

/// Both coordinates of a pair. Members of a binary relation always have two values.
fn ends<V>(tuple: &Tuple<V>) -> (&V, &V) {
    let values = tuple.values();
    (&values[0], &values[1])
}

impl<V> BinaryRelation<V> {
    pub fn new() -> Self {
        BinaryRelation(NaryRelation::fixed(2))
    }
}

impl<V> Default for BinaryRelation<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BinaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    pub fn add_pair(&mut self, first: V, second: V) -> bool {
        self.0.tuples.insert(Tuple::pair(first, second))
    }

    pub fn contains_pair(&self, first: &V, second: &V) -> bool {
        self.0
            .tuples
            .contains(&Tuple::pair(first.clone(), second.clone()))
    }

    pub fn remove_pair(&mut self, first: &V, second: &V) -> bool {
        self.0
            .tuples
            .remove(&Tuple::pair(first.clone(), second.clone()))
    }

    /// Iterates over the pairs as `(first, second)`
    pub fn pairs(&self) -> impl Iterator<Item = (&V, &V)> + Clone {
        self.0.tuples.iter().map(ends)
    }

    /// True iff `(a, a)` is a member for every value `a` appearing in the relation
    pub fn is_reflexive(&self) -> bool {
        self.all().iter().all(|value| self.contains_pair(value, value))
    }

    /// True iff every `(a, b)` is matched by `(b, a)`
    pub fn is_symmetric(&self) -> bool {
        self.pairs().all(|(first, second)| self.contains_pair(second, first))
    }

    /// True iff `(a, b)` and `(b, c)` always imply `(a, c)`.
    ///
    /// Builds all required pairs first (quadratic in the number of pairs), then checks
    /// that each is a member.
    #[instrument(level = "trace", skip_all, fields(len = self.len()))]
    pub fn is_transitive(&self) -> bool {
        let required: HashSet<Tuple<V>> = self
            .pairs()
            .cartesian_product(self.pairs())
            .filter(|((_, middle), (start, _))| middle == start)
            .map(|((first, _), (_, last))| Tuple::pair(first.clone(), last.clone()))
            .collect();
        debug!(required = required.len(), "Checking transitive closure");
        required.iter().all(|pair| self.0.tuples.contains(pair))
    }

    /// True iff neither coordinate holds a value twice
    pub fn is_bijection(&self) -> bool {
        self.pairs().map(|(first, _)| first).all_unique() && self.pairs().map(|(_, second)| second).all_unique()
    }

    /// The relation with every pair swapped
    pub fn inverse(&self) -> Self {
        let mut inverse = NaryRelation::fixed(2);
        inverse.tuples = self.0.tuples.iter().map(Tuple::reversed).collect();
        BinaryRelation(inverse)
    }

    /// Builds a map from the first onto the second coordinate.
    /// Fails if the relation is not a function on the first coordinate.
    pub fn map(&self) -> Result<HashMap<V, V>> {
        let mut result = HashMap::with_capacity(self.len());
        for (first, second) in self.pairs() {
            if result.insert(first.clone(), second.clone()).is_some() {
                return Err(NaryError::NotAFunction);
            }
        }
        Ok(result)
    }
}

impl<V> Relation<V> for BinaryRelation<V>
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

impl<V> FromIterator<(V, V)> for BinaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let mut relation = Self::new();
        iter.into_iter().for_each(|(first, second)| {
            relation.add_pair(first, second);
        });
        relation
    }
}

impl<V> PartialEq for BinaryRelation<V>
where
    V: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<V> Eq for BinaryRelation<V> where V: Eq + Hash {}

impl<V> From<BinaryRelation<V>> for NaryRelation<V> {
    fn from(value: BinaryRelation<V>) -> Self {
        value.0
    }
}

impl<V> TryFrom<NaryRelation<V>> for BinaryRelation<V>
where
    V: Eq + Hash + Clone,
{
    type Error = NaryError;

    fn try_from(value: NaryRelation<V>) -> Result<Self> {
        match value.dimension() {
            2 => Ok(BinaryRelation(value)),
            actual => Err(NaryError::DimensionMismatch { expected: 2, actual }),
        }
    }
}

impl<V> fmt::Display for BinaryRelation<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
