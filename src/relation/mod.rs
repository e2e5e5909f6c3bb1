//! Relations, i.e., sets of [Tuple]s sharing a common dimension.
//!
//! [NaryRelation] holds tuples of any (fixed) dimension. [UnaryRelation] and [BinaryRelation]
//! wrap it with the dimension fixed to one and two respectively and add the predicates
//! that only make sense for these (e.g., reflexivity or the inverse of a binary relation).
//!
//! All three implement the [Relation] interface. Bulk operations (`add_all`, `retain_all`, ...)
//! take a relation of the *same* type, so mixing kinds is rejected by the compiler. Two n-ary
//! relations of different dimensions are rejected at runtime with
//! [NaryError::DimensionMismatch].

pub mod binary;
pub mod nary;
pub mod unary;

pub use binary::BinaryRelation;
pub use nary::NaryRelation;
pub use unary::UnaryRelation;

use crate::{NaryError, Result, Tuple};
use itertools::Itertools;
use std::collections::{hash_set, HashSet};
use std::hash::Hash;
use tracing_attributes::instrument;

/// Common interface of all relations.
///
/// Implementors provide storage and the single-tuple operations; projections, lookups and
/// the bulk set algebra are derived from those.
pub trait Relation<V>
where
    V: Eq + Hash + Clone,
{
    /// Dimension every member tuple has
    fn dimension(&self) -> usize;

    /// Number of tuples
    fn len(&self) -> usize;

    /// Iterates over the tuples in no particular order
    fn tuples(&self) -> hash_set::Iter<'_, Tuple<V>>;

    /// Inserts a tuple if absent. Returns whether the relation changed.
    fn add(&mut self, tuple: Tuple<V>) -> Result<bool>;

    fn contains(&self, tuple: &Tuple<V>) -> Result<bool>;

    /// Removes a tuple. Returns whether the relation changed.
    fn remove(&mut self, tuple: &Tuple<V>) -> Result<bool>;

    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails unless `tuple` has the relation's dimension
    fn check_dimension(&self, tuple: &Tuple<V>) -> Result<()> {
        if tuple.dimension() == self.dimension() {
            Ok(())
        } else {
            Err(NaryError::DimensionMismatch {
                expected: self.dimension(),
                actual: tuple.dimension(),
            })
        }
    }

    /// Fails unless `index` is a valid coordinate
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.dimension() {
            Ok(())
        } else {
            Err(NaryError::IndexOutOfBound {
                index,
                dimension: self.dimension(),
            })
        }
    }

    /// Fails unless `other` has the same dimension, even if it is empty
    fn check_same_dimension(&self, other: &Self) -> Result<()>
    where
        Self: Sized,
    {
        if other.dimension() == self.dimension() {
            Ok(())
        } else {
            Err(NaryError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            })
        }
    }

    fn add_values(&mut self, values: Vec<V>) -> Result<bool> {
        self.add(Tuple::new(values)?)
    }

    fn contains_values(&self, values: &[V]) -> Result<bool> {
        self.contains(&Tuple::new(values.to_vec())?)
    }

    fn remove_values(&mut self, values: &[V]) -> Result<bool> {
        self.remove(&Tuple::new(values.to_vec())?)
    }

    /// Inserts every tuple of the collection. Nothing is inserted if one of them has the
    /// wrong dimension.
    #[instrument(level = "trace", skip_all)]
    fn add_all_tuples<I>(&mut self, tuples: I) -> Result<bool>
    where
        I: IntoIterator<Item = Tuple<V>>,
        Self: Sized,
    {
        let tuples = validated(&*self, tuples)?;
        let mut changed = false;
        for tuple in tuples {
            changed |= self.add(tuple)?;
        }
        Ok(changed)
    }

    /// True if every tuple of the collection is a member
    fn contains_all_tuples<I>(&self, tuples: I) -> Result<bool>
    where
        I: IntoIterator<Item = Tuple<V>>,
        Self: Sized,
    {
        for tuple in validated(self, tuples)?.iter() {
            if !self.contains(tuple)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Removes every tuple of the collection (set difference)
    #[instrument(level = "trace", skip_all)]
    fn remove_all_tuples<I>(&mut self, tuples: I) -> Result<bool>
    where
        I: IntoIterator<Item = Tuple<V>>,
        Self: Sized,
    {
        let tuples = validated(&*self, tuples)?;
        let mut changed = false;
        for tuple in tuples.iter() {
            changed |= self.remove(tuple)?;
        }
        Ok(changed)
    }

    /// Keeps only the tuples that are also in the collection (set intersection)
    #[instrument(level = "trace", skip_all)]
    fn retain_all_tuples<I>(&mut self, tuples: I) -> Result<bool>
    where
        I: IntoIterator<Item = Tuple<V>>,
        Self: Sized,
    {
        let keep: HashSet<Tuple<V>> = validated(&*self, tuples)?.into_iter().collect();
        let doomed = self.tuples().filter(|tuple| !keep.contains(*tuple)).cloned().collect_vec();
        let changed = !doomed.is_empty();
        for tuple in doomed.iter() {
            self.remove(tuple)?;
        }
        Ok(changed)
    }

    /// Union with a relation of the same kind
    fn add_all(&mut self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        self.check_same_dimension(other)?;
        self.add_all_tuples(other.tuples().cloned())
    }

    fn contains_all(&self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        self.check_same_dimension(other)?;
        self.contains_all_tuples(other.tuples().cloned())
    }

    /// Difference with a relation of the same kind
    fn remove_all(&mut self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        self.check_same_dimension(other)?;
        self.remove_all_tuples(other.tuples().cloned())
    }

    /// Intersection with a relation of the same kind
    fn retain_all(&mut self, other: &Self) -> Result<bool>
    where
        Self: Sized,
    {
        self.check_same_dimension(other)?;
        self.retain_all_tuples(other.tuples().cloned())
    }

    /// Every value appearing at any coordinate of any tuple
    fn all(&self) -> HashSet<V> {
        self.tuples().flat_map(|tuple| tuple.iter().cloned()).collect()
    }

    /// Projection onto coordinate `index`
    fn project(&self, index: usize) -> Result<HashSet<V>> {
        self.check_index(index)?;
        self.tuples().map(|tuple| tuple.value(index).cloned()).collect()
    }

    /// All tuples whose coordinate `index` equals `value`
    fn elements(&self, value: &V, index: usize) -> Result<HashSet<Tuple<V>>> {
        self.check_index(index)?;
        Ok(self
            .tuples()
            .filter(|tuple| tuple.value(index).is_ok_and(|v| v == value))
            .cloned()
            .collect())
    }

    /// Whether `value` appears at coordinate `index`. Invalid coordinates yield `false`.
    fn contains_at(&self, value: &V, index: usize) -> bool {
        self.tuples().any(|tuple| tuple.value(index).is_ok_and(|v| v == value))
    }

    /// True iff no value appears twice at coordinate `index`
    fn is_function(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.tuples().filter_map(|tuple| tuple.value(index).ok()).all_unique())
    }
}

/// Collects a tuple collection, failing on the first tuple whose dimension does not fit
fn validated<R, V, I>(relation: &R, tuples: I) -> Result<Vec<Tuple<V>>>
where
    R: Relation<V>,
    V: Eq + Hash + Clone,
    I: IntoIterator<Item = Tuple<V>>,
{
    tuples
        .into_iter()
        .map(|tuple| relation.check_dimension(&tuple).map(|_| tuple))
        .collect()
}
