//! Set capabilities.
//!
//! A [`Set`] needs only `len`, `iterate` and `contains`; comparisons and the
//! binary algebra are derived from those three. Binary operations build
//! their result through [`Set::from_iterable`], so the result is always the
//! left operand's [`Set::Output`] type regardless of what the right operand is.

use crate::error::{CollError, Result};
use crate::hash::unordered_hash;
use crate::primitives::{Container, Hashable, Iterable, Len};
use std::cmp::Ordering;
use tracing::trace;

/// Read-only set built from `Len + Iterable + Container`.
pub trait Set: Len + Iterable + Container<<Self as Iterable>::Item> {
    /// Concrete type produced by derived binary operations.
    type Output: FromIterator<<Self as Iterable>::Item>;

    /// Construction hook used by every derived binary operation.
    fn from_iterable<I>(iter: I) -> Self::Output
    where
        I: IntoIterator<Item = Self::Item>,
    {
        iter.into_iter().collect()
    }

    /// Every element of `self` is in `other`. Rejects on size first.
    fn is_subset<O>(&self, other: &O) -> bool
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        if self.len() > other.len() {
            return false;
        }
        self.iterate().all(|value| other.contains(&value))
    }

    fn is_superset<O>(&self, other: &O) -> bool
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        other.is_subset(self)
    }

    fn is_proper_subset<O>(&self, other: &O) -> bool
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        self.len() < other.len() && self.is_subset(other)
    }

    fn is_proper_superset<O>(&self, other: &O) -> bool
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        self.len() > other.len() && self.is_superset(other)
    }

    /// Same elements, whatever the backing structure.
    fn equals<O>(&self, other: &O) -> bool
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        self.len() == other.len() && self.is_subset(other)
    }

    /// Subset order; `None` when neither set contains the other.
    fn set_cmp<O>(&self, other: &O) -> Option<Ordering>
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        match self.len().cmp(&other.len()) {
            Ordering::Equal if self.is_subset(other) => Some(Ordering::Equal),
            Ordering::Less if self.is_subset(other) => Some(Ordering::Less),
            Ordering::Greater if other.is_subset(self) => Some(Ordering::Greater),
            _ => None,
        }
    }

    /// Elements of `other` that are also in `self`.
    fn intersection<O>(&self, other: &O) -> Self::Output
    where
        O: Iterable<Item = Self::Item> + ?Sized,
    {
        Self::from_iterable(other.iterate().filter(|value| self.contains(value)))
    }

    /// Elements of both; deduplication is left to the construction hook.
    fn union<O>(&self, other: &O) -> Self::Output
    where
        O: Iterable<Item = Self::Item> + ?Sized,
    {
        Self::from_iterable(self.iterate().chain(other.iterate()))
    }

    fn difference<O>(&self, other: &O) -> Self::Output
    where
        O: Container<Self::Item> + ?Sized,
    {
        Self::from_iterable(self.iterate().filter(|value| !other.contains(value)))
    }

    /// `(self - other) | (other - self)`.
    fn symmetric_difference<O>(&self, other: &O) -> Self::Output
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        let left = self.iterate().filter(|value| !other.contains(value));
        let right = other.iterate().filter(|value| !self.contains(value));
        Self::from_iterable(left.chain(right))
    }

    /// No element of `other` is in `self`; stops at the first shared one.
    fn is_disjoint<O>(&self, other: &O) -> bool
    where
        O: Iterable<Item = Self::Item> + ?Sized,
    {
        !other.iterate().any(|value| self.contains(&value))
    }
}

/// Opt-in hashing for immutable sets.
///
/// Only immutable set types should implement this; two sets that are
/// [`Set::equals`] always produce the same [`HashableSet::set_hash`].
pub trait HashableSet: Set {
    fn set_hash(&self) -> u64
    where
        Self::Item: Hashable,
    {
        unordered_hash(self.len(), self.iterate().map(|value| value.hash_value()))
    }
}

/// A set that can grow and shrink through `add` and `discard`.
pub trait MutableSet: Set {
    fn add(&mut self, value: Self::Item) -> Result<()>;

    /// Remove `value` if present. Absence is not an error.
    fn discard(&mut self, value: &Self::Item) -> Result<()>;

    /// Like [`MutableSet::discard`] but absence is [`CollError::ValueNotFound`].
    fn remove(&mut self, value: &Self::Item) -> Result<()> {
        if !self.contains(value) {
            return Err(CollError::ValueNotFound);
        }
        self.discard(value)
    }

    /// Remove and return an arbitrary element.
    fn pop(&mut self) -> Result<Self::Item> {
        let value = self.iterate().next().ok_or(CollError::Empty("set"))?;
        self.discard(&value)?;
        Ok(value)
    }

    /// Repeated [`MutableSet::pop`]. Slow; implementors may override.
    fn clear(&mut self) -> Result<()> {
        trace!(len = self.len(), "clearing set by repeated pop");
        loop {
            match self.pop() {
                Ok(_) => {}
                Err(CollError::Empty(_)) => return Ok(()),
                Err(err) => return Err(err),
            }
        }
    }

    /// In-place union (`|=`).
    fn union_update<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        for value in values {
            self.add(value)?;
        }
        Ok(())
    }

    /// In-place intersection (`&=`).
    fn intersection_update<O>(&mut self, other: &O) -> Result<()>
    where
        O: Container<Self::Item> + ?Sized,
    {
        // Collect `self - other` before discarding anything.
        let doomed: Vec<Self::Item> = self
            .iterate()
            .filter(|value| !other.contains(value))
            .collect();
        for value in &doomed {
            self.discard(value)?;
        }
        Ok(())
    }

    /// In-place symmetric difference (`^=`).
    fn symmetric_difference_update<O>(&mut self, other: &O) -> Result<()>
    where
        O: Set<Item = Self::Item> + ?Sized,
    {
        for value in other.iterate() {
            if self.contains(&value) {
                self.discard(&value)?;
            } else {
                self.add(value)?;
            }
        }
        Ok(())
    }

    /// In-place difference (`-=`).
    fn difference_update<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        for value in values {
            self.discard(&value)?;
        }
        Ok(())
    }
}
