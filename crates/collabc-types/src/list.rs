//! Vector-backed mutable sequence.
//!
//! `List` implements exactly the mutable-sequence primitives: `len`,
//! `get_item`, `set_item`, `del_item` and `insert`. Iteration, membership,
//! `append`, `reverse`, `extend_from`, `pop` and `remove` are all the
//! derived defaults.

use collabc_core::sequence::{scan_contains, SeqIter};
use collabc_core::{CollError, Container, Iterable, Len, MutableSequence, Result, Sequence};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use tracing::warn;

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn out_of_range(&self, index: usize) -> CollError {
        CollError::IndexOutOfRange {
            index,
            length: self.items.len(),
        }
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Len for List<T> {
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone + PartialEq> Iterable for List<T> {
    type Item = T;
    type Iter<'a> = SeqIter<'a, Self> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SeqIter::new(self)
    }
}

impl<T: Clone + PartialEq> Container<T> for List<T> {
    fn contains(&self, value: &T) -> bool {
        scan_contains(self, value)
    }
}

impl<T: Clone + PartialEq> Sequence for List<T> {
    fn get_item(&self, index: usize) -> Result<T> {
        self.items
            .get(index)
            .cloned()
            .ok_or_else(|| self.out_of_range(index))
    }
}

impl<T: Clone + PartialEq> MutableSequence for List<T> {
    fn set_item(&mut self, index: usize, value: T) -> Result<()> {
        let err = self.out_of_range(index);
        let slot = self.items.get_mut(index).ok_or(err)?;
        *slot = value;
        Ok(())
    }

    fn del_item(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(self.out_of_range(index));
        }
        self.items.remove(index);
        Ok(())
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.items.len() {
            return Err(self.out_of_range(index));
        }
        self.items.insert(index, value);
        Ok(())
    }
}

/// `list += values` appends each value in turn.
impl<T, I> AddAssign<I> for List<T>
where
    T: Clone + PartialEq,
    I: IntoIterator<Item = T>,
{
    fn add_assign(&mut self, values: I) {
        if let Err(err) = self.extend_from(values) {
            warn!(%err, "list extension stopped early");
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
