//! Plain vector-backed set.
//!
//! `ListSet` asks nothing of its elements beyond equality, which makes it the
//! materialization target for views whose element types are neither hashable
//! nor ordered. Membership is a linear scan.

use crate::error::Result;
use crate::primitives::{Container, Iterable, Len};
use crate::set::{MutableSet, Set};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Cloned;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};
use std::slice;

#[derive(Clone, Serialize)]
#[serde(transparent)]
pub struct ListSet<T> {
    items: Vec<T>,
}

impl<T: PartialEq> ListSet<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Insert unless already present. Returns true if the value was new.
    pub fn insert(&mut self, value: T) -> bool {
        if self.items.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Elements in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: PartialEq> Default for ListSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> FromIterator<T> for ListSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: PartialEq> Extend<T> for ListSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

// Deserialize through the deduplicating constructor.
impl<'de, T: PartialEq + Deserialize<'de>> Deserialize<'de> for ListSet<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(|items| items.into_iter().collect())
    }
}

impl<T> IntoIterator for ListSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T> Len for ListSet<T> {
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone> Iterable for ListSet<T> {
    type Item = T;
    type Iter<'a> = Cloned<slice::Iter<'a, T>> where T: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.items.iter().cloned()
    }
}

impl<T: PartialEq> Container<T> for ListSet<T> {
    fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }
}

impl<T: Clone + PartialEq> Set for ListSet<T> {
    type Output = ListSet<T>;
}

impl<T: Clone + PartialEq> MutableSet for ListSet<T> {
    fn add(&mut self, value: T) -> Result<()> {
        self.insert(value);
        Ok(())
    }

    fn discard(&mut self, value: &T) -> Result<()> {
        if let Some(pos) = self.items.iter().position(|item| item == value) {
            self.items.swap_remove(pos);
        }
        Ok(())
    }
}

impl<T: Clone + PartialEq> PartialEq for ListSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Clone + Eq> Eq for ListSet<T> {}

impl<T: Clone + PartialEq> PartialOrd for ListSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.set_cmp(other)
    }
}

impl<T: fmt::Debug> fmt::Debug for ListSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

macro_rules! impl_set_operator {
    ($Op:ident, $op:ident, $derived:ident) => {
        impl<T: Clone + PartialEq> $Op<&ListSet<T>> for &ListSet<T> {
            type Output = ListSet<T>;

            fn $op(self, rhs: &ListSet<T>) -> ListSet<T> {
                Set::$derived(self, rhs)
            }
        }
    };
}

impl_set_operator!(BitAnd, bitand, intersection);
impl_set_operator!(BitOr, bitor, union);
impl_set_operator!(Sub, sub, difference);
impl_set_operator!(BitXor, bitxor, symmetric_difference);

// ListSet mutators never fail, so the assigning operators drop the Result.
impl<T: Clone + PartialEq> BitOrAssign<&ListSet<T>> for ListSet<T> {
    fn bitor_assign(&mut self, rhs: &ListSet<T>) {
        let _ = self.union_update(rhs.iterate());
    }
}

impl<T: Clone + PartialEq> BitAndAssign<&ListSet<T>> for ListSet<T> {
    fn bitand_assign(&mut self, rhs: &ListSet<T>) {
        let _ = self.intersection_update(rhs);
    }
}

impl<T: Clone + PartialEq> BitXorAssign<&ListSet<T>> for ListSet<T> {
    fn bitxor_assign(&mut self, rhs: &ListSet<T>) {
        let _ = self.symmetric_difference_update(rhs);
    }
}

impl<T: Clone + PartialEq> SubAssign<&ListSet<T>> for ListSet<T> {
    fn sub_assign(&mut self, rhs: &ListSet<T>) {
        let _ = self.difference_update(rhs.iterate());
    }
}
