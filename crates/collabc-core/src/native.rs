//! Capability impls for standard-library collections.
//!
//! Native types keep their own fast paths: membership goes straight to the
//! hash or tree lookup and bulk mutators (`clear`, `append`, `reverse`, ...)
//! are overridden with the std equivalents. Everything else is derived.
//!
//! Inherent std methods shadow trait methods of the same name at call
//! sites (`set.is_subset(..)`, `map.keys()`); call the capability version
//! through the trait path (`Set::is_subset(&set, ..)`) when both exist.
//! The reverse happens for slice methods reached through `Vec`: with
//! `MutableSequence` in scope, `vec.reverse()` resolves to the capability
//! method and returns a `Result`.

use crate::error::{CollError, Result};
use crate::mapping::{Mapping, MutableMapping};
use crate::primitives::{Container, Iterable, Len};
use crate::sequence::{MutableSequence, Sequence};
use crate::set::{MutableSet, Set};
use std::borrow::Borrow;
use std::collections::{btree_map, btree_set, hash_map, hash_set, vec_deque};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::iter::Cloned;
use std::ops::Range;
use std::slice;
use std::str::Chars;

fn out_of_range(index: usize, length: usize) -> CollError {
    CollError::IndexOutOfRange { index, length }
}

// ---------------------------------------------------------------------------
// Sequences: slices, arrays, Vec, VecDeque
// ---------------------------------------------------------------------------

impl<T> Len for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: Clone> Iterable for [T] {
    type Item = T;
    type Iter<'a> = Cloned<slice::Iter<'a, T>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        <[T]>::iter(self).cloned()
    }
}

impl<T: PartialEq> Container<T> for [T] {
    fn contains(&self, value: &T) -> bool {
        <[T]>::contains(self, value)
    }
}

impl<T: Clone + PartialEq> Sequence for [T] {
    fn get_item(&self, index: usize) -> Result<T> {
        <[T]>::get(self, index)
            .cloned()
            .ok_or_else(|| out_of_range(index, <[T]>::len(self)))
    }
}

impl<T, const N: usize> Len for [T; N] {
    fn len(&self) -> usize {
        N
    }
}

impl<T: Clone, const N: usize> Iterable for [T; N] {
    type Item = T;
    type Iter<'a> = Cloned<slice::Iter<'a, T>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.as_slice().iter().cloned()
    }
}

impl<T: PartialEq, const N: usize> Container<T> for [T; N] {
    fn contains(&self, value: &T) -> bool {
        self.as_slice().contains(value)
    }
}

impl<T: Clone + PartialEq, const N: usize> Sequence for [T; N] {
    fn get_item(&self, index: usize) -> Result<T> {
        Sequence::get_item(self.as_slice(), index)
    }
}

impl<T> Len for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Clone> Iterable for Vec<T> {
    type Item = T;
    type Iter<'a> = Cloned<slice::Iter<'a, T>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.as_slice().iter().cloned()
    }
}

impl<T: PartialEq> Container<T> for Vec<T> {
    fn contains(&self, value: &T) -> bool {
        self.as_slice().contains(value)
    }
}

impl<T: Clone + PartialEq> Sequence for Vec<T> {
    fn get_item(&self, index: usize) -> Result<T> {
        Sequence::get_item(self.as_slice(), index)
    }
}

impl<T: Clone + PartialEq> MutableSequence for Vec<T> {
    fn set_item(&mut self, index: usize, value: T) -> Result<()> {
        let length = Vec::len(self);
        match self.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(out_of_range(index, length)),
        }
    }

    fn del_item(&mut self, index: usize) -> Result<()> {
        if index >= Vec::len(self) {
            return Err(out_of_range(index, Vec::len(self)));
        }
        Vec::remove(self, index);
        Ok(())
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > Vec::len(self) {
            return Err(out_of_range(index, Vec::len(self)));
        }
        Vec::insert(self, index, value);
        Ok(())
    }

    fn append(&mut self, value: T) -> Result<()> {
        self.push(value);
        Ok(())
    }

    fn reverse(&mut self) -> Result<()> {
        self.as_mut_slice().reverse();
        Ok(())
    }

    fn extend_from<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        Extend::extend(self, values);
        Ok(())
    }

    fn pop(&mut self) -> Result<T> {
        Vec::pop(self).ok_or_else(|| out_of_range(0, 0))
    }
}

impl<T> Len for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T: Clone> Iterable for VecDeque<T> {
    type Item = T;
    type Iter<'a> = Cloned<vec_deque::Iter<'a, T>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        VecDeque::iter(self).cloned()
    }
}

impl<T: PartialEq> Container<T> for VecDeque<T> {
    fn contains(&self, value: &T) -> bool {
        VecDeque::contains(self, value)
    }
}

impl<T: Clone + PartialEq> Sequence for VecDeque<T> {
    fn get_item(&self, index: usize) -> Result<T> {
        VecDeque::get(self, index)
            .cloned()
            .ok_or_else(|| out_of_range(index, VecDeque::len(self)))
    }
}

impl<T: Clone + PartialEq> MutableSequence for VecDeque<T> {
    fn set_item(&mut self, index: usize, value: T) -> Result<()> {
        let length = VecDeque::len(self);
        match self.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(out_of_range(index, length)),
        }
    }

    fn del_item(&mut self, index: usize) -> Result<()> {
        let length = VecDeque::len(self);
        VecDeque::remove(self, index)
            .map(drop)
            .ok_or_else(|| out_of_range(index, length))
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > VecDeque::len(self) {
            return Err(out_of_range(index, VecDeque::len(self)));
        }
        VecDeque::insert(self, index, value);
        Ok(())
    }

    fn append(&mut self, value: T) -> Result<()> {
        self.push_back(value);
        Ok(())
    }

    fn pop(&mut self) -> Result<T> {
        self.pop_back().ok_or_else(|| out_of_range(0, 0))
    }
}

// ---------------------------------------------------------------------------
// Text and ranges
// ---------------------------------------------------------------------------

/// A string slice is a sequence of `char`s; positions count chars, not
/// bytes. `String` gets no impls of its own: `Container` on `String` would
/// shadow the `str::contains` it reaches through deref, so go through
/// `as_str()`.
impl Len for str {
    fn len(&self) -> usize {
        self.chars().count()
    }
}

impl Iterable for str {
    type Item = char;
    type Iter<'a> = Chars<'a>;

    fn iterate(&self) -> Self::Iter<'_> {
        self.chars()
    }
}

impl Container<char> for str {
    fn contains(&self, value: &char) -> bool {
        str::contains(self, *value)
    }
}

impl Sequence for str {
    fn get_item(&self, index: usize) -> Result<char> {
        self.chars()
            .nth(index)
            .ok_or_else(|| out_of_range(index, self.chars().count()))
    }
}

macro_rules! impl_range_sequence {
    ($($int:ty),* $(,)?) => {$(
        impl Len for Range<$int> {
            fn len(&self) -> usize {
                if self.end > self.start {
                    self.end.abs_diff(self.start) as usize
                } else {
                    0
                }
            }
        }

        impl Iterable for Range<$int> {
            type Item = $int;
            type Iter<'a> = Range<$int>;

            fn iterate(&self) -> Self::Iter<'_> {
                self.clone()
            }
        }

        impl Container<$int> for Range<$int> {
            fn contains(&self, value: &$int) -> bool {
                Range::contains(self, value)
            }
        }

        impl Sequence for Range<$int> {
            fn get_item(&self, index: usize) -> Result<$int> {
                let length = Len::len(self);
                // The cast may wrap; the true sum fits since `index < len`.
                if index < length {
                    Ok(self.start.wrapping_add(index as $int))
                } else {
                    Err(out_of_range(index, length))
                }
            }
        }
    )*};
}

impl_range_sequence!(i32, i64, u32, u64, usize);

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

impl<T, S> Len for HashSet<T, S> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<T: Clone, S> Iterable for HashSet<T, S> {
    type Item = T;
    type Iter<'a> = Cloned<hash_set::Iter<'a, T>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        HashSet::iter(self).cloned()
    }
}

impl<T, Q, S> Container<Q> for HashSet<T, S>
where
    T: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    fn contains(&self, value: &Q) -> bool {
        HashSet::contains(self, value)
    }
}

impl<T, S> Set for HashSet<T, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    type Output = HashSet<T, S>;
}

impl<T, S> MutableSet for HashSet<T, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    fn add(&mut self, value: T) -> Result<()> {
        HashSet::insert(self, value);
        Ok(())
    }

    fn discard(&mut self, value: &T) -> Result<()> {
        HashSet::remove(self, value);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        HashSet::clear(self);
        Ok(())
    }
}

impl<T> Len for BTreeSet<T> {
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

impl<T: Clone> Iterable for BTreeSet<T> {
    type Item = T;
    type Iter<'a> = Cloned<btree_set::Iter<'a, T>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        BTreeSet::iter(self).cloned()
    }
}

impl<T, Q> Container<Q> for BTreeSet<T>
where
    T: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    fn contains(&self, value: &Q) -> bool {
        BTreeSet::contains(self, value)
    }
}

impl<T: Clone + Ord> Set for BTreeSet<T> {
    type Output = BTreeSet<T>;
}

impl<T: Clone + Ord> MutableSet for BTreeSet<T> {
    fn add(&mut self, value: T) -> Result<()> {
        BTreeSet::insert(self, value);
        Ok(())
    }

    fn discard(&mut self, value: &T) -> Result<()> {
        BTreeSet::remove(self, value);
        Ok(())
    }

    fn pop(&mut self) -> Result<T> {
        self.pop_first().ok_or(CollError::Empty("set"))
    }

    fn clear(&mut self) -> Result<()> {
        BTreeSet::clear(self);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------------------

impl<K, V, S> Len for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<K: Clone, V, S> Iterable for HashMap<K, V, S> {
    type Item = K;
    type Iter<'a> = Cloned<hash_map::Keys<'a, K, V>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        HashMap::keys(self).cloned()
    }
}

impl<K, V, Q, S> Container<Q> for HashMap<K, V, S>
where
    K: Borrow<Q> + Eq + Hash,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    fn contains(&self, key: &Q) -> bool {
        HashMap::contains_key(self, key)
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    type Value = V;

    fn get_item(&self, key: &K) -> Result<V> {
        HashMap::get(self, key)
            .cloned()
            .ok_or(CollError::KeyNotFound)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }
}

impl<K, V, S> MutableMapping for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    fn set_item(&mut self, key: K, value: V) -> Result<()> {
        HashMap::insert(self, key, value);
        Ok(())
    }

    fn del_item(&mut self, key: &K) -> Result<()> {
        HashMap::remove(self, key)
            .map(drop)
            .ok_or(CollError::KeyNotFound)
    }

    fn clear(&mut self) -> Result<()> {
        HashMap::clear(self);
        Ok(())
    }
}

impl<K, V> Len for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<K: Clone, V> Iterable for BTreeMap<K, V> {
    type Item = K;
    type Iter<'a> = Cloned<btree_map::Keys<'a, K, V>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        BTreeMap::keys(self).cloned()
    }
}

impl<K, V, Q> Container<Q> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    fn contains(&self, key: &Q) -> bool {
        BTreeMap::contains_key(self, key)
    }
}

impl<K: Clone + Ord, V: Clone> Mapping for BTreeMap<K, V> {
    type Value = V;

    fn get_item(&self, key: &K) -> Result<V> {
        BTreeMap::get(self, key)
            .cloned()
            .ok_or(CollError::KeyNotFound)
    }

    fn contains_key(&self, key: &K) -> bool {
        BTreeMap::contains_key(self, key)
    }
}

impl<K: Clone + Ord, V: Clone> MutableMapping for BTreeMap<K, V> {
    fn set_item(&mut self, key: K, value: V) -> Result<()> {
        BTreeMap::insert(self, key, value);
        Ok(())
    }

    fn del_item(&mut self, key: &K) -> Result<()> {
        BTreeMap::remove(self, key)
            .map(drop)
            .ok_or(CollError::KeyNotFound)
    }

    fn popitem(&mut self) -> Result<(K, V)> {
        self.pop_first().ok_or(CollError::Empty("mapping"))
    }

    fn clear(&mut self) -> Result<()> {
        BTreeMap::clear(self);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// indexmap
// ---------------------------------------------------------------------------

#[cfg(feature = "indexmap")]
mod index {
    use super::*;
    use indexmap::{Equivalent, IndexMap, IndexSet};

    impl<T, S> Len for IndexSet<T, S> {
        fn len(&self) -> usize {
            IndexSet::len(self)
        }
    }

    impl<T: Clone, S> Iterable for IndexSet<T, S> {
        type Item = T;
        type Iter<'a> = Cloned<indexmap::set::Iter<'a, T>> where Self: 'a;

        fn iterate(&self) -> Self::Iter<'_> {
            IndexSet::iter(self).cloned()
        }
    }

    impl<T, Q, S> Container<Q> for IndexSet<T, S>
    where
        T: Eq + Hash,
        Q: Equivalent<T> + Hash + ?Sized,
        S: BuildHasher,
    {
        fn contains(&self, value: &Q) -> bool {
            IndexSet::contains(self, value)
        }
    }

    impl<T, S> Set for IndexSet<T, S>
    where
        T: Clone + Eq + Hash,
        S: BuildHasher + Default,
    {
        type Output = IndexSet<T, S>;
    }

    impl<T, S> MutableSet for IndexSet<T, S>
    where
        T: Clone + Eq + Hash,
        S: BuildHasher + Default,
    {
        fn add(&mut self, value: T) -> Result<()> {
            IndexSet::insert(self, value);
            Ok(())
        }

        /// Keeps the remaining elements in insertion order.
        fn discard(&mut self, value: &T) -> Result<()> {
            IndexSet::shift_remove(self, value);
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            IndexSet::clear(self);
            Ok(())
        }
    }

    impl<K, V, S> Len for IndexMap<K, V, S> {
        fn len(&self) -> usize {
            IndexMap::len(self)
        }
    }

    impl<K: Clone, V, S> Iterable for IndexMap<K, V, S> {
        type Item = K;
        type Iter<'a> = Cloned<indexmap::map::Keys<'a, K, V>> where Self: 'a;

        fn iterate(&self) -> Self::Iter<'_> {
            IndexMap::keys(self).cloned()
        }
    }

    impl<K, V, Q, S> Container<Q> for IndexMap<K, V, S>
    where
        K: Eq + Hash,
        Q: Equivalent<K> + Hash + ?Sized,
        S: BuildHasher,
    {
        fn contains(&self, key: &Q) -> bool {
            IndexMap::contains_key(self, key)
        }
    }

    impl<K, V, S> Mapping for IndexMap<K, V, S>
    where
        K: Clone + Eq + Hash,
        V: Clone,
        S: BuildHasher,
    {
        type Value = V;

        fn get_item(&self, key: &K) -> Result<V> {
            IndexMap::get(self, key)
                .cloned()
                .ok_or(CollError::KeyNotFound)
        }
    }

    impl<K, V, S> MutableMapping for IndexMap<K, V, S>
    where
        K: Clone + Eq + Hash,
        V: Clone,
        S: BuildHasher,
    {
        fn set_item(&mut self, key: K, value: V) -> Result<()> {
            IndexMap::insert(self, key, value);
            Ok(())
        }

        fn del_item(&mut self, key: &K) -> Result<()> {
            IndexMap::shift_remove(self, key)
                .map(drop)
                .ok_or(CollError::KeyNotFound)
        }

        fn clear(&mut self) -> Result<()> {
            IndexMap::clear(self);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_index_map_keeps_insertion_order() {
            let mut map: IndexMap<&str, i32> = IndexMap::new();
            map.set_item("z", 1).unwrap();
            map.set_item("a", 2).unwrap();
            map.set_item("m", 3).unwrap();
            map.del_item(&"a").unwrap();
            assert_eq!(map.keys_list(), vec!["z", "m"]);
            assert_eq!(map.popitem(), Ok(("z", 1)));
        }

        #[test]
        fn test_index_set_algebra() {
            let left: IndexSet<i32> = [3, 1, 2].into_iter().collect();
            let right: IndexSet<i32> = [2, 9].into_iter().collect();
            let joined: IndexSet<i32> = Set::union(&left, &right);
            assert_eq!(joined.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2, 9]);
        }
    }
}
