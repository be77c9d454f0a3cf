//! Adapters that lift a minimal "shape" into a full capability.
//!
//! A foreign type implements one of [`SetShape`], [`MapShape`] or
//! [`SeqShape`] (length, element walk, lookup) and is wrapped in
//! [`AsSet`], [`AsMapping`] or [`AsSequence`] to gain every derived
//! operation. The mutating shape hooks default to
//! [`CollError::Unsupported`], so a read-only source still satisfies the
//! mutable trait and reports the missing primitive when it is called.

use crate::error::{CollError, Result};
use crate::mapping::{Mapping, MutableMapping};
use crate::plain::ListSet;
use crate::primitives::{Container, Iterable, Len};
use crate::sequence::{scan_contains, MutableSequence, SeqIter, Sequence};
use crate::set::{MutableSet, Set};
use serde::{Deserialize, Serialize};

pub type ShapeIter<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

pub trait SetShape {
    type Elem: Clone + PartialEq;

    fn shape_len(&self) -> usize;

    fn shape_elements(&self) -> ShapeIter<'_, Self::Elem>;

    fn shape_contains(&self, value: &Self::Elem) -> bool;

    fn shape_add(&mut self, _value: Self::Elem) -> Result<()> {
        Err(CollError::Unsupported("add"))
    }

    fn shape_discard(&mut self, _value: &Self::Elem) -> Result<()> {
        Err(CollError::Unsupported("discard"))
    }
}

pub trait MapShape {
    type Key: Clone;
    type Value;

    fn shape_len(&self) -> usize;

    fn shape_keys(&self) -> ShapeIter<'_, Self::Key>;

    fn shape_lookup(&self, key: &Self::Key) -> Option<Self::Value>;

    fn shape_store(&mut self, _key: Self::Key, _value: Self::Value) -> Result<()> {
        Err(CollError::Unsupported("set_item"))
    }

    fn shape_delete(&mut self, _key: &Self::Key) -> Result<()> {
        Err(CollError::Unsupported("del_item"))
    }
}

pub trait SeqShape {
    type Elem: Clone + PartialEq;

    fn shape_len(&self) -> usize;

    fn shape_at(&self, index: usize) -> Option<Self::Elem>;

    fn shape_replace(&mut self, _index: usize, _value: Self::Elem) -> Result<()> {
        Err(CollError::Unsupported("set_item"))
    }

    fn shape_remove(&mut self, _index: usize) -> Result<()> {
        Err(CollError::Unsupported("del_item"))
    }

    fn shape_insert(&mut self, _index: usize, _value: Self::Elem) -> Result<()> {
        Err(CollError::Unsupported("insert"))
    }
}

/// A [`SetShape`] seen as a [`MutableSet`]. Derived results are [`ListSet`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AsSet<T>(pub T);

impl<T: SetShape> Len for AsSet<T> {
    fn len(&self) -> usize {
        self.0.shape_len()
    }
}

impl<T: SetShape> Iterable for AsSet<T> {
    type Item = T::Elem;
    type Iter<'a> = ShapeIter<'a, T::Elem> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.0.shape_elements()
    }
}

impl<T: SetShape> Container<T::Elem> for AsSet<T> {
    fn contains(&self, value: &T::Elem) -> bool {
        self.0.shape_contains(value)
    }
}

impl<T: SetShape> Set for AsSet<T> {
    type Output = ListSet<T::Elem>;
}

impl<T: SetShape> MutableSet for AsSet<T> {
    fn add(&mut self, value: T::Elem) -> Result<()> {
        self.0.shape_add(value)
    }

    fn discard(&mut self, value: &T::Elem) -> Result<()> {
        self.0.shape_discard(value)
    }
}

/// A [`MapShape`] seen as a [`MutableMapping`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AsMapping<T>(pub T);

impl<T: MapShape> Len for AsMapping<T> {
    fn len(&self) -> usize {
        self.0.shape_len()
    }
}

impl<T: MapShape> Iterable for AsMapping<T> {
    type Item = T::Key;
    type Iter<'a> = ShapeIter<'a, T::Key> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.0.shape_keys()
    }
}

impl<T: MapShape> Container<T::Key> for AsMapping<T> {
    fn contains(&self, key: &T::Key) -> bool {
        self.contains_key(key)
    }
}

impl<T: MapShape> Mapping for AsMapping<T> {
    type Value = T::Value;

    fn get_item(&self, key: &T::Key) -> Result<T::Value> {
        self.0.shape_lookup(key).ok_or(CollError::KeyNotFound)
    }
}

impl<T: MapShape> MutableMapping for AsMapping<T> {
    fn set_item(&mut self, key: T::Key, value: T::Value) -> Result<()> {
        self.0.shape_store(key, value)
    }

    fn del_item(&mut self, key: &T::Key) -> Result<()> {
        if !self.contains_key(key) {
            return Err(CollError::KeyNotFound);
        }
        self.0.shape_delete(key)
    }
}

/// A [`SeqShape`] seen as a [`MutableSequence`]; iteration goes through
/// [`SeqIter`] and membership through [`scan_contains`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AsSequence<T>(pub T);

impl<T: SeqShape> Len for AsSequence<T> {
    fn len(&self) -> usize {
        self.0.shape_len()
    }
}

impl<T: SeqShape> Iterable for AsSequence<T> {
    type Item = T::Elem;
    type Iter<'a> = SeqIter<'a, Self> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SeqIter::new(self)
    }
}

impl<T: SeqShape> Container<T::Elem> for AsSequence<T> {
    fn contains(&self, value: &T::Elem) -> bool {
        scan_contains(self, value)
    }
}

impl<T: SeqShape> Sequence for AsSequence<T> {
    fn get_item(&self, index: usize) -> Result<T::Elem> {
        self.0
            .shape_at(index)
            .ok_or(CollError::IndexOutOfRange {
                index,
                length: self.0.shape_len(),
            })
    }
}

impl<T: SeqShape> MutableSequence for AsSequence<T> {
    fn set_item(&mut self, index: usize, value: T::Elem) -> Result<()> {
        self.get_item(index)?;
        self.0.shape_replace(index, value)
    }

    fn del_item(&mut self, index: usize) -> Result<()> {
        self.get_item(index)?;
        self.0.shape_remove(index)
    }

    fn insert(&mut self, index: usize, value: T::Elem) -> Result<()> {
        let length = self.0.shape_len();
        if index > length {
            return Err(CollError::IndexOutOfRange { index, length });
        }
        self.0.shape_insert(index, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Bit flags 0..64 packed into a word.
    #[derive(Default)]
    struct Bits(u64);

    impl SetShape for Bits {
        type Elem = u8;

        fn shape_len(&self) -> usize {
            self.0.count_ones() as usize
        }

        fn shape_elements(&self) -> ShapeIter<'_, u8> {
            let word = self.0;
            Box::new((0..64u8).filter(move |bit| word & (1 << bit) != 0))
        }

        fn shape_contains(&self, value: &u8) -> bool {
            *value < 64 && self.0 & (1 << value) != 0
        }

        fn shape_add(&mut self, value: u8) -> Result<()> {
            self.0 |= 1 << value;
            Ok(())
        }

        fn shape_discard(&mut self, value: &u8) -> Result<()> {
            self.0 &= !(1 << value);
            Ok(())
        }
    }

    /// Read-only environment-style table.
    struct Table(Vec<(&'static str, i32)>);

    impl MapShape for Table {
        type Key = &'static str;
        type Value = i32;

        fn shape_len(&self) -> usize {
            self.0.len()
        }

        fn shape_keys(&self) -> ShapeIter<'_, &'static str> {
            Box::new(self.0.iter().map(|(k, _)| *k))
        }

        fn shape_lookup(&self, key: &&'static str) -> Option<i32> {
            self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
        }
    }

    struct Letters(Vec<char>);

    impl SeqShape for Letters {
        type Elem = char;

        fn shape_len(&self) -> usize {
            self.0.len()
        }

        fn shape_at(&self, index: usize) -> Option<char> {
            self.0.get(index).copied()
        }

        fn shape_insert(&mut self, index: usize, value: char) -> Result<()> {
            self.0.insert(index, value);
            Ok(())
        }

        fn shape_replace(&mut self, index: usize, value: char) -> Result<()> {
            self.0[index] = value;
            Ok(())
        }
    }

    #[test]
    fn test_set_shape_gets_full_algebra() {
        let mut bits = AsSet(Bits::default());
        bits.union_update([1, 3, 5]).unwrap();
        assert_eq!(bits.len(), 3);
        assert_eq!(bits.iterate().collect::<Vec<_>>(), vec![1, 3, 5]);

        let odd_small: BTreeSet<u8> = [1, 3].into_iter().collect();
        assert!(Set::is_superset(&bits, &odd_small));
        let rest: ListSet<u8> = bits.difference(&odd_small);
        assert_eq!(rest.into_vec(), vec![5]);

        bits.clear().unwrap();
        assert!(bits.is_empty());
    }

    #[test]
    fn test_read_only_mapping_reports_unsupported() {
        let mut table = AsMapping(Table(vec![("a", 1), ("b", 2)]));
        assert_eq!(table.get_item(&"b"), Ok(2));
        assert!(table.contains(&"a"));
        assert_eq!(table.items_list(), vec![("a", 1), ("b", 2)]);
        assert_eq!(
            table.set_item("c", 3),
            Err(CollError::Unsupported("set_item"))
        );
        assert_eq!(table.del_item(&"z"), Err(CollError::KeyNotFound));
        assert_eq!(table.del_item(&"a"), Err(CollError::Unsupported("del_item")));
        assert_eq!(table.popitem(), Err(CollError::Unsupported("del_item")));
    }

    #[test]
    fn test_sequence_shape_derives_mutators() {
        let mut letters = AsSequence(Letters(vec!['a', 'b']));
        letters.append('c').unwrap();
        letters.reverse().unwrap();
        assert_eq!(letters.iterate().collect::<String>(), "cba");
        assert!(letters.contains(&'b'));
        assert_eq!(letters.index(&'a'), Ok(2));

        assert_eq!(
            letters.insert(7, 'z'),
            Err(CollError::IndexOutOfRange {
                index: 7,
                length: 3
            })
        );
        assert_eq!(letters.pop(), Err(CollError::Unsupported("del_item")));
        assert_eq!(letters.len(), 3);
    }
}
