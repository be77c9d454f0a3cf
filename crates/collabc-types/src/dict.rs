//! Insertion-ordered association-list mapping.
//!
//! `Dict` supplies the four mapping primitives (`len`, key iteration,
//! `get_item`, `set_item`/`del_item`) and nothing else. Keys only need
//! `PartialEq`, so unhashable and unordered key types work; lookups are a
//! linear scan.

use collabc_core::{CollError, Container, Iterable, Len, Mapping, MutableMapping, Result};
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::slice;

#[derive(Clone, Serialize)]
#[serde(transparent)]
pub struct Dict<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Dict<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Key stored at insertion position `index`.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.entries.get(index).map(|(key, _)| key)
    }

    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    fn position(&self, key: &K) -> Option<usize>
    where
        K: PartialEq,
    {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K, V> Default for Dict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Later pairs overwrite earlier ones with an equal key.
impl<K: PartialEq, V> FromIterator<(K, V)> for Dict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (key, value) in iter {
            match dict.position(&key) {
                Some(pos) => dict.entries[pos].1 = value,
                None => dict.entries.push((key, value)),
            }
        }
        dict
    }
}

impl<'de, K, V> Deserialize<'de> for Dict<K, V>
where
    K: PartialEq + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for PairsVisitor<K, V>
        where
            K: PartialEq + Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = Dict<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sequence of [key, value] pairs")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(pair) = seq.next_element::<(K, V)>()? {
                    pairs.push(pair);
                }
                Ok(pairs.into_iter().collect())
            }
        }

        deserializer.deserialize_seq(PairsVisitor(PhantomData))
    }
}

/// Keys in insertion order.
pub struct Keys<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K: Clone, V> Iterator for Keys<'a, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> Len for Dict<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: Clone, V> Iterable for Dict<K, V> {
    type Item = K;
    type Iter<'a> = Keys<'a, K, V> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        Keys {
            inner: self.entries.iter(),
        }
    }
}

impl<K: Clone + PartialEq, V: Clone> Container<K> for Dict<K, V> {
    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }
}

impl<K: Clone + PartialEq, V: Clone> Mapping for Dict<K, V> {
    type Value = V;

    fn get_item(&self, key: &K) -> Result<V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.clone())
            .ok_or(CollError::KeyNotFound)
    }
}

impl<K: Clone + PartialEq, V: Clone> MutableMapping for Dict<K, V> {
    /// Overwrites in place, so an existing key keeps its position.
    fn set_item(&mut self, key: K, value: V) -> Result<()> {
        match self.position(&key) {
            Some(pos) => self.entries[pos].1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    fn del_item(&mut self, key: &K) -> Result<()> {
        let pos = self.position(key).ok_or(CollError::KeyNotFound)?;
        self.entries.remove(pos);
        Ok(())
    }
}

impl<K: Clone + PartialEq, V: Clone + PartialEq> PartialEq for Dict<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.mapping_eq(other)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Dict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
