//! Immutable, hashable mapping.

use crate::dict::{Dict, Keys};
use collabc_core::hash::unordered_hash;
use collabc_core::{Container, Hashable, Iterable, Len, Mapping, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A mapping fixed at construction.
///
/// The hash is the order-independent hash of its `(key, value)` pairs, so
/// two frozen dicts that compare equal as mappings hash equally.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize, V: Serialize",
    deserialize = "K: PartialEq + Deserialize<'de>, V: Deserialize<'de>"
))]
pub struct FrozenDict<K, V> {
    inner: Dict<K, V>,
}

impl<K, V> FrozenDict<K, V> {
    pub fn empty() -> Self {
        Self { inner: Dict::new() }
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for FrozenDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<K, V> From<Dict<K, V>> for FrozenDict<K, V> {
    fn from(inner: Dict<K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Len for FrozenDict<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: Clone, V> Iterable for FrozenDict<K, V> {
    type Item = K;
    type Iter<'a> = Keys<'a, K, V> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.inner.iterate()
    }
}

impl<K: Clone + PartialEq, V: Clone> Container<K> for FrozenDict<K, V> {
    fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }
}

impl<K: Clone + PartialEq, V: Clone> Mapping for FrozenDict<K, V> {
    type Value = V;

    fn get_item(&self, key: &K) -> Result<V> {
        self.inner.get_item(key)
    }
}

impl<K: Clone + PartialEq, V: Clone + PartialEq> PartialEq for FrozenDict<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.mapping_eq(other)
    }
}

impl<K: Clone + Eq, V: Clone + Eq> Eq for FrozenDict<K, V> {}

impl<K, V> Hash for FrozenDict<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Eq + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let pair_hashes = self.iter_items().map(|pair| pair.hash_value());
        state.write_u64(unordered_hash(self.len(), pair_hashes));
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for FrozenDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrozenDict({:?})", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabc_core::Set;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_hash_ignores_insertion_order() {
        let a: FrozenDict<&str, i32> = [("x", 1), ("y", 2)].into_iter().collect();
        let b: FrozenDict<&str, i32> = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c: FrozenDict<&str, i32> = [("x", 1), ("y", 3)].into_iter().collect();
        assert_ne!(a, c);
        assert_ne!(hash_of(&a), hash_of(&c));
    }

    #[test]
    fn test_usable_as_key() {
        let key: FrozenDict<u8, u8> = [(1, 1)].into_iter().collect();
        let mut seen = HashSet::new();
        seen.insert(key.clone());
        assert!(seen.contains(&key));
    }

    #[test]
    fn test_read_only_surface() {
        let frozen: FrozenDict<&str, i32> = [("x", 1)].into_iter().collect();
        assert_eq!(frozen.get(&"x"), Ok(Some(1)));
        assert_eq!(frozen.get(&"q"), Ok(None));
        assert!(frozen.items().equals(&frozen.items().intersection(&vec![("x", 1)])));
        assert_eq!(format!("{:?}", frozen), r#"FrozenDict({"x": 1})"#);
    }
}
