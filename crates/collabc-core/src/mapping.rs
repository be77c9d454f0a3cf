//! Mapping capabilities.
//!
//! A [`Mapping`] iterates over its keys (its `Iterable::Item` is the key
//! type) and supplies `get_item`. Membership, defaulted lookup, equality,
//! and the key/item/value views are derived from those.
//!
//! Containment is defined as "lookup succeeds"; concrete mappings forward
//! their [`Container`] impl to [`Mapping::contains_key`] unless they have a
//! faster native test.

use crate::error::{CollError, Result};
use crate::primitives::{Container, Iterable, Len};
use crate::views::{ItemsIter, ItemsView, KeysView, ValuesIter, ValuesView};
use tracing::trace;

pub trait Mapping: Len + Iterable + Container<<Self as Iterable>::Item> {
    type Value;

    /// Look up `key`, reporting [`CollError::KeyNotFound`] when it is absent.
    fn get_item(&self, key: &Self::Item) -> Result<Self::Value>;

    /// `None` for a missing key. Any other lookup error propagates.
    fn get(&self, key: &Self::Item) -> Result<Option<Self::Value>> {
        match self.get_item(key) {
            Ok(value) => Ok(Some(value)),
            Err(CollError::KeyNotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// `default` for a missing key. Any other lookup error propagates.
    fn get_or(&self, key: &Self::Item, default: Self::Value) -> Result<Self::Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    fn contains_key(&self, key: &Self::Item) -> bool {
        self.get_item(key).is_ok()
    }

    fn keys(&self) -> KeysView<'_, Self> {
        KeysView::new(self)
    }

    fn items(&self) -> ItemsView<'_, Self> {
        ItemsView::new(self)
    }

    fn values(&self) -> ValuesView<'_, Self> {
        ValuesView::new(self)
    }

    fn iter_items(&self) -> ItemsIter<'_, Self> {
        ItemsIter::new(self)
    }

    fn iter_values(&self) -> ValuesIter<'_, Self> {
        ValuesIter::new(self)
    }

    /// Eager list of keys.
    fn keys_list(&self) -> Vec<Self::Item> {
        self.iterate().collect()
    }

    /// Eager list of `(key, value)` pairs.
    fn items_list(&self) -> Vec<(Self::Item, Self::Value)> {
        self.iter_items().collect()
    }

    /// Eager list of values.
    fn values_list(&self) -> Vec<Self::Value> {
        self.iter_values().collect()
    }

    /// Same key to value association, whatever the order or backing.
    fn mapping_eq<O>(&self, other: &O) -> bool
    where
        O: Mapping<Item = Self::Item, Value = Self::Value> + ?Sized,
        Self::Value: PartialEq,
    {
        if self.len() != other.len() {
            return false;
        }
        self.iter_items()
            .all(|(key, value)| matches!(other.get_item(&key), Ok(found) if found == value))
    }
}

/// Object-safe read access to any [`Mapping`], used by [`UpdateSource`].
pub trait ErasedMapping<K, V> {
    fn for_each_entry(&self, f: &mut dyn FnMut(K, V) -> Result<()>) -> Result<()>;
}

impl<M: Mapping + ?Sized> ErasedMapping<M::Item, M::Value> for M {
    fn for_each_entry(&self, f: &mut dyn FnMut(M::Item, M::Value) -> Result<()>) -> Result<()> {
        for key in self.iterate() {
            let value = self.get_item(&key)?;
            f(key, value)?;
        }
        Ok(())
    }
}

/// A source that is not a full [`Mapping`] but exposes a key list and lookup.
pub trait KeyedSource<K, V> {
    fn key_list(&self) -> Vec<K>;

    fn lookup(&self, key: &K) -> Result<V>;
}

/// The positional argument of [`MutableMapping::update`].
pub enum UpdateSource<'a, K, V> {
    /// Iterate the mapping's keys and copy each entry.
    Mapping(&'a dyn ErasedMapping<K, V>),
    /// Walk `key_list()` and `lookup` each key.
    Keyed(&'a dyn KeyedSource<K, V>),
    /// Assign each pair in order.
    Pairs(Box<dyn Iterator<Item = (K, V)> + 'a>),
}

impl<'a, K, V> UpdateSource<'a, K, V> {
    pub fn mapping<M>(mapping: &'a M) -> Self
    where
        M: Mapping<Item = K, Value = V>,
    {
        UpdateSource::Mapping(mapping)
    }

    pub fn keyed<S>(source: &'a S) -> Self
    where
        S: KeyedSource<K, V>,
    {
        UpdateSource::Keyed(source)
    }

    pub fn pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'a,
    {
        UpdateSource::Pairs(Box::new(pairs.into_iter()))
    }
}

/// A mapping that supports assignment and deletion by key.
pub trait MutableMapping: Mapping {
    fn set_item(&mut self, key: Self::Item, value: Self::Value) -> Result<()>;

    /// Delete `key`, or report [`CollError::KeyNotFound`].
    fn del_item(&mut self, key: &Self::Item) -> Result<()>;

    /// Fetch then delete `key`. With `default`, a missing key yields it instead.
    fn pop(&mut self, key: &Self::Item, default: Option<Self::Value>) -> Result<Self::Value> {
        match self.get_item(key) {
            Ok(value) => {
                self.del_item(key)?;
                Ok(value)
            }
            Err(CollError::KeyNotFound) => default.ok_or(CollError::KeyNotFound),
            Err(err) => Err(err),
        }
    }

    /// Remove and return the first pair the key iterator yields.
    fn popitem(&mut self) -> Result<(Self::Item, Self::Value)> {
        let key = self.iterate().next().ok_or(CollError::Empty("mapping"))?;
        let value = self.get_item(&key)?;
        self.del_item(&key)?;
        Ok((key, value))
    }

    /// Repeated [`MutableMapping::popitem`]. Slow; implementors may override.
    fn clear(&mut self) -> Result<()> {
        trace!(len = self.len(), "clearing mapping by repeated popitem");
        loop {
            match self.popitem() {
                Ok(_) => {}
                Err(CollError::Empty(_)) => return Ok(()),
                Err(err) => return Err(err),
            }
        }
    }

    /// Copy entries from `other`, then from `extra`; later assignments win.
    fn update<'s, E>(
        &mut self,
        other: Option<UpdateSource<'s, Self::Item, Self::Value>>,
        extra: E,
    ) -> Result<()>
    where
        Self::Item: 's,
        Self::Value: 's,
        E: IntoIterator<Item = (Self::Item, Self::Value)>,
    {
        match other {
            Some(UpdateSource::Mapping(source)) => {
                source.for_each_entry(&mut |key, value| self.set_item(key, value))?;
            }
            Some(UpdateSource::Keyed(source)) => {
                for key in source.key_list() {
                    let value = source.lookup(&key)?;
                    self.set_item(key, value)?;
                }
            }
            Some(UpdateSource::Pairs(pairs)) => {
                for (key, value) in pairs {
                    self.set_item(key, value)?;
                }
            }
            None => {}
        }
        for (key, value) in extra {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    /// [`MutableMapping::update`] over a positional argument list.
    ///
    /// More than one positional source is [`CollError::Arity`].
    fn update_args<'s, A, E>(&mut self, args: A, extra: E) -> Result<()>
    where
        Self::Item: 's,
        Self::Value: 's,
        A: IntoIterator<Item = UpdateSource<'s, Self::Item, Self::Value>>,
        E: IntoIterator<Item = (Self::Item, Self::Value)>,
    {
        let mut args: Vec<_> = args.into_iter().collect();
        if args.len() > 1 {
            return Err(CollError::Arity {
                max: 1,
                found: args.len(),
            });
        }
        self.update(args.pop(), extra)
    }

    /// Existing value for `key`, or insert `default` and return it.
    fn setdefault(&mut self, key: Self::Item, default: Self::Value) -> Result<Self::Value>
    where
        Self::Value: Clone,
    {
        match self.get_item(&key) {
            Ok(value) => Ok(value),
            Err(CollError::KeyNotFound) => {
                self.set_item(key, default.clone())?;
                Ok(default)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    fn sample() -> BTreeMap<String, i32> {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);
        map
    }

    struct Legacy {
        entries: Vec<(String, i32)>,
    }

    impl KeyedSource<String, i32> for Legacy {
        fn key_list(&self) -> Vec<String> {
            self.entries.iter().map(|(k, _)| k.clone()).collect()
        }

        fn lookup(&self, key: &String) -> Result<i32> {
            self.entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| *v)
                .ok_or(CollError::KeyNotFound)
        }
    }

    #[test]
    fn test_get_variants() {
        let map = sample();
        let a = "a".to_string();
        let z = "z".to_string();
        assert_eq!(map.get_item(&a), Ok(1));
        assert_eq!(map.get_item(&z), Err(CollError::KeyNotFound));
        assert_eq!(Mapping::get(&map, &a), Ok(Some(1)));
        assert_eq!(Mapping::get(&map, &z), Ok(None));
        assert_eq!(map.get_or(&z, 9), Ok(9));
        assert!(Mapping::contains_key(&map, &a));
    }

    /// Mapping whose lookups fail for a reason other than a missing key.
    struct Sealed;

    impl Len for Sealed {
        fn len(&self) -> usize {
            1
        }
    }

    impl Iterable for Sealed {
        type Item = u8;
        type Iter<'a> = std::iter::Once<u8>;

        fn iterate(&self) -> Self::Iter<'_> {
            std::iter::once(0)
        }
    }

    impl Container<u8> for Sealed {
        fn contains(&self, key: &u8) -> bool {
            *key == 0
        }
    }

    impl Mapping for Sealed {
        type Value = i32;

        fn get_item(&self, _key: &u8) -> Result<i32> {
            Err(CollError::Unsupported("lookup"))
        }
    }

    #[test]
    fn test_get_propagates_other_errors() {
        assert_eq!(Sealed.get(&0), Err(CollError::Unsupported("lookup")));
        assert_eq!(Sealed.get_or(&0, 5), Err(CollError::Unsupported("lookup")));
    }

    #[test]
    fn test_eager_lists() {
        let map = sample();
        assert_eq!(map.keys_list(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            map.items_list(),
            vec![("a".to_string(), 1), ("b".to_string(), 2)]
        );
        assert_eq!(map.values_list(), vec![1, 2]);
    }

    #[test]
    fn test_mapping_eq_ignores_backing() {
        let ordered = sample();
        let hashed: HashMap<String, i32> = ordered.clone().into_iter().collect();
        assert!(ordered.mapping_eq(&hashed));

        let mut different = hashed.clone();
        different.insert("a".to_string(), 100);
        assert!(!ordered.mapping_eq(&different));
    }

    #[test]
    fn test_pop_fetches_before_delete() {
        let mut map = sample();
        let a = "a".to_string();
        assert_eq!(MutableMapping::pop(&mut map, &a, None), Ok(1));
        assert!(!Mapping::contains_key(&map, &a));
        assert_eq!(
            MutableMapping::pop(&mut map, &"z".to_string(), Some(99)),
            Ok(99)
        );
        assert_eq!(
            MutableMapping::pop(&mut map, &"z".to_string(), None),
            Err(CollError::KeyNotFound)
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_popitem_and_clear() {
        let mut map = sample();
        let (key, value) = map.popitem().unwrap();
        assert_eq!((key.as_str(), value), ("a", 1));
        map.insert("c".to_string(), 3);
        map.set_item("d".to_string(), 4).unwrap();
        MutableMapping::clear(&mut map).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.popitem(), Err(CollError::Empty("mapping")));
    }

    #[test]
    fn test_update_from_each_source() {
        let mut target: BTreeMap<String, i32> = BTreeMap::new();
        let source = sample();
        target
            .update(Some(UpdateSource::mapping(&source)), [])
            .unwrap();
        assert!(target.mapping_eq(&source));

        let legacy = Legacy {
            entries: vec![("c".to_string(), 3)],
        };
        target.update(Some(UpdateSource::keyed(&legacy)), []).unwrap();
        assert_eq!(target.get_item(&"c".to_string()), Ok(3));

        target
            .update(Some(UpdateSource::pairs(vec![("d".to_string(), 4)])), [])
            .unwrap();
        assert_eq!(target.len(), 4);
    }

    #[test]
    fn test_update_extra_wins() {
        let mut target: HashMap<String, i32> = HashMap::new();
        let source = sample();
        target
            .update(
                Some(UpdateSource::mapping(&source)),
                [("a".to_string(), 42)],
            )
            .unwrap();
        assert_eq!(target.get_item(&"a".to_string()), Ok(42));
        assert_eq!(target.get_item(&"b".to_string()), Ok(2));
    }

    #[test]
    fn test_update_args_arity() {
        let mut target: BTreeMap<String, i32> = BTreeMap::new();
        let source = sample();
        let err = target
            .update_args(
                vec![UpdateSource::mapping(&source), UpdateSource::mapping(&source)],
                [],
            )
            .unwrap_err();
        assert_eq!(err, CollError::Arity { max: 1, found: 2 });
        assert!(target.is_empty());

        target.update_args(Vec::new(), [("x".to_string(), 1)]).unwrap();
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_setdefault() {
        let mut map = sample();
        assert_eq!(map.setdefault("a".to_string(), 50), Ok(1));
        assert_eq!(map.setdefault("n".to_string(), 50), Ok(50));
        assert_eq!(map.get_item(&"n".to_string()), Ok(50));
    }
}
