//! Aliased mapping handles.
//!
//! Cloning a `SharedDict` yields another handle onto the same storage. A
//! view borrowed from one handle keeps reading live data while another
//! handle mutates it, which is how mapping views behave when a mapping is
//! reachable through more than one name.

use crate::dict::Dict;
use collabc_core::{Container, Iterable, Len, Mapping, MutableMapping, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub struct SharedDict<K, V> {
    inner: Rc<RefCell<Dict<K, V>>>,
}

impl<K, V> SharedDict<K, V> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Dict::new())),
        }
    }

    /// True when both handles refer to the same storage.
    pub fn same_storage(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy of the current contents, detached from every handle.
    pub fn snapshot(&self) -> Dict<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.inner.borrow().clone()
    }
}

impl<K, V> Clone for SharedDict<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SharedDict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V> FromIterator<(K, V)> for SharedDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: Rc::new(RefCell::new(iter.into_iter().collect())),
        }
    }
}

/// Keys read one position at a time, so no borrow outlives a step.
pub struct SharedKeys<'a, K, V> {
    dict: &'a SharedDict<K, V>,
    index: usize,
}

impl<'a, K: Clone, V> Iterator for SharedKeys<'a, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let key = self.dict.inner.borrow().key_at(self.index).cloned()?;
        self.index += 1;
        Some(key)
    }
}

impl<K, V> Len for SharedDict<K, V> {
    fn len(&self) -> usize {
        self.inner.borrow().len()
    }
}

impl<K: Clone, V> Iterable for SharedDict<K, V> {
    type Item = K;
    type Iter<'a> = SharedKeys<'a, K, V> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SharedKeys {
            dict: self,
            index: 0,
        }
    }
}

impl<K: Clone + PartialEq, V: Clone> Container<K> for SharedDict<K, V> {
    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }
}

impl<K: Clone + PartialEq, V: Clone> Mapping for SharedDict<K, V> {
    type Value = V;

    fn get_item(&self, key: &K) -> Result<V> {
        self.inner.borrow().get_item(key)
    }
}

impl<K: Clone + PartialEq, V: Clone> MutableMapping for SharedDict<K, V> {
    fn set_item(&mut self, key: K, value: V) -> Result<()> {
        self.inner.borrow_mut().set_item(key, value)
    }

    fn del_item(&mut self, key: &K) -> Result<()> {
        self.inner.borrow_mut().del_item(key)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SharedDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedDict({:?})", self.inner.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_share_storage() {
        let a: SharedDict<&str, i32> = [("k", 1)].into_iter().collect();
        let mut b = a.clone();
        assert!(a.same_storage(&b));

        b.set_item("j", 2).unwrap();
        assert_eq!(a.get_item(&"j"), Ok(2));
        assert_eq!(a.len(), 2);

        let detached = a.snapshot();
        b.del_item(&"k").unwrap();
        assert_eq!(detached.len(), 2);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_views_are_live() {
        let owner: SharedDict<String, i32> = SharedDict::new();
        let mut writer = owner.clone();

        let keys = owner.keys();
        let items = owner.items();
        let values = owner.values();
        assert!(!keys.contains(&"x".to_string()));

        writer.set_item("x".to_string(), 5).unwrap();
        assert!(keys.contains(&"x".to_string()));
        assert!(items.contains(&("x".to_string(), 5)));
        assert!(values.contains(&5));
        assert_eq!(keys.len(), 1);

        writer.set_item("x".to_string(), 6).unwrap();
        assert!(!items.contains(&("x".to_string(), 5)));
        assert_eq!(values.iterate().collect::<Vec<_>>(), vec![6]);
    }

    #[test]
    fn test_debug() {
        let dict: SharedDict<u8, u8> = [(1, 2)].into_iter().collect();
        assert_eq!(format!("{:?}", dict), "SharedDict({1: 2})");
    }
}
