//! Live views over a [`Mapping`].
//!
//! Views borrow the mapping and hold no copy of its contents: every length,
//! membership test and iteration reads through to the mapping at that moment.
//! Interior-mutable mappings therefore show changes made through another
//! handle while a view is alive.

use crate::mapping::Mapping;
use crate::plain::ListSet;
use crate::primitives::{Container, Iterable, Len};
use crate::set::Set;
use std::fmt;
use tracing::warn;

/// Base of the three mapping views; knows only the mapping's length.
pub struct MappingView<'m, M: ?Sized> {
    mapping: &'m M,
}

impl<'m, M: ?Sized> MappingView<'m, M> {
    pub fn new(mapping: &'m M) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &'m M {
        self.mapping
    }
}

impl<M: ?Sized> Clone for MappingView<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for MappingView<'_, M> {}

impl<M: Len + ?Sized> Len for MappingView<'_, M> {
    fn len(&self) -> usize {
        self.mapping.len()
    }
}

impl<M: fmt::Debug + ?Sized> fmt::Debug for MappingView<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MappingView").field(&self.mapping).finish()
    }
}

macro_rules! view_struct {
    ($(#[$meta:meta])* $View:ident) => {
        $(#[$meta])*
        pub struct $View<'m, M: ?Sized> {
            view: MappingView<'m, M>,
        }

        impl<'m, M: ?Sized> $View<'m, M> {
            pub fn new(mapping: &'m M) -> Self {
                Self {
                    view: MappingView::new(mapping),
                }
            }

            pub fn mapping(&self) -> &'m M {
                self.view.mapping
            }
        }

        impl<M: ?Sized> Clone for $View<'_, M> {
            fn clone(&self) -> Self {
                Self { view: self.view }
            }
        }

        impl<M: Len + ?Sized> Len for $View<'_, M> {
            fn len(&self) -> usize {
                self.view.len()
            }
        }
    };
}

view_struct!(
    /// The mapping's keys, as a [`Set`].
    KeysView
);
view_struct!(
    /// The mapping's `(key, value)` pairs, as a [`Set`].
    ItemsView
);
view_struct!(
    /// The mapping's values. Not a set: values may repeat.
    ValuesView
);

impl<M: Mapping + ?Sized> Iterable for KeysView<'_, M> {
    type Item = M::Item;
    type Iter<'a> = M::Iter<'a> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.view.mapping.iterate()
    }
}

impl<M: Mapping + ?Sized> Container<M::Item> for KeysView<'_, M> {
    fn contains(&self, key: &M::Item) -> bool {
        self.view.mapping.contains(key)
    }
}

impl<M> Set for KeysView<'_, M>
where
    M: Mapping + ?Sized,
    M::Item: PartialEq,
{
    type Output = ListSet<M::Item>;
}

impl<M> fmt::Debug for KeysView<'_, M>
where
    M: Mapping + ?Sized,
    M::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeysView(")?;
        f.debug_list().entries(self.iterate()).finish()?;
        f.write_str(")")
    }
}

/// Pairs yielded by walking the keys and looking each one up.
pub struct ItemsIter<'a, M: Mapping + ?Sized + 'a> {
    mapping: &'a M,
    keys: M::Iter<'a>,
}

impl<'a, M: Mapping + ?Sized + 'a> ItemsIter<'a, M> {
    pub fn new(mapping: &'a M) -> Self {
        Self {
            mapping,
            keys: mapping.iterate(),
        }
    }
}

impl<'a, M: Mapping + ?Sized + 'a> Iterator for ItemsIter<'a, M> {
    type Item = (M::Item, M::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        match self.mapping.get_item(&key) {
            Ok(value) => Some((key, value)),
            Err(err) => {
                warn!(%err, "key vanished during item iteration");
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.keys.size_hint().1)
    }
}

impl<M: Mapping + ?Sized> Iterable for ItemsView<'_, M> {
    type Item = (M::Item, M::Value);
    type Iter<'a> = ItemsIter<'a, M> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        ItemsIter::new(self.view.mapping)
    }
}

/// A pair is present when its key looks up to an equal value.
impl<M> Container<(M::Item, M::Value)> for ItemsView<'_, M>
where
    M: Mapping + ?Sized,
    M::Value: PartialEq,
{
    fn contains(&self, item: &(M::Item, M::Value)) -> bool {
        let (key, value) = item;
        matches!(self.view.mapping.get_item(key), Ok(found) if found == *value)
    }
}

impl<M> Set for ItemsView<'_, M>
where
    M: Mapping + ?Sized,
    M::Item: PartialEq,
    M::Value: PartialEq,
{
    type Output = ListSet<(M::Item, M::Value)>;
}

impl<M> fmt::Debug for ItemsView<'_, M>
where
    M: Mapping + ?Sized,
    M::Item: fmt::Debug,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ItemsView(")?;
        f.debug_list().entries(self.iterate()).finish()?;
        f.write_str(")")
    }
}

/// Values yielded by walking the keys and looking each one up.
pub struct ValuesIter<'a, M: Mapping + ?Sized + 'a> {
    items: ItemsIter<'a, M>,
}

impl<'a, M: Mapping + ?Sized + 'a> ValuesIter<'a, M> {
    pub fn new(mapping: &'a M) -> Self {
        Self {
            items: ItemsIter::new(mapping),
        }
    }
}

impl<'a, M: Mapping + ?Sized + 'a> Iterator for ValuesIter<'a, M> {
    type Item = M::Value;

    fn next(&mut self) -> Option<M::Value> {
        self.items.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<M: Mapping + ?Sized> Iterable for ValuesView<'_, M> {
    type Item = M::Value;
    type Iter<'a> = ValuesIter<'a, M> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        ValuesIter::new(self.view.mapping)
    }
}

/// Linear scan over the values.
impl<M> Container<M::Value> for ValuesView<'_, M>
where
    M: Mapping + ?Sized,
    M::Value: PartialEq,
{
    fn contains(&self, value: &M::Value) -> bool {
        self.iterate().any(|candidate| candidate == *value)
    }
}

impl<M> fmt::Debug for ValuesView<'_, M>
where
    M: Mapping + ?Sized,
    M::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValuesView(")?;
        f.debug_list().entries(self.iterate()).finish()?;
        f.write_str(")")
    }
}
