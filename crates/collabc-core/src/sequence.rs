//! Sequence capabilities.
//!
//! A [`Sequence`] supplies positional `get_item`; iteration, reversal,
//! membership, `index` and `count` all follow from it. Types that only
//! implement `get_item` can borrow [`SeqIter`] as their iterator and
//! [`scan_contains`] as their membership test.

use crate::error::{CollError, Result};
use crate::primitives::{Container, Iterable, Len};
use std::iter::FusedIterator;
use tracing::warn;

pub trait Sequence: Len + Iterable + Container<<Self as Iterable>::Item> {
    /// Element at `index`, or [`CollError::IndexOutOfRange`].
    fn get_item(&self, index: usize) -> Result<Self::Item>;

    /// Elements from the last index down to 0.
    fn reversed(&self) -> Reversed<'_, Self> {
        Reversed::new(self)
    }

    /// Position of the first element equal to `value`.
    fn index(&self, value: &Self::Item) -> Result<usize>
    where
        Self::Item: PartialEq,
    {
        self.iterate()
            .position(|item| item == *value)
            .ok_or(CollError::ValueNotFound)
    }

    fn count(&self, value: &Self::Item) -> usize
    where
        Self::Item: PartialEq,
    {
        self.iterate().filter(|item| item == value).count()
    }
}

/// Membership by iterating until an equal element turns up.
pub fn scan_contains<S>(seq: &S, value: &S::Item) -> bool
where
    S: Sequence + ?Sized,
    S::Item: PartialEq,
{
    seq.iterate().any(|item| item == *value)
}

/// Forward iterator driven by `get_item` at 0, 1, 2, ...
///
/// Stops at the first [`CollError::IndexOutOfRange`]; the length is never
/// consulted, so a sequence that grows during iteration is followed.
pub struct SeqIter<'a, S: ?Sized> {
    seq: &'a S,
    index: usize,
    done: bool,
}

impl<'a, S: ?Sized> SeqIter<'a, S> {
    pub fn new(seq: &'a S) -> Self {
        Self {
            seq,
            index: 0,
            done: false,
        }
    }
}

impl<'a, S: Sequence + ?Sized> Iterator for SeqIter<'a, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.done {
            return None;
        }
        match self.seq.get_item(self.index) {
            Ok(item) => {
                self.index += 1;
                Some(item)
            }
            Err(CollError::IndexOutOfRange { .. }) => {
                self.done = true;
                None
            }
            Err(err) => {
                warn!(index = self.index, %err, "sequence iteration stopped");
                self.done = true;
                None
            }
        }
    }
}

impl<'a, S: Sequence + ?Sized> FusedIterator for SeqIter<'a, S> {}

/// Backward iterator from `len() - 1` down to 0.
pub struct Reversed<'a, S: ?Sized> {
    seq: &'a S,
    remaining: usize,
}

impl<'a, S: Sequence + ?Sized> Reversed<'a, S> {
    pub fn new(seq: &'a S) -> Self {
        Self {
            seq,
            remaining: seq.len(),
        }
    }
}

impl<'a, S: Sequence + ?Sized> Iterator for Reversed<'a, S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match self.seq.get_item(self.remaining) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(index = self.remaining, %err, "reverse iteration stopped");
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<'a, S: Sequence + ?Sized> FusedIterator for Reversed<'a, S> {}

/// A sequence that supports positional assignment, deletion and insertion.
pub trait MutableSequence: Sequence {
    fn set_item(&mut self, index: usize, value: Self::Item) -> Result<()>;

    fn del_item(&mut self, index: usize) -> Result<()>;

    /// Insert before `index`. `index == len()` appends; anything larger is
    /// [`CollError::IndexOutOfRange`].
    fn insert(&mut self, index: usize, value: Self::Item) -> Result<()>;

    fn append(&mut self, value: Self::Item) -> Result<()> {
        let end = self.len();
        self.insert(end, value)
    }

    /// Reverse in place by swapping mirrored positions.
    fn reverse(&mut self) -> Result<()> {
        let len = self.len();
        for i in 0..len / 2 {
            let j = len - i - 1;
            let front = self.get_item(i)?;
            let back = self.get_item(j)?;
            self.set_item(i, back)?;
            self.set_item(j, front)?;
        }
        Ok(())
    }

    /// Append each value in turn.
    fn extend_from<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        for value in values {
            self.append(value)?;
        }
        Ok(())
    }

    /// Remove and return the last element.
    fn pop(&mut self) -> Result<Self::Item> {
        match self.len() {
            0 => Err(CollError::IndexOutOfRange {
                index: 0,
                length: 0,
            }),
            len => self.pop_at(len - 1),
        }
    }

    /// Fetch then delete the element at `index`.
    fn pop_at(&mut self, index: usize) -> Result<Self::Item> {
        let value = self.get_item(index)?;
        self.del_item(index)?;
        Ok(value)
    }

    /// Delete the first element equal to `value`.
    fn remove(&mut self, value: &Self::Item) -> Result<()>
    where
        Self::Item: PartialEq,
    {
        let index = self.index(value)?;
        self.del_item(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Squares of 0..n, computed on demand.
    struct Squares(usize);

    impl Len for Squares {
        fn len(&self) -> usize {
            self.0
        }
    }

    impl Iterable for Squares {
        type Item = usize;
        type Iter<'a> = SeqIter<'a, Self> where Self: 'a;

        fn iterate(&self) -> Self::Iter<'_> {
            SeqIter::new(self)
        }
    }

    impl Container<usize> for Squares {
        fn contains(&self, value: &usize) -> bool {
            scan_contains(self, value)
        }
    }

    impl Sequence for Squares {
        fn get_item(&self, index: usize) -> Result<usize> {
            if index < self.0 {
                Ok(index * index)
            } else {
                Err(CollError::IndexOutOfRange {
                    index,
                    length: self.0,
                })
            }
        }
    }

    /// Refuses every lookup with a non-range error.
    struct Broken;

    impl Len for Broken {
        fn len(&self) -> usize {
            2
        }
    }

    impl Iterable for Broken {
        type Item = u8;
        type Iter<'a> = SeqIter<'a, Self> where Self: 'a;

        fn iterate(&self) -> Self::Iter<'_> {
            SeqIter::new(self)
        }
    }

    impl Container<u8> for Broken {
        fn contains(&self, value: &u8) -> bool {
            scan_contains(self, value)
        }
    }

    impl Sequence for Broken {
        fn get_item(&self, _index: usize) -> Result<u8> {
            Err(CollError::Unsupported("get_item"))
        }
    }

    #[test]
    fn test_iteration_from_get_item() {
        let squares = Squares(4);
        assert_eq!(squares.iterate().collect::<Vec<_>>(), vec![0, 1, 4, 9]);
        assert_eq!(squares.reversed().collect::<Vec<_>>(), vec![9, 4, 1, 0]);
    }

    #[test]
    fn test_derived_queries() {
        let squares = Squares(5);
        assert!(squares.contains(&16));
        assert!(!squares.contains(&15));
        assert_eq!(squares.index(&9), Ok(3));
        assert_eq!(squares.index(&2), Err(CollError::ValueNotFound));
        assert_eq!(squares.count(&4), 1);
    }

    #[test]
    fn test_seq_iter_is_fused() {
        let squares = Squares(1);
        let mut iter = squares.iterate();
        assert_eq!(iter.next(), Some(0));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_unexpected_error_ends_iteration() {
        assert_eq!(Broken.iterate().count(), 0);
        assert_eq!(Broken.reversed().count(), 0);
        assert!(!Broken.contains(&1));
    }

    #[test]
    fn test_empty_sequence() {
        let empty = Squares(0);
        assert_eq!(empty.iterate().next(), None);
        assert_eq!(empty.reversed().next(), None);
        assert_eq!(empty.count(&0), 0);
    }
}
