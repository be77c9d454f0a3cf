//! Primitive capabilities.
//!
//! Each primitive declares exactly one required operation. Composite
//! capabilities (`Set`, `Mapping`, `Sequence`) are built from these and
//! derive everything else from them.
//!
//! Rust reserves `Sized` and `Iterator`, so those two capabilities are
//! named [`Len`] and [`Cursor`] here.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

/// A collection that knows how many elements it holds.
pub trait Len {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Membership test against a query value.
pub trait Container<Q: ?Sized> {
    fn contains(&self, value: &Q) -> bool;
}

/// Produces a fresh iterator on every call.
///
/// Two calls to [`Iterable::iterate`] never share position state. Elements
/// are yielded by value; host registrations clone out of their storage.
pub trait Iterable {
    type Item;

    type Iter<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;

    fn iterate(&self) -> Self::Iter<'_>;
}

/// An iterator that stays exhausted once it has returned `None`.
///
/// Every fused iterator qualifies; an iterator is its own iterable through
/// `IntoIterator`.
pub trait Cursor: Iterator + FusedIterator {}

impl<I: Iterator + FusedIterator> Cursor for I {}

/// Fixed-width hash consistent with the type's equality.
///
/// Anything implementing [`Hash`] gets a hash value here, but the
/// capability is narrower: recognition and the registry never report
/// `Hashable` for a type that also has a mutable capability, since its hash
/// would change under mutation.
pub trait Hashable {
    fn hash_value(&self) -> u64;
}

impl<T: Hash + ?Sized> Hashable for T {
    fn hash_value(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// Something that can be invoked with an argument tuple.
pub trait Callable<Args> {
    type Output;

    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($arg:ident),*) => {
        impl<F, R, $($arg),*> Callable<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> R,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn call(&self, ($($arg,)*): ($($arg,)*)) -> R {
                self($($arg),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A);
impl_callable!(A, B);
impl_callable!(A, B, C);
impl_callable!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    struct Countdown(u32);

    impl Iterator for Countdown {
        type Item = u32;

        fn next(&mut self) -> Option<u32> {
            if self.0 == 0 {
                None
            } else {
                self.0 -= 1;
                Some(self.0)
            }
        }
    }

    impl FusedIterator for Countdown {}

    fn drain_cursor<C: Cursor>(mut cursor: C) -> (usize, bool) {
        let count = cursor.by_ref().count();
        (count, cursor.next().is_none())
    }

    #[test]
    fn test_cursor_stays_exhausted() {
        let (count, exhausted) = drain_cursor(Countdown(3));
        assert_eq!(count, 3);
        assert!(exhausted);
    }

    #[test]
    fn test_hashable_matches_equality() {
        assert_eq!("abc".hash_value(), String::from("abc").hash_value());
        assert_eq!(42u64.hash_value(), 42u64.hash_value());
    }

    #[test]
    fn test_callable_arities() {
        let zero = || 7;
        let one = |x: i32| x + 1;
        let two = |x: i32, y: i32| x * y;
        let four = |a: u8, b: u8, c: u8, d: u8| a + b + c + d;

        assert_eq!(zero.call(()), 7);
        assert_eq!(one.call((1,)), 2);
        assert_eq!(two.call((3, 4)), 12);
        assert_eq!(four.call((1, 2, 3, 4)), 10);
    }
}
