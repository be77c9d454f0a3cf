//! Immutable, hashable set.

use collabc_core::{Container, HashableSet, Iterable, Len, Set};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::hash_map::RandomState;
use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::Cloned;
use std::ops::{BitAnd, BitOr, BitXor, Sub};

/// A set fixed at construction.
///
/// Equal frozen sets hash equally whatever order their elements arrived
/// in, so they can be used as map keys or members of other sets. The set
/// hash is taken over the elements alone; the backing hasher `S` never
/// reaches it.
#[derive(Clone, Serialize)]
#[serde(transparent, bound(serialize = "T: Serialize"))]
pub struct FrozenSet<T: Eq + Hash, S: BuildHasher = RandomState> {
    items: HashSet<T, S>,
}

impl<T: Eq + Hash, S: BuildHasher + Default> FrozenSet<T, S> {
    pub fn empty() -> Self {
        Self {
            items: HashSet::default(),
        }
    }
}

impl<T: Eq + Hash, S: BuildHasher + Default> Default for FrozenSet<T, S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Eq + Hash, S: BuildHasher + Default> FromIterator<T> for FrozenSet<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'de, T, S> Deserialize<'de> for FrozenSet<T, S>
where
    T: Eq + Hash + Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(|items| items.into_iter().collect())
    }
}

impl<T: Eq + Hash, S: BuildHasher> Len for FrozenSet<T, S> {
    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone + Eq + Hash, S: BuildHasher> Iterable for FrozenSet<T, S> {
    type Item = T;
    type Iter<'a> = Cloned<hash_set::Iter<'a, T>> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        self.items.iter().cloned()
    }
}

impl<T: Eq + Hash, S: BuildHasher> Container<T> for FrozenSet<T, S> {
    fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }
}

impl<T: Clone + Eq + Hash, S: BuildHasher + Default> Set for FrozenSet<T, S> {
    type Output = FrozenSet<T, S>;
}

impl<T: Clone + Eq + Hash, S: BuildHasher + Default> HashableSet for FrozenSet<T, S> {}

impl<T: Clone + Eq + Hash, S: BuildHasher + Default> Hash for FrozenSet<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.set_hash());
    }
}

impl<T: Clone + Eq + Hash, S: BuildHasher + Default> PartialEq for FrozenSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Clone + Eq + Hash, S: BuildHasher + Default> Eq for FrozenSet<T, S> {}

impl<T: Clone + Eq + Hash, S: BuildHasher + Default> PartialOrd for FrozenSet<T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.set_cmp(other)
    }
}

impl<T: Eq + Hash + fmt::Debug, S: BuildHasher> fmt::Debug for FrozenSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FrozenSet(")?;
        f.debug_set().entries(self.items.iter()).finish()?;
        f.write_str(")")
    }
}

macro_rules! impl_set_operator {
    ($Op:ident, $op:ident, $derived:ident) => {
        impl<T: Clone + Eq + Hash, S: BuildHasher + Default> $Op<&FrozenSet<T, S>> for &FrozenSet<T, S> {
            type Output = FrozenSet<T, S>;

            fn $op(self, rhs: &FrozenSet<T, S>) -> FrozenSet<T, S> {
                Set::$derived(self, rhs)
            }
        }
    };
}

impl_set_operator!(BitAnd, bitand, intersection);
impl_set_operator!(BitOr, bitor, union);
impl_set_operator!(Sub, sub, difference);
impl_set_operator!(BitXor, bitxor, symmetric_difference);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn frozen(values: &[i32]) -> FrozenSet<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_equal_sets_hash_equally() {
        let a = frozen(&[1, 2, 3]);
        let b = frozen(&[3, 2, 1, 1]);
        assert_eq!(a, b);
        assert_eq!(a.set_hash(), b.set_hash());
        assert_ne!(a.set_hash(), frozen(&[1, 2]).set_hash());
    }

    #[test]
    fn test_hash_ignores_backing_hasher() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::BuildHasherDefault;

        let random: FrozenSet<i32> = [4, 8, 15, 16, 23, 42].into_iter().collect();
        let seeded: FrozenSet<i32, BuildHasherDefault<DefaultHasher>> =
            [42, 23, 16, 15, 8, 4].into_iter().collect();
        let other_random: FrozenSet<i32> = [42, 4, 23, 8, 16, 15].into_iter().collect();

        assert!(random.equals(&seeded));
        assert_eq!(random.set_hash(), seeded.set_hash());
        assert_eq!(random.set_hash(), other_random.set_hash());
        assert_ne!(seeded.set_hash(), frozen(&[4, 8]).set_hash());
    }

    #[test]
    fn test_usable_as_key() {
        let mut seen: HashSet<FrozenSet<i32>> = HashSet::new();
        seen.insert(frozen(&[1, 2]));
        assert!(seen.contains(&frozen(&[2, 1])));
        assert!(!seen.contains(&frozen(&[2])));
    }

    #[test]
    fn test_operators_return_frozen() {
        let a = frozen(&[1, 2, 3]);
        let b = frozen(&[2, 3, 4]);
        assert_eq!(&a & &b, frozen(&[2, 3]));
        assert_eq!(&a | &b, frozen(&[1, 2, 3, 4]));
        assert_eq!(&a - &b, frozen(&[1]));
        assert_eq!(&a ^ &b, frozen(&[1, 4]));
    }

    #[test]
    fn test_mixed_operand_types() {
        let a = frozen(&[1, 2, 3]);
        let tree: BTreeSet<i32> = [3, 9].into_iter().collect();
        let joined: FrozenSet<i32> = a.union(&tree);
        assert_eq!(joined, frozen(&[1, 2, 3, 9]));
        assert!(a > frozen(&[1]));
        assert_eq!(a.partial_cmp(&frozen(&[7])), None);
    }

    #[test]
    fn test_debug_and_serde() {
        assert_eq!(format!("{:?}", frozen(&[5])), "FrozenSet({5})");
        let back: FrozenSet<i32> = serde_json::from_str("[1,2,2]").unwrap();
        assert_eq!(back, frozen(&[1, 2]));
    }
}
