//! Property-based tests for the derived operations
//!
//! Every derived operation must agree with the host collection that
//! implements the same thing natively:
//!  - Set algebra on `ListSet` matches `BTreeSet`'s own operators
//!  - Subset order and equality match `BTreeSet`'s
//!  - Mapping `update` applies later assignments last
//!  - `SeqIter` and `Reversed` visit exactly the elements `get_item` reaches

use collabc_core::hash::unordered_hash;
use collabc_core::prelude::*;
use collabc_core::sequence::{scan_contains, SeqIter};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

fn small_set() -> impl Strategy<Value = BTreeSet<i32>> {
    prop::collection::btree_set(0i32..20, 0..12)
}

fn small_map() -> impl Strategy<Value = BTreeMap<u8, i32>> {
    prop::collection::btree_map(0u8..16, any::<i32>(), 0..10)
}

fn list_of(set: &BTreeSet<i32>) -> ListSet<i32> {
    set.iter().copied().collect()
}

/// Vector with only `get_item` exposed, so iteration goes through `SeqIter`.
struct Indexed(Vec<i32>);

impl Len for Indexed {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Iterable for Indexed {
    type Item = i32;
    type Iter<'a> = SeqIter<'a, Self> where Self: 'a;

    fn iterate(&self) -> Self::Iter<'_> {
        SeqIter::new(self)
    }
}

impl Container<i32> for Indexed {
    fn contains(&self, value: &i32) -> bool {
        scan_contains(self, value)
    }
}

impl Sequence for Indexed {
    fn get_item(&self, index: usize) -> collabc_core::Result<i32> {
        self.0
            .get(index)
            .copied()
            .ok_or(CollError::IndexOutOfRange {
                index,
                length: self.0.len(),
            })
    }
}

// ============================================================================
// Set Properties
// ============================================================================

proptest! {
    #[test]
    fn derived_algebra_matches_native(a in small_set(), b in small_set()) {
        let left = list_of(&a);

        let both: ListSet<i32> = left.intersection(&b);
        let expected: BTreeSet<i32> = a.intersection(&b).copied().collect();
        prop_assert!(both.equals(&expected));

        let either: ListSet<i32> = left.union(&b);
        let expected: BTreeSet<i32> = a.union(&b).copied().collect();
        prop_assert!(either.equals(&expected));

        let only_left: ListSet<i32> = left.difference(&b);
        let expected: BTreeSet<i32> = a.difference(&b).copied().collect();
        prop_assert!(only_left.equals(&expected));

        let one_side: ListSet<i32> = left.symmetric_difference(&b);
        let expected: BTreeSet<i32> = a.symmetric_difference(&b).copied().collect();
        prop_assert!(one_side.equals(&expected));
    }

    #[test]
    fn derived_comparisons_match_native(a in small_set(), b in small_set()) {
        let left = list_of(&a);
        prop_assert_eq!(Set::is_subset(&left, &b), a.is_subset(&b));
        prop_assert_eq!(Set::is_superset(&left, &b), a.is_superset(&b));
        prop_assert_eq!(left.is_disjoint(&b), a.is_disjoint(&b));
        prop_assert_eq!(left.equals(&b), a == b);
        prop_assert_eq!(
            left.is_proper_subset(&b),
            a.is_subset(&b) && a.len() < b.len()
        );
    }

    #[test]
    fn symmetric_difference_is_union_of_differences(a in small_set(), b in small_set()) {
        let left = list_of(&a);
        let right = list_of(&b);
        let sym: ListSet<i32> = left.symmetric_difference(&right);
        let ab: ListSet<i32> = left.difference(&right);
        let ba: ListSet<i32> = right.difference(&left);
        let joined: ListSet<i32> = ab.union(&ba);
        prop_assert!(sym.equals(&joined));
    }

    #[test]
    fn in_place_updates_match_binary_ops(a in small_set(), b in small_set()) {
        let left = list_of(&a);

        let mut merged = left.clone();
        merged.union_update(b.iter().copied()).unwrap();
        prop_assert!(merged.equals(&left.union(&b)));

        let mut kept = left.clone();
        kept.intersection_update(&b).unwrap();
        prop_assert!(kept.equals(&left.intersection(&b)));

        let mut flipped = left.clone();
        flipped.symmetric_difference_update(&b).unwrap();
        prop_assert!(flipped.equals(&left.symmetric_difference(&b)));

        let mut trimmed = left.clone();
        trimmed.difference_update(b.iter().copied()).unwrap();
        prop_assert!(trimmed.equals(&left.difference(&b)));
    }

    #[test]
    fn unordered_hash_ignores_order(mut values in prop::collection::vec(any::<u64>(), 0..16)) {
        let forward = unordered_hash(values.len(), values.iter().copied());
        values.sort_unstable();
        let sorted = unordered_hash(values.len(), values.iter().copied());
        prop_assert_eq!(forward, sorted);
    }
}

// ============================================================================
// Mapping Properties
// ============================================================================

proptest! {
    #[test]
    fn update_then_extra_last_wins(
        base in small_map(),
        source in small_map(),
        extra in small_map()
    ) {
        let mut target: HashMap<u8, i32> = base.clone().into_iter().collect();
        target
            .update(Some(UpdateSource::mapping(&source)), extra.clone())
            .unwrap();

        let mut expected = base;
        expected.extend(source);
        expected.extend(extra);
        prop_assert!(target.mapping_eq(&expected));
    }

    #[test]
    fn items_view_contains_every_item(map in small_map()) {
        let items = map.items();
        for (key, value) in map.iter() {
            prop_assert!(items.contains(&(*key, *value)));
            prop_assert!(!items.contains(&(*key, value.wrapping_add(1))));
        }
        prop_assert_eq!(Len::len(&items), map.len());
    }

    #[test]
    fn pop_every_key_empties(map in small_map()) {
        let mut target = map.clone();
        for key in map.keys() {
            let popped = MutableMapping::pop(&mut target, key, None).unwrap();
            prop_assert_eq!(Some(&popped), map.get(key));
        }
        prop_assert!(target.is_empty());
    }
}

// ============================================================================
// Sequence Properties
// ============================================================================

proptest! {
    #[test]
    fn seq_iter_visits_every_index(values in prop::collection::vec(-50i32..50, 0..20)) {
        let seq = Indexed(values.clone());
        prop_assert_eq!(seq.iterate().collect::<Vec<_>>(), values.clone());

        let reversed: Vec<i32> = values.iter().rev().copied().collect();
        prop_assert_eq!(seq.reversed().collect::<Vec<_>>(), reversed);
    }

    #[test]
    fn index_and_count_match_scan(
        values in prop::collection::vec(0i32..5, 0..20),
        needle in 0i32..6
    ) {
        let seq = Indexed(values.clone());
        prop_assert_eq!(
            seq.index(&needle).ok(),
            values.iter().position(|v| *v == needle)
        );
        prop_assert_eq!(
            seq.count(&needle),
            values.iter().filter(|v| **v == needle).count()
        );
        prop_assert_eq!(seq.contains(&needle), values.contains(&needle));
    }

    #[test]
    fn default_reverse_matches_slice_reverse(values in prop::collection::vec(any::<u8>(), 0..20)) {
        let mut deque: std::collections::VecDeque<u8> = values.iter().copied().collect();
        MutableSequence::reverse(&mut deque).unwrap();
        let expected: Vec<u8> = values.iter().rev().copied().collect();
        prop_assert_eq!(deque.into_iter().collect::<Vec<_>>(), expected);
    }
}
