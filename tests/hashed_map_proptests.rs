// HashedMap property tests (public API only).
//
// Property 1: uniqueness and count consistency under add/remove.
//  - Model: BTreeMap of live keys to last written value.
//  - Invariant: len() == model.len(); iter() yields each key once;
//               is_empty() iff len() == 0.
//
// Property 2: collision correctness.
//  - Every key lands in the single bucket of a one-bucket table; removing
//    them one at a time in an arbitrary order never loses a sibling.
//
// Property 3: hash range and determinism for arbitrary keys and sizes.
//
// Property 4: clear removes every previously inserted key.
use chained_hashmap::{bucket_index, HashedMap, TableSize};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

proptest! {
    #[test]
    fn prop_unique_keys_and_count(
        table_size in 1usize..=16,
        ops in proptest::collection::vec((any::<bool>(), "[a-c]{1,3}", any::<u16>()), 1..150)
    ) {
        let mut m: HashedMap<String, u16> = HashedMap::with_table_size(table_size).unwrap();
        let mut model: BTreeMap<String, u16> = BTreeMap::new();

        for (is_add, key, value) in ops {
            if is_add {
                let before = m.len();
                let existed = model.insert(key.clone(), value).is_some();
                prop_assert!(m.add(key.clone(), value));
                // Update-not-duplicate: count grows only for new keys.
                prop_assert_eq!(m.len(), before + usize::from(!existed));
                prop_assert_eq!(m.get_value(key.as_str()), Some(value));
            } else {
                let removed = m.remove(key.as_str());
                prop_assert_eq!(removed, model.remove(&key).is_some());
                prop_assert!(!m.contains(key.as_str()));
            }

            prop_assert_eq!(m.len(), model.len());
            prop_assert_eq!(m.is_empty(), model.is_empty());
        }

        let keys: Vec<&String> = m.keys().collect();
        let distinct: BTreeSet<&String> = keys.iter().copied().collect();
        prop_assert_eq!(keys.len(), distinct.len());
        for (k, v) in &model {
            prop_assert_eq!(m.get(k.as_str()), Some(v));
        }
    }

    #[test]
    fn prop_single_bucket_siblings_survive(
        keys in proptest::collection::btree_set("[a-z]{1,6}", 1..30),
        order in proptest::collection::vec(any::<proptest::sample::Index>(), 30)
    ) {
        let mut m: HashedMap<String, usize> = HashedMap::with_table_size(1).unwrap();
        let keys: Vec<String> = keys.into_iter().collect();
        for (i, k) in keys.iter().enumerate() {
            m.add(k.clone(), i);
        }
        prop_assert_eq!(m.chain(0).unwrap().count(), keys.len());

        let mut remaining: Vec<(usize, String)> = keys.into_iter().enumerate().collect();
        for pick in order {
            if remaining.is_empty() {
                break;
            }
            let (_, victim) = remaining.remove(pick.index(remaining.len()));
            prop_assert!(m.remove(victim.as_str()));
            for (i, k) in &remaining {
                prop_assert_eq!(m.get_value(k.as_str()), Some(*i));
            }
            prop_assert_eq!(m.len(), remaining.len());
        }
    }

    #[test]
    fn prop_bucket_index_in_range_and_stable(key in ".{0,24}", n in 1usize..=10_000) {
        let size = TableSize::new(n).unwrap();
        let i = bucket_index(&key, size);
        prop_assert!(i < n);
        prop_assert_eq!(i, bucket_index(&key, size));

        let mut m: HashedMap<String, ()> = HashedMap::from_table_size(size);
        m.add(key.clone(), ());
        prop_assert_eq!(m.bucket_of(key.as_str()), i);
        prop_assert_eq!(m.chain(i).unwrap().count(), 1);
    }

    #[test]
    fn prop_clear_forgets_everything(
        table_size in 1usize..=8,
        keys in proptest::collection::vec("[a-z]{0,4}", 0..40)
    ) {
        let mut m: HashedMap<String, usize> = HashedMap::with_table_size(table_size).unwrap();
        for (i, k) in keys.iter().enumerate() {
            m.add(k.clone(), i);
        }
        m.clear();
        prop_assert!(m.is_empty());
        prop_assert_eq!(m.len(), 0);
        prop_assert_eq!(m.table_size(), table_size);
        for k in &keys {
            prop_assert!(!m.contains(k.as_str()));
        }
        prop_assert_eq!(m.iter().count(), 0);
    }
}
