#![cfg(test)]

// Property tests for HashedMap kept inside the crate so they can call the
// structural self-check after every step.

use crate::hashed_map::HashedMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}
impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize, i32),
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=7, proptest::collection::vec("[a-d]{0,4}", 1..=10)).prop_flat_map(
        |(table_size, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Add(i, v)),
                2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
                3 => idx.clone().prop_map(OpI::Remove),
                2 => idx.clone().prop_map(OpI::Get),
                2 => prop_oneof![
                    contains_pool.prop_map(|s: String| s),
                    "[a-d]{0,4}".prop_map(|s| s)
                ]
                .prop_map(OpI::Contains),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => Just(OpI::Clear),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80)
                .prop_map(move |ops| (table_size, pool.clone(), ops))
        },
    )
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences on tables small
// enough that most keys collide:
// - Keys are unique; re-adding a key updates its value without changing len.
// - `get`/`get_value`/`contains` agree with the model, including borrowed `&str` lookups.
// - `remove` reports presence and leaves every other entry reachable.
// - `clear` empties the map and keeps the table size.
// - Structural self-check holds after each op (placement, no orphans, count).
// - Within a bucket, entries are ordered newest-first by first insertion.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((table_size, pool, ops) in arb_scenario()) {
        let mut sut: HashedMap<Key, i32> = HashedMap::with_table_size(table_size).unwrap();
        let mut model: HashMap<Key, i32> = HashMap::new();
        // Live keys in order of first insertion.
        let mut arrival: Vec<Key> = Vec::new();

        for op in ops {
            match op {
                OpI::Add(i, v) => {
                    let k = key_from(&pool, i);
                    prop_assert!(sut.add(k.clone(), v));
                    if model.insert(k.clone(), v).is_none() {
                        arrival.push(k);
                    }
                }
                OpI::Insert(i, v) => {
                    let k = key_from(&pool, i);
                    let prev = sut.insert(k.clone(), v);
                    let mprev = model.insert(k.clone(), v);
                    prop_assert_eq!(prev, mprev);
                    if mprev.is_none() {
                        arrival.push(k);
                    }
                }
                OpI::Remove(i) => {
                    let k = key_from(&pool, i);
                    let removed = sut.remove(k.0.as_str());
                    prop_assert_eq!(removed, model.remove(&k).is_some());
                    arrival.retain(|a| a != &k);
                    prop_assert!(!sut.contains(&k));
                    // A second remove never succeeds.
                    prop_assert!(!sut.remove(&k));
                }
                OpI::Get(i) => {
                    let k = key_from(&pool, i);
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                    prop_assert_eq!(sut.get_value(k.0.as_str()), model.get(&k).copied());
                }
                OpI::Contains(s) => {
                    let has = sut.contains(s.as_str());
                    let has_model = model.keys().any(|k| k.0 == s);
                    prop_assert_eq!(has, has_model);
                }
                OpI::Mutate(i, d) => {
                    let k = key_from(&pool, i);
                    match (sut.get_mut(&k), model.get_mut(&k)) {
                        (Some(v), Some(mv)) => {
                            *v = v.saturating_add(d);
                            *mv = mv.saturating_add(d);
                        }
                        (None, None) => {}
                        (s, m) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m),
                    }
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    arrival.clear();
                    prop_assert_eq!(sut.table_size(), table_size);
                    for k in &pool {
                        prop_assert!(!sut.contains(k.as_str()));
                    }
                }
                OpI::Iterate => {
                    let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                    let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                    prop_assert_eq!(s_keys, m_keys);
                    prop_assert_eq!(sut.iter().count(), model.len());
                }
            }

            // Post-conditions after each op
            if let Err(e) = sut.check_invariants() {
                prop_assert!(false, "invariant violated: {}", e);
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            for b in 0..table_size {
                let chain: Vec<Key> = sut.chain(b).unwrap().map(|(k, _)| k.clone()).collect();
                let expected: Vec<Key> = arrival
                    .iter()
                    .rev()
                    .filter(|k| sut.bucket_of(*k) == b)
                    .cloned()
                    .collect();
                prop_assert_eq!(chain, expected);
            }
        }
    }
}
