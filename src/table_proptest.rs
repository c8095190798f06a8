#![cfg(test)]

// Property tests for the table surfaces, kept inside the crate so they can
// inspect the slot store through crate-private accessors.

use crate::capacity::DoublingPrimes;
use crate::dynamic::DynamicHashMap;
use crate::hash_map::HashMap;
use crate::hash_set::HashSet;
use crate::params::Params;
use crate::slot_store::Slot;
use crate::table::InsertError;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap as StdHashMap};

// Pool-indexed operations: indices shrink toward earlier keys and the op
// list shrinks in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Lookup(usize),
    Absent(String),
    Iterate,
}

// Initial capacities are primes above every c2 drawn below, so double-hash
// steps are coprime with every capacity the doubling source produces.
fn arb_params() -> impl Strategy<Value = Params> {
    let cap = proptest::sample::select(vec![5usize, 7, 11, 13]);
    prop_oneof![
        (1u64..100, cap.clone()).prop_map(|(z, c)| Params::chain(z, c)),
        (1u64..100, cap.clone()).prop_map(|(z, c)| Params::linear(z, c)),
        (1u64..100, 1u64..100, 1u64..5, cap).prop_map(|(z1, z2, c2, c)| Params::double(z1, z2, c2, c)),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (Params, Vec<String>, Vec<OpI>)> {
    (arb_params(), proptest::collection::vec("[a-z]{0,6}", 1..=24)).prop_flat_map(|(params, pool)| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.prop_map(OpI::Lookup),
            1 => "[A-Z]{1,4}".prop_map(OpI::Absent),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (params, pool.clone(), ops))
    })
}

fn stored_keys<E>(slots: &[Slot<E>], key: impl Fn(&E) -> &str) -> Vec<String> {
    let mut out = Vec::new();
    for slot in slots {
        match slot {
            Slot::Empty => {}
            Slot::Single(e) => out.push(key(e).to_string()),
            Slot::Chain(list) => out.extend(list.iter().map(|e| key(e).to_string())),
        }
    }
    out
}

// Property: HashSet matches a BTreeSet model.
// - DuplicateKey is returned exactly when the model already holds the key.
// - Load factor stays below one half after every insert.
// - No key is stored twice; the stored key set equals the model.
// - Probing tables only hold Single slots, chaining tables only Chains.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_set_state_machine((params, pool, ops) in arb_scenario()) {
        let mut sut = HashSet::with_source(params, DoublingPrimes).unwrap();
        let mut model: BTreeSet<String> = BTreeSet::new();

        for op in ops {
            match op {
                OpI::Insert(i, _) => {
                    let k = &pool[i];
                    let already = model.contains(k);
                    match sut.insert(k.as_str()) {
                        Ok(()) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            model.insert(k.clone());
                        }
                        Err(InsertError::DuplicateKey) => prop_assert!(already),
                        Err(e) => prop_assert!(false, "unexpected {:?}", e),
                    }
                    prop_assert!(sut.load_factor() < 0.5);
                }
                OpI::Lookup(i) => {
                    prop_assert_eq!(sut.contains(&pool[i]), model.contains(&pool[i]));
                }
                OpI::Absent(s) => prop_assert!(!sut.contains(&s)),
                OpI::Iterate => {
                    let seen: BTreeSet<String> = sut.iter().map(str::to_string).collect();
                    prop_assert_eq!(&seen, &model);
                }
            }

            let stored = stored_keys(sut.slots(), |k: &String| k.as_str());
            let unique: BTreeSet<&String> = stored.iter().collect();
            prop_assert_eq!(unique.len(), stored.len(), "a key is stored twice");
            prop_assert_eq!(sut.len(), model.len());
            let chaining = matches!(params.collision, crate::Collision::Chain { .. });
            for slot in sut.slots() {
                match slot {
                    Slot::Empty => {}
                    Slot::Single(_) => prop_assert!(!chaining),
                    Slot::Chain(_) => prop_assert!(chaining),
                }
            }
        }
    }
}

// Property: HashMap keeps the first value per key.
// - Model: BTreeMap filled with `entry().or_insert`.
// - `get` agrees with the model for every pool key after each step.
// - Enumeration visits exactly the model's pairs.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_map_first_value_wins((params, pool, ops) in arb_scenario()) {
        let mut sut: HashMap<i32> = HashMap::with_source(params, DoublingPrimes).unwrap();
        let mut model: BTreeMap<String, i32> = BTreeMap::new();

        for op in ops {
            if let OpI::Insert(i, v) = op {
                let k = pool[i].clone();
                let res = sut.insert(k.clone(), v);
                prop_assert_eq!(res.is_ok(), !model.contains_key(&k));
                model.entry(k).or_insert(v);
                prop_assert!(sut.load_factor() < 0.5);
            }
            for k in &pool {
                prop_assert_eq!(sut.get(k), model.get(k));
            }
        }
        let pairs: BTreeMap<String, i32> = sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        prop_assert_eq!(pairs, model);
    }
}

// Property: DynamicHashMap under chaining keeps every pair.
// - Model: insertion-ordered list of pairs.
// - `len` equals the number of inserts; `get` returns the first value
//   inserted for the key; per-key value order matches insertion order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_dynamic_chain_map_keeps_all_pairs(
        z in 1u64..100,
        pool in proptest::collection::vec("[a-z]{1,4}", 1..=6),
        ops in proptest::collection::vec((0usize..6, any::<i32>()), 1..60),
    ) {
        let mut sut = DynamicHashMap::with_source(Params::chain(z, 7), DoublingPrimes).unwrap();
        let mut model: Vec<(String, i32)> = Vec::new();

        for (i, v) in ops {
            let k = pool[i % pool.len()].clone();
            prop_assert!(sut.insert(k.clone(), v).is_ok());
            model.push((k, v));
            prop_assert!(sut.load_factor() < 0.5);
        }
        prop_assert_eq!(sut.len(), model.len());
        for k in &pool {
            let first = model.iter().find(|(mk, _)| mk == k).map(|(_, v)| v);
            prop_assert_eq!(sut.get(k), first);

            let expected: Vec<i32> = model.iter().filter(|(mk, _)| mk == k).map(|(_, v)| *v).collect();
            let stored: Vec<i32> = sut.iter().filter(|(sk, _)| sk == k).map(|(_, v)| *v).collect();
            prop_assert_eq!(stored, expected);
        }
    }
}

// Property: identical parameters and inserts give identical layouts.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_rendering_is_deterministic((params, pool, ops) in arb_scenario()) {
        let mut a = HashSet::with_source(params, DoublingPrimes).unwrap();
        let mut b = HashSet::with_source(params, DoublingPrimes).unwrap();
        let mut counts: StdHashMap<&str, usize> = StdHashMap::new();
        for op in &ops {
            if let OpI::Insert(i, _) = op {
                let _ = a.insert(pool[*i].as_str());
                let _ = b.insert(pool[*i].as_str());
                *counts.entry(pool[*i].as_str()).or_default() += 1;
            }
        }
        prop_assert_eq!(a.to_string(), b.to_string());
        prop_assert_eq!(a.capacity(), b.capacity());
        prop_assert_eq!(a.len(), counts.len());
    }
}
