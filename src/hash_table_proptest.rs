#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can call the
// structural consistency check.

use crate::config::TableConfig;
use crate::error::TableError;
use crate::hash_table::{Handle, HashTable};
use crate::key::{KeyPolicy, KEY_SIZE};
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    RemoveByHandle(usize),
    Clear,
}

// Small prime bucket counts force long chains and frequent collisions.
fn arb_buckets() -> impl Strategy<Value = usize> {
    proptest::sample::select(vec![2usize, 3, 5, 7, 101])
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (arb_buckets(), proptest::collection::vec("[a-c]{0,4}", 1..=8)).prop_flat_map(
        |(buckets, pool)| {
            let idx = 0..pool.len();
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
                2 => idx.clone().prop_map(Op::Remove),
                2 => idx.clone().prop_map(Op::Get),
                1 => "[a-c]{0,4}".prop_map(Op::Contains),
                1 => idx.clone().prop_map(Op::RemoveByHandle),
                1 => Just(Op::Clear),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (buckets, pool.clone(), ops))
        },
    )
}

fn table(buckets: usize) -> HashTable<i32> {
    HashTable::with_config(TableConfig::builder().bucket_count(buckets).build().unwrap()).unwrap()
}

// Property: state-machine equivalence against std::collections::HashMap.
// - `put` returns the model's previous value and never changes an existing
//   entry's handle.
// - `remove`/`remove_handle` return the model's value; stale handles stay dead.
// - `get`/`contains_key` parity; `len`/`is_empty` parity after each op.
// - Chains stay consistent: right bucket, unique keys, count matches.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        let mut sut = table(buckets);
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut handles: HashMap<String, Handle> = HashMap::new();
        let mut stale: Vec<Handle> = Vec::new();

        for op in ops {
            match op {
                Op::Put(i, v) => {
                    let k = &pool[i];
                    let prev = sut.put(k, v).unwrap();
                    prop_assert_eq!(prev, model.insert(k.clone(), v));
                    let h = sut.find(k).unwrap();
                    if let Some(old) = handles.insert(k.clone(), h) {
                        prop_assert_eq!(old, h, "update must keep the entry");
                    }
                }
                Op::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                    if let Some(h) = handles.remove(k) {
                        stale.push(h);
                    }
                }
                Op::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                }
                Op::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
                }
                Op::RemoveByHandle(i) => {
                    let k = &pool[i];
                    match handles.remove(k) {
                        Some(h) => {
                            let (key, v) = sut.remove_handle(h).unwrap();
                            prop_assert_eq!(key.as_bytes(), k.as_bytes());
                            prop_assert_eq!(Some(v), model.remove(k));
                            stale.push(h);
                        }
                        None => prop_assert!(!sut.contains_key(k)),
                    }
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    stale.extend(handles.drain().map(|(_, h)| h));
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            for h in &stale {
                prop_assert!(h.value(&sut).is_none(), "stale handle resolved");
            }
            sut.assert_consistent();
        }
    }
}

// Property: keys are equal iff their first KEY_SIZE bytes are equal, under
// the truncating policy; the reject policy accepts exactly the short ones.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_bounded_key_identity(a in "[xy]{28,36}", b in "[xy]{28,36}") {
        let mut t = table(7);
        t.put(&a, 1).unwrap();
        let same_prefix = a.as_bytes()[..KEY_SIZE.min(a.len())] == b.as_bytes()[..KEY_SIZE.min(b.len())];
        prop_assert_eq!(t.contains_key(&b), same_prefix);
        t.assert_consistent();

        let cfg = TableConfig::builder()
            .bucket_count(7)
            .key_policy(KeyPolicy::Reject)
            .build()
            .unwrap();
        let mut strict: HashTable<i32> = HashTable::with_config(cfg).unwrap();
        match strict.put(&b, 2) {
            Ok(None) => prop_assert!(b.len() <= KEY_SIZE),
            Err(TableError::KeyTooLong { len, max }) => {
                prop_assert_eq!(len, b.len());
                prop_assert_eq!(max, KEY_SIZE);
            }
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }
}
