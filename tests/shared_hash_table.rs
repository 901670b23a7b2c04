// SharedHashTable: the locked wrapper used from several threads.
//
// Invariants exercised:
// - Every clone addresses the same table.
// - Concurrent puts, updates and removes leave the table in the state a
//   serial execution of the same per-key operations would.
use pjw_hashtable::{SharedHashTable, TableConfig, TableError};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

fn shared(buckets: usize) -> SharedHashTable<usize> {
    SharedHashTable::with_config(TableConfig::builder().bucket_count(buckets).build().unwrap())
        .unwrap()
}

// Test: disjoint key ranges from many threads all land.
#[test]
fn disjoint_writers() {
    let t = shared(97);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|w| {
            let t = t.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    assert_eq!(t.put(format!("{}:{}", w, i), i), Ok(None));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(t.len(), THREADS * PER_THREAD);
    for w in 0..THREADS {
        assert_eq!(t.get(format!("{}:{}", w, PER_THREAD - 1)), Some(PER_THREAD - 1));
    }
}

// Test: writers and removers on the same keys; each removed value was put.
#[test]
fn contended_put_and_remove() {
    let t = shared(7);
    let writers: Vec<_> = (0..THREADS / 2)
        .map(|w| {
            let t = t.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    t.put(format!("k{}", i % 16), w).unwrap();
                }
            })
        })
        .collect();
    let removers: Vec<_> = (0..THREADS / 2)
        .map(|_| {
            let t = t.clone();
            thread::spawn(move || {
                let mut removed = 0usize;
                for i in 0..PER_THREAD {
                    if let Some(v) = t.remove(format!("k{}", i % 16)) {
                        assert!(v < THREADS / 2);
                        removed += 1;
                    }
                }
                removed
            })
        })
        .collect();
    for h in writers {
        h.join().unwrap();
    }
    for h in removers {
        h.join().unwrap();
    }
    assert!(t.len() <= 16);
    let stats = t.stats();
    assert_eq!(stats.len, t.len());
}

// Test: the entry limit holds under contention; exactly `limit` keys win.
#[test]
fn entry_limit_under_contention() {
    let cfg = TableConfig::builder()
        .bucket_count(31)
        .max_entries(100)
        .build()
        .unwrap();
    let t: SharedHashTable<usize> = SharedHashTable::with_config(cfg).unwrap();
    let handles: Vec<_> = (0..THREADS)
        .map(|w| {
            let t = t.clone();
            thread::spawn(move || {
                let mut full = 0usize;
                for i in 0..50 {
                    match t.put(format!("{}-{}", w, i), i) {
                        Ok(_) => {}
                        Err(TableError::CapacityExhausted { limit }) => {
                            assert_eq!(limit, 100);
                            full += 1;
                        }
                        Err(e) => panic!("unexpected error: {}", e),
                    }
                }
                full
            })
        })
        .collect();
    let rejected: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(t.len(), 100);
    assert_eq!(rejected, THREADS * 50 - 100);
}
