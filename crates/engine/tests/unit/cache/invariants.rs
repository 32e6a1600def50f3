//! Property tests for the cache engine.
//!
//! Random access sequences over small geometries are applied one at a time
//! and the structural and accounting invariants are checked after each step.

use csim_core::cache::{AccessOutcome, CacheSim};
use csim_core::common::Operation;
use proptest::prelude::*;

use crate::common::geometry;

/// Valid lines form a suffix of the set.
fn valid_lines_are_suffix(cache: &CacheSim, set_index: u64) -> bool {
    let set = cache.set_lines(set_index);
    let first_valid = set.iter().position(|l| l.valid).unwrap_or(set.len());
    set[first_valid..].iter().all(|l| l.valid)
}

/// No tag is resident twice in one set.
fn tags_unique(cache: &CacheSim, set_index: u64) -> bool {
    let mut tags: Vec<u64> = cache
        .set_lines(set_index)
        .iter()
        .filter(|l| l.valid)
        .map(|l| l.tag)
        .collect();
    let len = tags.len();
    tags.sort_unstable();
    tags.dedup();
    tags.len() == len
}

fn access_strategy() -> impl Strategy<Value = (bool, u64)> {
    // Few distinct addresses so hits, conflicts, and evictions all occur.
    (any::<bool>(), 0u64..256)
}

proptest! {
    #[test]
    fn invariants_hold_after_every_access(
        s in 0u32..3,
        b in 0u32..3,
        e in 1usize..5,
        accesses in prop::collection::vec(access_strategy(), 1..200),
    ) {
        let g = geometry(s, b, e);
        let mut cache = CacheSim::new(g).unwrap();
        let block = g.block_bytes();
        let mut prev = *cache.stats();

        for (i, &(is_store, addr)) in accesses.iter().enumerate() {
            let op = if is_store { Operation::Store } else { Operation::Load };
            let f = g.decompose(addr);
            let outcome = cache.access(op, f.tag, f.set_index);

            let set = cache.set_lines(f.set_index);
            let mru = set[set.len() - 1];
            prop_assert!(mru.valid);
            prop_assert_eq!(mru.tag, f.tag);
            if is_store {
                prop_assert!(mru.dirty);
            }
            prop_assert!(valid_lines_are_suffix(&cache, f.set_index));
            prop_assert!(tags_unique(&cache, f.set_index));

            let st = *cache.stats();
            prop_assert_eq!(st.accesses(), i as u64 + 1);
            prop_assert!(st.evictions <= st.misses);
            prop_assert_eq!(st.dirty_evictions % block, 0);
            if st.misses <= e as u64 {
                prop_assert_eq!(st.evictions, 0);
            }
            prop_assert_eq!(outcome.is_hit(), st.hits == prev.hits + 1);
            prop_assert_eq!(
                matches!(outcome, AccessOutcome::MissEviction { .. }),
                st.evictions == prev.evictions + 1
            );
            prev = st;
        }

        let dirty_lines: u64 = (0..1u64 << s)
            .flat_map(|set| cache.set_lines(set).to_vec())
            .filter(|l| l.valid && l.dirty)
            .count() as u64;
        prop_assert_eq!(cache.finalize().dirty_bytes, dirty_lines * block);
        for set in 0..1u64 << s {
            prop_assert!(valid_lines_are_suffix(&cache, set));
        }
    }

    #[test]
    fn no_evictions_without_exceeding_capacity(
        s in 0u32..3,
        e in 1usize..5,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..100),
    ) {
        // Addresses drawn from at most E distinct blocks per set never evict.
        let g = geometry(s, 0, e);
        let sets = 1u64 << s;
        let universe: Vec<u64> = (0..sets * e as u64).collect();
        let mut cache = CacheSim::new(g).unwrap();
        for pick in picks {
            let f = g.decompose(*pick.get(&universe));
            let _ = cache.access(Operation::Load, f.tag, f.set_index);
        }
        prop_assert_eq!(cache.stats().evictions, 0);
        prop_assert!(cache.stats().misses <= sets * e as u64);
    }
}
