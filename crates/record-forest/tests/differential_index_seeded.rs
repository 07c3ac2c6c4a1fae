//! Seeded random op streams replayed against `BTreeMap` oracles.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use record_forest::{GroupIndex, OrderedIndex};

const SEEDS: [u64; 5] = [
    0x5eed_c0de,
    0x0000_0000_0000_0001,
    0x0000_0000_0000_00ff,
    0x0000_0000_00c0_ffee,
    0x0123_4567_89ab_cdef,
];

#[test]
fn differential_ordered_seeded_matches_oracle() {
    for seed in SEEDS {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut idx = OrderedIndex::<i64, i64>::new();
        let mut oracle: BTreeMap<i64, i64> = BTreeMap::new();

        for step in 0..600 {
            let key = rng.gen_range(0..48i64);
            if rng.gen_range(0..3) < 2 {
                let value = rng.gen_range(0..1_000_000i64);
                idx.insert(key, value);
                oracle.insert(key, value);
            } else {
                let hit = idx.remove(&key);
                assert_eq!(
                    hit,
                    oracle.remove(&key).is_some(),
                    "remove mismatch (seed={seed} step={step})"
                );
            }
            assert_eq!(idx.get(&key), oracle.get(&key));

            if step % 16 == 0 {
                idx.assert_valid().unwrap();
                let dump: Vec<(i64, i64)> = idx.iter().map(|(k, v)| (*k, *v)).collect();
                let expected: Vec<(i64, i64)> = oracle.iter().map(|(k, v)| (*k, *v)).collect();
                assert_eq!(dump, expected, "dump mismatch (seed={seed} step={step})");
            }
        }

        idx.assert_valid().unwrap();
        assert_eq!(idx.len(), oracle.len());
    }
}

#[test]
fn differential_group_seeded_matches_oracle() {
    for seed in SEEDS {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut idx = GroupIndex::<i64, u64>::new();
        let mut oracle: BTreeMap<i64, Vec<u64>> = BTreeMap::new();
        let mut next_handle = 0u64;

        for step in 0..600 {
            let key = rng.gen_range(0..24i64);
            if rng.gen_range(0..3) < 2 {
                // Mostly fresh handles, occasionally a duplicate of one
                // already filed under the key.
                let member = if rng.gen_range(0..4) == 0 {
                    oracle
                        .get(&key)
                        .and_then(|m| m.first().copied())
                        .unwrap_or_else(|| {
                            next_handle += 1;
                            next_handle
                        })
                } else {
                    next_handle += 1;
                    next_handle
                };
                idx.insert(key, member);
                oracle.entry(key).or_default().push(member);
            } else {
                // Remove a filed member when there is one, a bogus handle
                // otherwise; the result only reflects key presence.
                let member = oracle
                    .get(&key)
                    .and_then(|m| m.first().copied())
                    .unwrap_or(u64::MAX);
                let expected_hit = oracle.contains_key(&key);
                assert_eq!(
                    idx.remove_member(&key, &member),
                    expected_hit,
                    "remove_member mismatch (seed={seed} step={step})"
                );
                if let Some(members) = oracle.get_mut(&key) {
                    if let Some(at) = members.iter().position(|m| *m == member) {
                        members.remove(at);
                    }
                    if members.is_empty() {
                        oracle.remove(&key);
                    }
                }
            }

            if step % 16 == 0 {
                idx.assert_valid().unwrap();
                let dump: Vec<(i64, Vec<u64>)> =
                    idx.iter().map(|(k, m)| (*k, m.to_vec())).collect();
                let expected: Vec<(i64, Vec<u64>)> =
                    oracle.iter().map(|(k, m)| (*k, m.clone())).collect();
                assert_eq!(dump, expected, "dump mismatch (seed={seed} step={step})");
            }
        }

        idx.assert_valid().unwrap();
        assert_eq!(idx.len(), oracle.len());
    }
}
