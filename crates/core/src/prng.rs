//! Random sources for frontier sampling.
//!
//! Growers never touch a global RNG. They own a [`RandomSource`], so a run is
//! reproducible from its seed and tests can script the exact sample sequence.

use serde::{Deserialize, Serialize};

/// A source of uniform indices into a non-empty collection.
pub trait RandomSource {
    /// Returns an index in `[0, len)`.
    ///
    /// Callers guarantee `len > 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    /// Modulo reduction; the bias is negligible at 64-bit state width for any
    /// frontier that fits in memory.
    fn next_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, every recorded seed replays a different tree.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        for _ in 0..3 {
            assert_ne!(rng.next_u64(), 0, "seed=0 guard failed");
        }
    }

    #[test]
    fn same_seed_same_index_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..1000 {
            assert_eq!(
                a.next_index(99),
                b.next_index(99),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn next_index_of_one_is_always_zero() {
        let mut rng = Xorshift64::new(123);
        for _ in 0..100 {
            assert_eq!(rng.next_index(1), 0);
        }
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(
                rng.next_index(1000),
                restored.next_index(1000),
                "sequences diverged after deserialization at index {i}"
            );
        }
    }

    #[test]
    fn works_through_trait_object() {
        let mut rng = Xorshift64::new(5);
        let source: &mut dyn RandomSource = &mut rng;
        assert!(source.next_index(10) < 10);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_index_in_bounds_for_any_seed_and_len(
                seed: u64,
                len in 1_usize..10_000,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_index(len);
                    prop_assert!(v < len, "next_index({len}) = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_index_covers_small_ranges(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                let mut hits = [0u32; 8];
                for _ in 0..4_000 {
                    hits[rng.next_index(8)] += 1;
                }
                // Expected ~500 per bucket; loose bound to avoid flakiness.
                for (i, &count) in hits.iter().enumerate() {
                    prop_assert!(count >= 250, "bucket {i} hit only {count} times");
                }
            }
        }
    }
}
