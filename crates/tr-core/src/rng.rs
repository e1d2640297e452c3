//! Seeded RNG for reproducible runs.
//!
//! Everything random in a run (trip generation, the random routing baseline)
//! derives from one seed.  Independent consumers take separate numbered
//! streams so that extra draws in one never shift the sequence seen by
//! another.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Spreads consecutive stream ids across the seed space (64-bit fractional
/// golden ratio).
const STREAM_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Well-known stream ids.
pub mod streams {
    /// Random routing decisions.
    pub const ROUTING: u64 = 0;
    /// Vehicle and trip generation in drivers.
    pub const TRIPS: u64 = 1;
}

pub struct SimRng(SmallRng);

impl SimRng {
    /// Equivalent to `SimRng::stream(seed, streams::ROUTING)`.
    pub fn new(seed: u64) -> Self {
        Self::stream(seed, streams::ROUTING)
    }

    /// Stream `id` of a run seeded with `seed`.
    pub fn stream(seed: u64, id: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed ^ id.wrapping_mul(STREAM_MIX)))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A uniformly chosen element, or `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }

    /// Two distinct indices in `0..len`, or `None` if `len < 2`.
    ///
    /// Used for origin/destination pairs.
    pub fn distinct_pair(&mut self, len: usize) -> Option<(usize, usize)> {
        if len < 2 {
            return None;
        }
        let first = self.0.gen_range(0..len);
        // Draw from the remaining len - 1 slots and skip over `first`.
        let mut second = self.0.gen_range(0..len - 1);
        if second >= first {
            second += 1;
        }
        Some((first, second))
    }
}
