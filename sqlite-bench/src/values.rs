//! Value pool: the small set of string literals that synthetic rows and
//! predicates are drawn from.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Append-only set of candidate literals with its own RNG.
///
/// A pool always holds at least one value: the constructor takes the first
/// one and there is no way to remove values afterwards.
#[derive(Debug, Clone)]
pub struct ValuePool {
    values: Vec<String>,
    rng: StdRng,
}

impl ValuePool {
    /// Pool seeded from OS entropy.
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            values: vec![first.into()],
            rng: StdRng::from_entropy(),
        }
    }

    /// Pool with a fixed seed, for reproducible runs.
    pub fn with_seed(first: impl Into<String>, seed: u64) -> Self {
        Self {
            values: vec![first.into()],
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Returns one of the pool's values, chosen uniformly at random.
    pub fn sample(&mut self) -> &str {
        let idx = self.rng.gen_range(0..self.values.len());
        &self.values[idx]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}
