//! Sources for a game's secret answer.

use crate::GuessRange;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tracing::instrument;

/// Draws secrets uniformly from a [`GuessRange`].
pub trait SecretSource: Send + Sync {
    /// Returns a value inside `range`.
    fn draw(&self, range: GuessRange) -> i64;
}

/// Uses the thread-local RNG. This is what servers use by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSecrets;

impl SecretSource for ThreadSecrets {
    fn draw(&self, range: GuessRange) -> i64 {
        rand::thread_rng().gen_range(range.min()..=range.max())
    }
}

/// Deterministic sequence of secrets from a seed.
#[derive(Debug)]
pub struct SeededSecrets {
    rng: Mutex<StdRng>,
}

impl SeededSecrets {
    /// Creates a source whose draws are fully determined by `seed`.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SecretSource for SeededSecrets {
    fn draw(&self, range: GuessRange) -> i64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(range.min()..=range.max())
    }
}

/// Always yields the same value, clamped into the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("fixed secret {_0}")]
pub struct FixedSecret(i64);

impl FixedSecret {
    /// Creates a source that always draws `value`.
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl SecretSource for FixedSecret {
    fn draw(&self, range: GuessRange) -> i64 {
        self.0.clamp(range.min(), range.max())
    }
}
