//! Uniformly random play.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::StrategyError;
use crate::nim::{legal_moves, Action};
use crate::strategy::Strategy;

/// Picks any legal move with equal probability.
///
/// Generic over the random source so tests can inject a seeded one.
#[derive(Debug, Clone)]
pub struct RandomStrategy<R: Rng = StdRng> {
    rng: R,
}

impl RandomStrategy<StdRng> {
    /// Create a strategy seeded from entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a reproducible strategy.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomStrategy<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomStrategy<R> {
    /// Create a strategy over a caller-supplied random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Strategy for RandomStrategy<R> {
    fn choose_action(&mut self, state: &[u32]) -> Result<Action, StrategyError> {
        legal_moves(state)
            .choose(&mut self.rng)
            .copied()
            .ok_or(StrategyError::NoMovesAvailable)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
