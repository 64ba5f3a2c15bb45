//! Optimal play via the Nim-sum.
//!
//! If the XOR of all piles is non-zero, some pile can be reduced so that
//! the XOR becomes zero, which leaves the opponent in a lost position.
//! The first such pile (lowest index) is used. When the XOR is already
//! zero there is no winning move and the strategy takes one object from
//! the first non-empty pile.

use crate::error::StrategyError;
use crate::nim::{nim_sum, Action};
use crate::strategy::Strategy;

/// Stateless Nim-sum strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalStrategy;

impl OptimalStrategy {
    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }

    /// Compute the optimal action for `state`.
    pub fn best_move(state: &[u32]) -> Result<Action, StrategyError> {
        let aggregate = nim_sum(state);

        if aggregate == 0 {
            // Lost position: make the smallest possible move
            return state
                .iter()
                .position(|&pile| pile > 0)
                .map(|pile| Action::new(pile, 1))
                .ok_or(StrategyError::NoMovesAvailable);
        }

        state
            .iter()
            .enumerate()
            .find(|&(_, &pile)| pile ^ aggregate < pile)
            .map(|(index, &pile)| Action::new(index, pile - (pile ^ aggregate)))
            .ok_or(StrategyError::InvariantViolation { nim_sum: aggregate })
    }
}

impl Strategy for OptimalStrategy {
    fn choose_action(&mut self, state: &[u32]) -> Result<Action, StrategyError> {
        Self::best_move(state)
    }

    fn name(&self) -> &str {
        "Optimal"
    }
}
