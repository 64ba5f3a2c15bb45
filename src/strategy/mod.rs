//! Strategy trait and the fixed strategies.
//!
//! Anything that can pick a move for a pile configuration implements
//! [`Strategy`]. The harness only talks to this trait, so optimal, random,
//! learned and human players are interchangeable.
//!
//! - [`optimal`]: the Nim-sum rule, used as the benchmark opponent
//! - [`random`]: uniform over legal moves, used as the weak baseline
//!
//! The learned strategy lives in [`crate::learning`].

use crate::error::StrategyError;
use crate::nim::Action;

pub mod optimal;
pub mod random;

pub use optimal::OptimalStrategy;
pub use random::RandomStrategy;

/// A decision-maker for Nim.
///
/// # Example
/// ```
/// use nim_rl::strategy::{OptimalStrategy, Strategy};
/// use nim_rl::nim::Action;
///
/// let mut strategy = OptimalStrategy::new();
/// let action = strategy.choose_action(&[3, 4, 5]).unwrap();
/// assert_eq!(action, Action::new(0, 2));
/// ```
pub trait Strategy {
    /// Pick an action for `state`.
    ///
    /// # Errors
    /// Returns `StrategyError::NoMovesAvailable` when `state` is terminal.
    /// Callers should check for a terminal state first.
    fn choose_action(&mut self, state: &[u32]) -> Result<Action, StrategyError>;

    /// Display name used in reports.
    fn name(&self) -> &str;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn choose_action(&mut self, state: &[u32]) -> Result<Action, StrategyError> {
        (**self).choose_action(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
