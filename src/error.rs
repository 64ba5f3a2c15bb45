//! Error types shared across the crate.
//!
//! Three families of failures, each handled differently by callers:
//!
//! - [`InvalidMoveError`]: a move is illegal for the current session. The
//!   session is untouched and the caller may simply try another move.
//! - [`StrategyError`]: a strategy was asked for a move it cannot produce.
//!   `NoMovesAvailable` is caller misuse (terminal check missing),
//!   `InvariantViolation` is a logic defect inside the strategy.
//! - [`ConfigError`]: a parameter is out of range or a config file is unreadable.
//!
//! [`Error`] wraps all three for the training loop, harness and sweep.

use thiserror::Error;

/// A move was rejected by the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMoveError {
    /// The session already reached the all-zero configuration.
    #[error("game is already over")]
    AlreadyTerminal,

    /// The pile index does not name an existing pile.
    #[error("pile {pile} does not exist ({piles} piles in play)")]
    PileOutOfRange {
        /// Requested pile index.
        pile: usize,
        /// Number of piles in the session.
        piles: usize,
    },

    /// The count is zero or larger than the pile.
    #[error("cannot take {count} from pile {pile} holding {available}")]
    CountOutOfRange {
        /// Requested pile index.
        pile: usize,
        /// Requested count.
        count: u32,
        /// Objects left in the pile.
        available: u32,
    },
}

/// A strategy could not produce an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// Asked to move in a terminal state.
    #[error("no legal moves available in a terminal state")]
    NoMovesAvailable,

    /// No pile reduces a non-zero Nim-sum. Cannot happen with correct XOR arithmetic.
    #[error("internal error: no pile reduces nim-sum {nim_sum}")]
    InvariantViolation {
        /// The Nim-sum that could not be reduced.
        nim_sum: u32,
    },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Learning rate outside (0, 1].
    #[error("learning rate {0} is out of range (0, 1]")]
    InvalidLearningRate(f64),

    /// Exploration rate outside [0, 1].
    #[error("exploration rate {0} is out of range [0, 1]")]
    InvalidExploration(f64),

    /// A game needs at least one pile.
    #[error("pile count must be at least 1 (got {0})")]
    InvalidPileCount(usize),

    /// Piles start with at least one object.
    #[error("maximum pile size must be at least 1 (got {0})")]
    InvalidPileSize(u32),

    /// A count that must be positive was zero.
    #[error("{0} must be greater than zero")]
    ZeroCount(&'static str),

    /// A list that must be non-empty was empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// Reading a config file failed.
    #[error("failed to read config: {0}")]
    Io(String),

    /// A config file is not valid JSON for the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Crate-level error for operations that combine engine, strategies and config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// See [`InvalidMoveError`].
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),

    /// See [`StrategyError`].
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = InvalidMoveError::CountOutOfRange {
            pile: 0,
            count: 6,
            available: 5,
        };
        assert_eq!(err.to_string(), "cannot take 6 from pile 0 holding 5");

        let wrapped: Error = StrategyError::NoMovesAvailable.into();
        assert_eq!(
            wrapped.to_string(),
            "no legal moves available in a terminal state"
        );
    }
}
