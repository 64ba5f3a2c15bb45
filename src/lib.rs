//! # Nim RL
//!
//! Nim played by an optimal nim-sum strategy, a uniformly random strategy,
//! and a tabular Q-learning agent trained purely by self-play.
//!
//! ## Features
//!
//! - **Game Engine**: Seeded random deals, move validation, normal-play win rule
//! - **Pluggable Strategies**: Anything implementing [`Strategy`] can play
//! - **Q-Learning**: Epsilon-weighted exploration over a hashed action-value table
//! - **Evaluation**: Round-robin reports and parallel sweeps over game shapes
//!
//! ## Quick Start
//!
//! ```
//! use nim_rl::{evaluate_pair, GameConfig, LearnerConfig, NimGame, QLearner, RandomStrategy};
//!
//! // 1. Deal games with 3 piles of up to 5 objects
//! let mut game = NimGame::with_seed(GameConfig::new(3, 5), 1).unwrap();
//!
//! // 2. Train a learner against itself
//! let mut learner = QLearner::new(LearnerConfig::default().with_seed(1)).unwrap();
//! learner.train(2_000, &mut game).unwrap();
//!
//! // 3. Measure it
//! let mut random = RandomStrategy::with_seed(2);
//! let result = evaluate_pair(&mut game, &mut learner, &mut random, 100).unwrap();
//! println!("learner won {:.1}%", result.win_rate() * 100.0);
//! ```
//!
//! ## Modules
//!
//! - [`nim`]: Game engine and move rules
//! - [`strategy`]: The strategy trait, optimal and random players
//! - [`learning`]: Q-learning agent and its value table
//! - [`harness`]: Matches, round robins and sweeps
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Harness (arena / sweep)                 │
//! │  - Alternating first mover    - Round-robin reports      │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            │ &mut dyn Strategy
//!                            ▼
//!         ┌──────────────────┼──────────────────┐
//!         ▼                  ▼                  ▼
//!    ┌─────────┐       ┌──────────┐       ┌──────────┐
//!    │ Optimal │       │  Random  │       │ QLearner │
//!    └─────────┘       └──────────┘       └──────────┘
//!                            │
//!                            ▼
//!                     ┌─────────────┐
//!                     │   NimGame   │
//!                     └─────────────┘
//! ```

#![warn(missing_docs)]

/// Error types shared across the crate.
pub mod error;

/// Game engine: piles, moves and the win rule.
pub mod nim;

/// Players that pick a move from a pile configuration.
pub mod strategy;

/// Tabular Q-learning.
pub mod learning;

/// Matches, round-robin evaluation and sweeps.
pub mod harness;

/// Logger setup for the binaries.
pub mod logging;

// Re-export commonly used types at crate root for convenience
pub use error::{ConfigError, Error, InvalidMoveError, StrategyError};
pub use harness::{evaluate_all, evaluate_pair, play_match, run_sweep, SweepConfig};
pub use learning::{LearnerConfig, QLearner};
pub use nim::{Action, GameConfig, NimGame};
pub use strategy::{OptimalStrategy, RandomStrategy, Strategy};
