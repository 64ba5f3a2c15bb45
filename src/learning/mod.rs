//! Tabular Q-learning for Nim.
//!
//! The learner keeps one value per (pile configuration, action) pair and
//! improves it by playing against itself.
//!
//! # Overview
//!
//! Each self-play episode:
//! 1. Deals a fresh random game
//! 2. Lets the learner pick moves for both players, mostly greedily with
//!    some exploration
//! 3. Updates the previous move of the player about to act, using the best
//!    value it can reach from the new position
//! 4. At the end rewards the winning move with +1 and the loser's last move with -1
//!
//! # Usage
//!
//! ```
//! use nim_rl::learning::{LearnerConfig, QLearner};
//! use nim_rl::nim::{GameConfig, NimGame};
//!
//! let mut game = NimGame::with_seed(GameConfig::new(3, 5), 7).unwrap();
//! let mut learner = QLearner::new(LearnerConfig::default().with_seed(7)).unwrap();
//!
//! let stats = learner.train(1_000, &mut game).unwrap();
//! println!("{} entries after {} episodes", stats.table_entries, stats.episodes);
//!
//! // Greedy move once trained
//! let action = learner.choose_action(&[1, 2, 3], false).unwrap();
//! assert!(action.is_legal_in(&[1, 2, 3]));
//! ```
//!
//! # Theory
//!
//! Rewards are always seen from the mover's side. Because both players
//! share one table, the value of a position for the player to move is the
//! best value among its actions, and that is what each update bootstraps
//! from. There is no discount: the only non-zero rewards come at the end.

pub mod config;
pub mod learner;
pub mod table;

// Re-export main types for convenient access
pub use config::{LearnerConfig, TrainingStats};
pub use learner::QLearner;
pub use table::{ActionValueTable, StateAction};
