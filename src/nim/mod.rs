//! Multi-pile subtraction Nim.
//!
//! Piles are `u32` counts indexed from 0. A move takes one or more objects
//! from a single pile; the player who takes the last object wins.
//!
//! - [`moves`]: the [`Action`] type and legal-move enumeration
//! - [`game`]: the [`NimGame`] session that validates and applies moves

pub mod game;
pub mod moves;

pub use game::{GameConfig, NimGame};
pub use moves::{is_terminal_state, legal_moves, move_count, nim_sum, Action};
