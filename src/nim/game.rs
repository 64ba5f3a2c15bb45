//! The Nim game session.
//!
//! [`NimGame`] owns the authoritative pile configuration and the terminal
//! flag. All mutation goes through [`NimGame::apply`], which validates the
//! move first and leaves the session untouched when it fails.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfigError, InvalidMoveError};
use crate::nim::moves::{is_terminal_state, move_count, Action};

/// Shape of freshly dealt games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of piles.
    pub piles_count: usize,
    /// Each pile starts with a uniform random size in `[1, max_pile_size]`.
    pub max_pile_size: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            piles_count: 5,
            max_pile_size: 10,
        }
    }
}

impl GameConfig {
    /// Create a new game configuration.
    pub fn new(piles_count: usize, max_pile_size: u32) -> Self {
        Self {
            piles_count,
            max_pile_size,
        }
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.piles_count == 0 {
            return Err(ConfigError::InvalidPileCount(self.piles_count));
        }
        if self.max_pile_size == 0 {
            return Err(ConfigError::InvalidPileSize(self.max_pile_size));
        }
        Ok(())
    }
}

/// A game of Nim in progress.
///
/// The player who removes the last object wins. The session does not track
/// whose turn it is; drivers alternate players themselves.
#[derive(Debug, Clone)]
pub struct NimGame {
    /// Current pile counts.
    piles: Vec<u32>,

    /// Set once every pile is empty, cleared only by a reset.
    terminal: bool,

    /// Shape used by [`NimGame::restart`].
    config: GameConfig,

    /// Source for dealing piles.
    rng: StdRng,
}

impl NimGame {
    /// Create a new game and deal the first configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game whose deals are reproducible.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut game = Self {
            piles: Vec::new(),
            terminal: false,
            config,
            rng,
        };
        game.deal();
        Ok(game)
    }

    /// Create a session over a fixed configuration.
    ///
    /// A later [`NimGame::restart`] deals random piles shaped like this
    /// one (same pile count, max size taken from the largest pile).
    pub fn from_piles(piles: Vec<u32>) -> Self {
        Self::from_piles_with_rng(piles, StdRng::from_entropy())
    }

    /// Same as [`NimGame::from_piles`] with reproducible later deals.
    pub fn from_piles_with_seed(piles: Vec<u32>, seed: u64) -> Self {
        Self::from_piles_with_rng(piles, StdRng::seed_from_u64(seed))
    }

    fn from_piles_with_rng(piles: Vec<u32>, rng: StdRng) -> Self {
        let config = GameConfig {
            piles_count: piles.len(),
            max_pile_size: piles.iter().copied().max().unwrap_or(0).max(1),
        };
        let terminal = is_terminal_state(&piles);

        Self {
            piles,
            terminal,
            config,
            rng,
        }
    }

    /// Re-deal with a new shape and clear the terminal flag.
    pub fn reset(&mut self, piles_count: usize, max_pile_size: u32) -> Result<(), ConfigError> {
        let config = GameConfig::new(piles_count, max_pile_size);
        config.validate()?;

        self.config = config;
        self.deal();
        Ok(())
    }

    /// Re-deal using the current shape.
    pub fn restart(&mut self) {
        self.deal();
    }

    fn deal(&mut self) {
        let GameConfig {
            piles_count,
            max_pile_size,
        } = self.config;

        self.piles = (0..piles_count)
            .map(|_| self.rng.gen_range(1..=max_pile_size))
            .collect();
        self.terminal = is_terminal_state(&self.piles);
    }

    /// Apply a move for whoever is to play.
    ///
    /// # Errors
    /// - `AlreadyTerminal` if the game is over
    /// - `PileOutOfRange` if the pile does not exist
    /// - `CountOutOfRange` if the count is zero or exceeds the pile
    ///
    /// The session is unchanged when an error is returned.
    pub fn apply(&mut self, action: Action) -> Result<(), InvalidMoveError> {
        if self.terminal {
            return Err(InvalidMoveError::AlreadyTerminal);
        }

        let piles = self.piles.len();
        let available = *self
            .piles
            .get(action.pile)
            .ok_or(InvalidMoveError::PileOutOfRange {
                pile: action.pile,
                piles,
            })?;

        if action.count < 1 || action.count > available {
            return Err(InvalidMoveError::CountOutOfRange {
                pile: action.pile,
                count: action.count,
                available,
            });
        }

        self.piles[action.pile] -= action.count;

        if is_terminal_state(&self.piles) {
            self.terminal = true;
        }

        Ok(())
    }

    /// Owned copy of the current piles.
    pub fn snapshot(&self) -> Vec<u32> {
        self.piles.clone()
    }

    /// Borrowed view of the current piles.
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// Whether every pile is empty.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Shape used for deals.
    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Total objects left across piles.
    pub fn remaining(&self) -> usize {
        move_count(&self.piles)
    }
}

impl fmt::Display for NimGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &pile) in self.piles.iter().enumerate() {
            writeln!(
                f,
                "Pile {}: {} ({} items)",
                i + 1,
                "*".repeat(pile as usize),
                pile
            )?;
        }
        Ok(())
    }
}
