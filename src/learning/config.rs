//! Configuration options for the Q-learning strategy.
//!
//! This module provides the learner's hyperparameters and the statistics
//! collected while it trains.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the Q-learner.
///
/// # Example
/// ```
/// use nim_rl::learning::LearnerConfig;
///
/// let config = LearnerConfig::default().with_seed(42);
/// assert_eq!(config.alpha, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Learning rate, in (0, 1].
    ///
    /// How far each update moves a value toward its new target. 1.0
    /// replaces the old estimate outright.
    pub alpha: f64,

    /// Exploration rate, in [0, 1].
    ///
    /// During exploratory selection the greedy action is weighted
    /// `1 - epsilon` and every other legal action `epsilon`.
    pub epsilon: f64,

    /// Random seed for reproducibility.
    ///
    /// If `None`, the learner seeds itself from entropy.
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            epsilon: 0.1,
            seed: None,
        }
    }
}

impl LearnerConfig {
    /// Create a new LearnerConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the learning rate.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Builder method: set the exploration rate.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::InvalidLearningRate(self.alpha));
        }

        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ConfigError::InvalidExploration(self.epsilon));
        }

        Ok(())
    }
}

/// Statistics tracked during self-play training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Total number of episodes completed.
    pub episodes: u64,

    /// Total moves played across all episodes.
    pub moves: u64,

    /// Number of (state, action) entries in the table.
    pub table_entries: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Episodes per second.
    pub episodes_per_second: f64,
}

impl TrainingStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update episodes per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.episodes_per_second = self.episodes as f64 / self.elapsed_seconds;
        }
    }

    /// Average number of moves per episode.
    pub fn average_episode_length(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.moves as f64 / self.episodes as f64
        }
    }
}
