//! Tabular Q-learning strategy trained by self-play.
//!
//! A single [`QLearner`] plays both sides of every training game. Each
//! side's most recent (state, action) is remembered; when the opponent
//! replies, that pair is updated toward the best value available from the
//! position it now faces. The final move of a game earns +1 for the mover
//! and -1 for the opponent's last move.
//!
//! The update is one-step temporal difference with no discount:
//!
//! ```text
//! Q(s, a) <- Q(s, a) + alpha * (reward + max_a' Q(s', a') - Q(s, a))
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ConfigError, Error, StrategyError};
use crate::learning::config::{LearnerConfig, TrainingStats};
use crate::learning::table::{ActionValueTable, StateAction};
use crate::nim::{legal_moves, Action, NimGame};
use crate::strategy::Strategy;

/// Reward for the move that empties the last pile.
pub const WIN_REWARD: f64 = 1.0;
/// Reward for the move that handed the opponent the win.
pub const LOSS_REWARD: f64 = -1.0;
/// Reward for every other move.
pub const STEP_REWARD: f64 = 0.0;

/// The Q-learning strategy.
///
/// # Example
/// ```
/// use nim_rl::learning::{LearnerConfig, QLearner};
/// use nim_rl::nim::{GameConfig, NimGame};
///
/// let mut game = NimGame::with_seed(GameConfig::new(3, 3), 1).unwrap();
/// let mut learner = QLearner::new(LearnerConfig::default().with_seed(1)).unwrap();
///
/// let stats = learner.train(500, &mut game).unwrap();
/// assert_eq!(stats.episodes, 500);
/// assert!(stats.table_entries > 0);
/// ```
#[derive(Debug, Clone)]
pub struct QLearner {
    /// Learned values.
    table: ActionValueTable,

    /// Hyperparameters.
    config: LearnerConfig,

    /// Statistics tracking.
    stats: TrainingStats,

    /// Random number generator for exploration.
    rng: StdRng,

    /// Whether [`Strategy::choose_action`] explores.
    explore_in_play: bool,
}

impl QLearner {
    /// Create a new learner with an empty table.
    pub fn new(config: LearnerConfig) -> Result<Self, ConfigError> {
        Self::with_capacity(config, 0)
    }

    /// Create a learner with pre-allocated table capacity.
    pub fn with_capacity(config: LearnerConfig, capacity: usize) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            table: ActionValueTable::with_capacity(capacity),
            config,
            stats: TrainingStats::new(),
            rng,
            explore_in_play: false,
        })
    }

    /// Builder method: make [`Strategy::choose_action`] explore.
    ///
    /// Off by default, so a trained learner plays greedily in matches.
    pub fn with_exploration_in_play(mut self, enable: bool) -> Self {
        self.explore_in_play = enable;
        self
    }

    /// Learned value of taking `action` in `state`, 0.0 if never updated.
    pub fn value_of(&self, state: &[u32], action: Action) -> f64 {
        self.table.value(state, action)
    }

    /// Highest learned value among the legal actions of `state`.
    ///
    /// Terminal states have no actions and are worth 0.0.
    pub fn best_future_value(&self, state: &[u32]) -> f64 {
        let actions = legal_moves(state);
        let Some(&first) = actions.first() else {
            return 0.0;
        };

        let mut key = StateAction::new(state, first);
        let mut best = self.table.get(&key);
        for &action in &actions[1..] {
            key.action = action;
            best = best.max(self.table.get(&key));
        }
        best
    }

    /// Apply one temporal-difference update to `(old_state, action)`.
    pub fn update(&mut self, old_state: &[u32], action: Action, new_state: &[u32], reward: f64) {
        let key = StateAction::new(old_state, action);
        let old = self.table.get(&key);
        let future = self.best_future_value(new_state);

        let value = old + self.config.alpha * (reward + future - old);
        self.table.set(key, value);
    }

    /// Pick an action for `state`.
    ///
    /// Without exploration this is the greedy action: the first legal
    /// action with the highest value. With exploration the greedy action
    /// gets weight `1 - epsilon`, every other action `epsilon`, and one is
    /// sampled from that distribution.
    pub fn choose_action(
        &mut self,
        state: &[u32],
        use_exploration: bool,
    ) -> Result<Action, StrategyError> {
        Self::select(
            &self.table,
            self.config.epsilon,
            state,
            use_exploration,
            &mut self.rng,
        )
    }

    /// Same as [`QLearner::choose_action`] with a caller-supplied random source.
    pub fn choose_action_with<R: Rng + ?Sized>(
        &self,
        state: &[u32],
        use_exploration: bool,
        rng: &mut R,
    ) -> Result<Action, StrategyError> {
        Self::select(&self.table, self.config.epsilon, state, use_exploration, rng)
    }

    /// Greedy action for `state`, or `None` if the state is terminal.
    pub fn greedy_action(&self, state: &[u32]) -> Option<Action> {
        let actions = legal_moves(state);
        Self::greedy_index(&self.table, state, &actions).map(|i| actions[i])
    }

    fn select<R: Rng + ?Sized>(
        table: &ActionValueTable,
        epsilon: f64,
        state: &[u32],
        use_exploration: bool,
        rng: &mut R,
    ) -> Result<Action, StrategyError> {
        let actions = legal_moves(state);
        let best = Self::greedy_index(table, state, &actions).ok_or(StrategyError::NoMovesAvailable)?;

        if !use_exploration {
            return Ok(actions[best]);
        }

        let index = sample_exploratory(best, actions.len(), epsilon, rng);
        Ok(actions[index])
    }

    /// Index of the first action with the strictly highest value.
    fn greedy_index(table: &ActionValueTable, state: &[u32], actions: &[Action]) -> Option<usize> {
        let first = *actions.first()?;
        let mut key = StateAction::new(state, first);

        let mut best_index = 0;
        let mut best_value = table.get(&key);

        for (i, &action) in actions.iter().enumerate().skip(1) {
            key.action = action;
            let value = table.get(&key);
            if value > best_value {
                best_value = value;
                best_index = i;
            }
        }

        Some(best_index)
    }

    /// Train by self-play for `episodes` games.
    ///
    /// Each episode restarts `engine` with a fresh random deal.
    ///
    /// # Returns
    /// Statistics accumulated over the learner's lifetime.
    pub fn train(&mut self, episodes: u64, engine: &mut NimGame) -> Result<&TrainingStats, Error> {
        self.train_with_callback(episodes, engine, 0, |_| {})
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `episodes` - Number of self-play games
    /// * `engine` - Session to play on; restarted every episode
    /// * `callback_interval` - How often to call the callback (0 = never)
    /// * `callback` - Function called every `callback_interval` episodes
    pub fn train_with_callback<F>(
        &mut self,
        episodes: u64,
        engine: &mut NimGame,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<&TrainingStats, Error>
    where
        F: FnMut(&TrainingStats),
    {
        let start_time = Instant::now();
        let elapsed_before = self.stats.elapsed_seconds;

        log::info!(
            "training for {} episodes on {} piles (max {}), alpha {}, epsilon {}",
            episodes,
            engine.config().piles_count,
            engine.config().max_pile_size,
            self.config.alpha,
            self.config.epsilon
        );

        for i in 0..episodes {
            let moves = self.run_episode(engine)?;
            self.stats.episodes += 1;
            self.stats.moves += moves;

            if callback_interval > 0 && (i + 1) % callback_interval == 0 {
                self.refresh_stats(elapsed_before + start_time.elapsed().as_secs_f64());
                callback(&self.stats);
            }
        }

        self.refresh_stats(elapsed_before + start_time.elapsed().as_secs_f64());

        log::info!(
            "trained {} episodes ({:.1} moves each), {} entries over {} states (~{} KiB), {:.0} episodes/s",
            self.stats.episodes,
            self.stats.average_episode_length(),
            self.stats.table_entries,
            self.table.num_states(),
            self.table.memory_usage() / 1024,
            self.stats.episodes_per_second
        );

        Ok(&self.stats)
    }

    fn refresh_stats(&mut self, elapsed_seconds: f64) {
        self.stats.table_entries = self.table.len();
        self.stats.elapsed_seconds = elapsed_seconds;
        self.stats.update_rate();
    }

    /// Play one self-play game and update the table along the way.
    ///
    /// # Returns
    /// The number of moves played.
    pub fn run_episode(&mut self, engine: &mut NimGame) -> Result<u64, Error> {
        engine.restart();

        // Most recent (state, action) per player slot
        let mut last: [Option<(Vec<u32>, Action)>; 2] = [None, None];
        let mut player = 0;
        let mut moves = 0;

        loop {
            let state = engine.snapshot();
            let action = self.choose_action(&state, true)?;
            last[player] = Some((state.clone(), action));

            engine.apply(action)?;
            moves += 1;
            player = 1 - player;
            let new_state = engine.snapshot();

            if engine.is_terminal() {
                self.update(&state, action, &new_state, WIN_REWARD);
                if let Some((old_state, old_action)) = &last[player] {
                    self.update(old_state, *old_action, &new_state, LOSS_REWARD);
                }
                return Ok(moves);
            }

            if let Some((old_state, old_action)) = &last[player] {
                self.update(old_state, *old_action, &new_state, STEP_REWARD);
            }
        }
    }

    /// Get the learned table.
    pub fn table(&self) -> &ActionValueTable {
        &self.table
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    /// Get current statistics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Forget everything learned.
    pub fn reset(&mut self) {
        self.table.clear();
        self.stats = TrainingStats::new();
    }
}

impl Strategy for QLearner {
    fn choose_action(&mut self, state: &[u32]) -> Result<Action, StrategyError> {
        let explore = self.explore_in_play;
        QLearner::choose_action(self, state, explore)
    }

    fn name(&self) -> &str {
        "QLearner"
    }
}

/// Sample an index where `best` has weight `1 - epsilon` and every other of
/// the `len` indices has weight `epsilon`.
///
/// One uniform draw over the total weight selects the first index whose
/// cumulative weight exceeds it. `len` must be at least 1.
fn sample_exploratory<R: Rng + ?Sized>(best: usize, len: usize, epsilon: f64, rng: &mut R) -> usize {
    let weight = |i: usize| if i == best { 1.0 - epsilon } else { epsilon };
    let total: f64 = (0..len).map(weight).sum();

    if total <= 0.0 {
        return best;
    }

    let r = rng.gen::<f64>() * total;
    let mut cumsum = 0.0;

    for i in 0..len {
        cumsum += weight(i);
        if r < cumsum {
            return i;
        }
    }

    // Floating point fall-through
    len - 1
}
