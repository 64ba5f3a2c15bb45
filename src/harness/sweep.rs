//! Train-and-evaluate sweeps over game shapes.
//!
//! For every combination of pile count and maximum pile size a fresh
//! learner is trained on a fresh engine, then the learner, a random player
//! and the optimal player are evaluated round robin. Combinations are
//! independent and run in parallel; each one owns its engine and strategies.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::error::{ConfigError, Error};
use crate::harness::report::{evaluate_all, EvaluationReport};
use crate::learning::{LearnerConfig, QLearner, TrainingStats};
use crate::nim::{GameConfig, NimGame};
use crate::strategy::{OptimalStrategy, RandomStrategy, Strategy};

/// Parameters of a sweep.
///
/// Defaults: 3, 5 and 7 piles with maximum sizes 5, 10 and 15, 50 000
/// training episodes, 10 000 games per pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Pile counts to try.
    pub piles_counts: Vec<usize>,
    /// Maximum initial pile sizes to try.
    pub max_pile_sizes: Vec<u32>,
    /// Self-play episodes per learner.
    pub training_episodes: u64,
    /// Matches per ordered pairing of strategies.
    pub evaluation_games: u64,
    /// Learner hyperparameters.
    #[serde(default)]
    pub learner: LearnerConfig,
    /// Base seed; every combination derives its own seeds from it.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            piles_counts: vec![3, 5, 7],
            max_pile_sizes: vec![5, 10, 15],
            training_episodes: 50_000,
            evaluation_games: 10_000,
            learner: LearnerConfig::default(),
            seed: None,
        }
    }
}

impl SweepConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.piles_counts.is_empty() {
            return Err(ConfigError::Empty("piles_counts"));
        }
        if self.max_pile_sizes.is_empty() {
            return Err(ConfigError::Empty("max_pile_sizes"));
        }
        if self.training_episodes == 0 {
            return Err(ConfigError::ZeroCount("training_episodes"));
        }
        if self.evaluation_games == 0 {
            return Err(ConfigError::ZeroCount("evaluation_games"));
        }

        for game in self.game_configs() {
            game.validate()?;
        }
        self.learner.validate()
    }

    /// Every (pile count, max size) combination, pile count major.
    pub fn game_configs(&self) -> Vec<GameConfig> {
        self.piles_counts
            .iter()
            .flat_map(|&piles| {
                self.max_pile_sizes
                    .iter()
                    .map(move |&max| GameConfig::new(piles, max))
            })
            .collect()
    }
}

/// Training and evaluation outcome for one game shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationResult {
    /// Learner training statistics.
    pub training: TrainingStats,
    /// Round-robin results.
    pub evaluation: EvaluationReport,
}

/// Complete output of a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// The sweep parameters.
    pub config: SweepConfig,
    /// One entry per game shape, in [`SweepConfig::game_configs`] order.
    pub results: Vec<ConfigurationResult>,
    /// Wall time of the whole sweep.
    pub elapsed_seconds: f64,
    /// Unix time the sweep finished.
    pub timestamp: u64,
}

impl SweepReport {
    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Print every configuration's evaluation summary.
    pub fn print_summary(&self) {
        for result in &self.results {
            println!(
                "\nEvaluating for {} piles with max pile size {}",
                result.evaluation.game.piles_count, result.evaluation.game.max_pile_size
            );
            println!(
                "Trained {} episodes ({:.1} moves each, {} table entries) in {:.2}s",
                result.training.episodes,
                result.training.average_episode_length(),
                result.training.table_entries,
                result.training.elapsed_seconds
            );
            result.evaluation.print_summary();
        }
        println!("\nTotal time: {:.2}s", self.elapsed_seconds);
    }
}

/// Run a sweep without progress output.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport, Error> {
    let progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
    run_sweep_with_progress(config, &progress)
}

/// Run a sweep, drawing one training progress bar per game shape.
pub fn run_sweep_with_progress(
    config: &SweepConfig,
    progress: &MultiProgress,
) -> Result<SweepReport, Error> {
    config.validate()?;

    let start = Instant::now();
    let games = config.game_configs();

    log::info!(
        "sweeping {} configurations: {} episodes, {} games per pairing",
        games.len(),
        config.training_episodes,
        config.evaluation_games
    );

    let results = games
        .par_iter()
        .enumerate()
        .map(|(index, &game)| run_configuration(config, game, index as u64, progress))
        .collect::<Result<Vec<_>, Error>>()?;

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Ok(SweepReport {
        config: config.clone(),
        results,
        elapsed_seconds: start.elapsed().as_secs_f64(),
        timestamp,
    })
}

/// Seeds for one combination: (engine, learner, random player).
fn derive_seeds(base: u64, index: u64) -> (u64, u64, u64) {
    let root = base.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    (root, root.wrapping_add(1), root.wrapping_add(2))
}

fn run_configuration(
    config: &SweepConfig,
    game: GameConfig,
    index: u64,
    progress: &MultiProgress,
) -> Result<ConfigurationResult, Error> {
    let mut learner_config = config.learner;
    let (mut engine, random) = match config.seed {
        Some(base) => {
            let (engine_seed, learner_seed, random_seed) = derive_seeds(base, index);
            learner_config.seed = Some(learner_seed);
            (
                NimGame::with_seed(game, engine_seed)?,
                RandomStrategy::with_seed(random_seed),
            )
        }
        None => (NimGame::new(game)?, RandomStrategy::new()),
    };

    log::debug!(
        "configuration {}: {} piles, max {}",
        index,
        game.piles_count,
        game.max_pile_size
    );

    let bar = progress.add(ProgressBar::new(config.training_episodes));
    if let Ok(style) = ProgressStyle::with_template(
        "{prefix:>12} [{bar:40.cyan/blue}] {pos}/{len} episodes ({per_sec})",
    ) {
        bar.set_style(style.progress_chars("##-"));
    }
    bar.set_prefix(format!("{}x{}", game.piles_count, game.max_pile_size));

    let mut learner = QLearner::new(learner_config)?;
    let interval = (config.training_episodes / 100).max(1);
    learner.train_with_callback(config.training_episodes, &mut engine, interval, |stats| {
        bar.set_position(stats.episodes)
    })?;
    bar.finish();

    let training = learner.stats().clone();

    let mut strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(learner),
        Box::new(random),
        Box::new(OptimalStrategy::new()),
    ];
    let evaluation = evaluate_all(&mut engine, &mut strategies, config.evaluation_games)?;

    Ok(ConfigurationResult {
        training,
        evaluation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SweepConfig {
        SweepConfig {
            piles_counts: vec![2, 3],
            max_pile_sizes: vec![3],
            training_episodes: 2_000,
            evaluation_games: 200,
            learner: LearnerConfig::default(),
            seed: Some(99),
        }
    }

    #[test]
    fn test_game_configs_order() {
        let config = SweepConfig::default();
        let games = config.game_configs();
        assert_eq!(games.len(), 9);
        assert_eq!(games[0], GameConfig::new(3, 5));
        assert_eq!(games[1], GameConfig::new(3, 10));
        assert_eq!(games[8], GameConfig::new(7, 15));
    }

    #[test]
    fn test_validation() {
        assert!(SweepConfig::default().validate().is_ok());

        let mut config = small_config();
        config.piles_counts.clear();
        assert_eq!(config.validate(), Err(ConfigError::Empty("piles_counts")));

        let mut config = small_config();
        config.max_pile_sizes = vec![0];
        assert_eq!(config.validate(), Err(ConfigError::InvalidPileSize(0)));

        let mut config = small_config();
        config.training_episodes = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroCount("training_episodes"))
        );

        let mut config = small_config();
        config.learner.epsilon = 3.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidExploration(3.0)));
    }

    #[test]
    fn test_from_json_str() {
        let config = SweepConfig::from_json_str(
            r#"{
                "piles_counts": [3],
                "max_pile_sizes": [5, 10],
                "training_episodes": 1000,
                "evaluation_games": 50
            }"#,
        )
        .unwrap();
        assert_eq!(config.game_configs().len(), 2);
        assert_eq!(config.learner, LearnerConfig::default());
        assert_eq!(config.seed, None);

        assert!(matches!(
            SweepConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SweepConfig::from_json_str(
                r#"{"piles_counts": [], "max_pile_sizes": [5], "training_episodes": 1, "evaluation_games": 1}"#
            ),
            Err(ConfigError::Empty(_))
        ));
        assert!(matches!(
            SweepConfig::from_json_file("/nonexistent/sweep.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_derive_seeds_distinct() {
        let (a, b, c) = derive_seeds(7, 0);
        let (d, _, _) = derive_seeds(7, 1);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_sweep_runs_every_configuration() {
        let config = small_config();
        let report = run_sweep(&config).unwrap();

        assert_eq!(report.results.len(), 2);
        for (result, game) in report.results.iter().zip(config.game_configs()) {
            assert_eq!(result.evaluation.game, game);
            assert_eq!(result.training.episodes, 2_000);
            assert!(result.training.average_episode_length() >= 1.0);
            // 3 strategies -> 6 ordered pairings
            assert_eq!(result.evaluation.results.len(), 6);

            let optimal = result.evaluation.total_wins("Optimal");
            let random = result.evaluation.total_wins("Random");
            assert!(optimal > random);
        }
    }

    #[test]
    fn test_seeded_sweep_is_reproducible() {
        let config = small_config();
        let a = run_sweep(&config).unwrap();
        let b = run_sweep(&config).unwrap();

        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.evaluation, y.evaluation);
            assert_eq!(x.training.table_entries, y.training.table_entries);
        }
    }

    #[test]
    fn test_invalid_sweep_fails_fast() {
        let mut config = small_config();
        config.evaluation_games = 0;
        assert!(matches!(run_sweep(&config), Err(Error::Config(_))));
    }
}
