//! Train-and-evaluate sweep binary.
//!
//! Usage:
//!   cargo run --release --bin evaluate -- [OPTIONS]
//!
//! Options:
//!   --config <FILE>       Sweep configuration JSON file (optional)
//!   --piles <N,...>       Pile counts to sweep (default: 3,5,7)
//!   --sizes <N,...>       Maximum pile sizes to sweep (default: 5,10,15)
//!   --episodes <N>        Training episodes per learner (default: 50000)
//!   --games <N>           Games per ordered pairing (default: 10000)
//!   --alpha <X>           Learning rate (default: 0.5)
//!   --epsilon <X>         Exploration rate (default: 0.1)
//!   --seed <N>            Base random seed (optional)
//!   --output <FILE>       Output file (default: evaluation.json)
//!   --verbose             Debug logging

use std::process::ExitCode;

use clap::Parser;
use indicatif::MultiProgress;

use nim_rl::harness::{run_sweep_with_progress, SweepConfig};
use nim_rl::logging;

#[derive(Parser, Debug)]
#[command(name = "evaluate", about = "Train Q-learners and evaluate them against random and optimal play")]
struct Args {
    /// Sweep configuration JSON file; other sweep flags override it
    #[arg(short, long)]
    config: Option<String>,

    /// Pile counts to sweep
    #[arg(long, value_delimiter = ',')]
    piles: Option<Vec<usize>>,

    /// Maximum pile sizes to sweep
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u32>>,

    /// Training episodes per learner
    #[arg(short, long)]
    episodes: Option<u64>,

    /// Games per ordered pairing
    #[arg(short, long)]
    games: Option<u64>,

    /// Learning rate
    #[arg(long)]
    alpha: Option<f64>,

    /// Exploration rate
    #[arg(long)]
    epsilon: Option<f64>,

    /// Base random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output file
    #[arg(short, long, default_value = "evaluation.json")]
    output: String,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn sweep_config(&self) -> Result<SweepConfig, nim_rl::ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("loading configuration from {}", path);
                SweepConfig::from_json_file(path)?
            }
            None => SweepConfig::default(),
        };

        if let Some(piles) = &self.piles {
            config.piles_counts = piles.clone();
        }
        if let Some(sizes) = &self.sizes {
            config.max_pile_sizes = sizes.clone();
        }
        if let Some(episodes) = self.episodes {
            config.training_episodes = episodes;
        }
        if let Some(games) = self.games {
            config.evaluation_games = games;
        }
        if let Some(alpha) = self.alpha {
            config.learner.alpha = alpha;
        }
        if let Some(epsilon) = self.epsilon {
            config.learner.epsilon = epsilon;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(logging::level_for(args.verbose));

    let config = match args.sweep_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("=================================================");
    println!("  Nim Q-Learning Evaluation");
    println!("=================================================");
    println!();
    println!("Pile counts: {:?}", config.piles_counts);
    println!("Max pile sizes: {:?}", config.max_pile_sizes);
    println!("Training episodes: {}", config.training_episodes);
    println!("Games per pairing: {}", config.evaluation_games);
    println!(
        "Alpha: {} | Epsilon: {}",
        config.learner.alpha, config.learner.epsilon
    );
    if let Some(s) = config.seed {
        println!("Seed: {}", s);
    }
    println!("Output: {}", args.output);
    println!();

    let progress = MultiProgress::new();
    let report = match run_sweep_with_progress(&config, &progress) {
        Ok(report) => report,
        Err(e) => {
            log::error!("sweep failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    report.print_summary();
    println!();

    println!("Exporting results to {}...", args.output);
    match report.save_json(&args.output) {
        Ok(()) => println!("Results saved successfully!"),
        Err(e) => {
            log::error!("error saving results: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
