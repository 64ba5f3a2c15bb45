//! Play Nim against a strategy in the terminal.
//!
//! Usage:
//!   cargo run --release --bin play -- [OPTIONS]
//!
//! Options:
//!   --piles <N>           Number of piles (default: 5)
//!   --max-size <N>        Maximum initial pile size (default: 10)
//!   --opponent <NAME>     learner | random | optimal (default: learner)
//!   --episodes <N>        Training episodes for the learner (default: 30000)
//!   --human-first         Move first instead of the opponent
//!   --explore             Let the learner keep exploring while playing
//!   --seed <N>            Random seed (optional)
//!   --verbose             Debug logging
//!
//! Moves are entered as `<pile> <count>` with 1-based pile numbers.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use nim_rl::learning::{LearnerConfig, QLearner};
use nim_rl::logging;
use nim_rl::nim::{Action, GameConfig, NimGame};
use nim_rl::strategy::{OptimalStrategy, RandomStrategy, Strategy};
use nim_rl::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Learner,
    Random,
    Optimal,
}

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play Nim against a computer opponent")]
struct Args {
    /// Number of piles
    #[arg(short, long, default_value_t = 5)]
    piles: usize,

    /// Maximum initial pile size
    #[arg(short, long, default_value_t = 10)]
    max_size: u32,

    /// Opponent strategy
    #[arg(short, long, value_enum, default_value_t = Opponent::Learner)]
    opponent: Opponent,

    /// Training episodes for the learner
    #[arg(short, long, default_value_t = 30_000)]
    episodes: u64,

    /// Move first instead of the opponent
    #[arg(long)]
    human_first: bool,

    /// Let the learner keep exploring while playing
    #[arg(long)]
    explore: bool,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Parse `<pile> <count>` with a 1-based pile number.
fn parse_move(line: &str) -> Option<Action> {
    let mut parts = line.split_whitespace();
    let pile: usize = parts.next()?.parse().ok()?;
    let count: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || pile == 0 {
        return None;
    }
    Some(Action::new(pile - 1, count))
}

fn build_opponent(args: &Args, engine: &mut NimGame) -> Result<Box<dyn Strategy>, Error> {
    let opponent: Box<dyn Strategy> = match args.opponent {
        Opponent::Optimal => Box::new(OptimalStrategy::new()),
        Opponent::Random => match args.seed {
            Some(seed) => Box::new(RandomStrategy::with_seed(seed)),
            None => Box::new(RandomStrategy::new()),
        },
        Opponent::Learner => {
            let mut config = LearnerConfig::default();
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            let mut learner = QLearner::new(config)?;

            println!("Training the learner for {} episodes...", args.episodes);
            let stats = learner.train(args.episodes, engine)?;
            println!(
                "Done: {} table entries in {:.2}s",
                stats.table_entries, stats.elapsed_seconds
            );
            Box::new(learner.with_exploration_in_play(args.explore))
        }
    };
    Ok(opponent)
}

/// Read moves until one is legal, or `None` on end of input.
fn read_human_move(
    engine: &mut NimGame,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<Option<Action>> {
    loop {
        print!("Your move (pile count): ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(None),
        };

        let Some(action) = parse_move(&line) else {
            println!("Enter a pile number and a count, e.g. `2 3`.");
            continue;
        };

        match engine.apply(action) {
            Ok(()) => return Ok(Some(action)),
            Err(e) => println!("Invalid move: {}. Try again.", e),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(logging::level_for(args.verbose));

    let config = GameConfig::new(args.piles, args.max_size);
    let engine = match args.seed {
        Some(seed) => NimGame::with_seed(config, seed),
        None => NimGame::new(config),
    };
    let mut engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("invalid game: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut opponent = match build_opponent(&args, &mut engine) {
        Ok(opponent) => opponent,
        Err(e) => {
            log::error!("could not prepare opponent: {}", e);
            return ExitCode::FAILURE;
        }
    };

    engine.restart();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut human_to_move = args.human_first;

    println!();
    println!("Playing against {}. Take the last object to win.", opponent.name());

    while !engine.is_terminal() {
        println!();
        print!("{}", engine);

        if human_to_move {
            match read_human_move(&mut engine, &mut lines) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    println!("\nGoodbye.");
                    return ExitCode::SUCCESS;
                }
                Err(e) => {
                    log::error!("reading input failed: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            let action = match opponent.choose_action(engine.piles()) {
                Ok(action) => action,
                Err(e) => {
                    log::error!("{} failed to move: {}", opponent.name(), e);
                    return ExitCode::FAILURE;
                }
            };
            if let Err(e) = engine.apply(action) {
                log::error!("{} made an illegal move: {}", opponent.name(), e);
                return ExitCode::FAILURE;
            }
            println!("{} chose to {}", opponent.name(), action);
        }

        human_to_move = !human_to_move;
    }

    // the side that just moved took the last object
    if human_to_move {
        println!("\n{} wins!", opponent.name());
    } else {
        println!("\nYou win!");
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("2 3"), Some(Action::new(1, 3)));
        assert_eq!(parse_move("  1   1 \n"), Some(Action::new(0, 1)));
        assert_eq!(parse_move("0 1"), None);
        assert_eq!(parse_move("1"), None);
        assert_eq!(parse_move("a b"), None);
        assert_eq!(parse_move("1 2 3"), None);
    }

    #[test]
    fn test_read_human_move_reprompts() {
        let mut engine = NimGame::from_piles(vec![2, 1]);
        let input = ["junk", "3 1", "1 5", "1 2"];
        let mut lines = input.iter().map(|s| Ok::<_, io::Error>(s.to_string()));

        let action = read_human_move(&mut engine, &mut lines).unwrap();
        assert_eq!(action, Some(Action::new(0, 2)));
        assert_eq!(engine.snapshot(), vec![0, 1]);
    }

    #[test]
    fn test_read_human_move_end_of_input() {
        let mut engine = NimGame::from_piles(vec![2]);
        let mut lines = std::iter::empty::<io::Result<String>>();
        assert_eq!(read_human_move(&mut engine, &mut lines).unwrap(), None);
        assert_eq!(engine.snapshot(), vec![2]);
    }
}
