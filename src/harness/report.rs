//! Round-robin evaluation and its report.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

use crate::error::Error;
use crate::harness::arena::{evaluate_pair, PairingResult};
use crate::nim::{GameConfig, NimGame};
use crate::strategy::Strategy;

/// Results of every strategy against every other strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Shape of the dealt games.
    pub game: GameConfig,
    /// Matches per ordered pairing.
    pub games: u64,
    /// One entry per ordered pair of distinct strategies.
    pub results: Vec<PairingResult>,
}

impl EvaluationReport {
    /// Result for `strategy` against `opponent`, by name.
    pub fn result(&self, strategy: &str, opponent: &str) -> Option<&PairingResult> {
        self.results
            .iter()
            .find(|r| r.strategy == strategy && r.opponent == opponent)
    }

    /// Total wins of `strategy` across all its pairings.
    pub fn total_wins(&self, strategy: &str) -> u64 {
        self.results
            .iter()
            .filter(|r| r.strategy == strategy)
            .map(|r| r.wins)
            .sum()
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Print a human-readable summary.
    pub fn print_summary(&self) {
        println!(
            "\nEvaluation results after {} games for configuration:",
            self.games
        );
        println!("    - Piles: {}", self.game.piles_count);
        println!("    - Max pile size: {}", self.game.max_pile_size);

        let mut current: Option<&str> = None;
        for result in &self.results {
            if current != Some(result.strategy.as_str()) {
                println!("\nResults for {}:", result.strategy);
                current = Some(result.strategy.as_str());
            }
            println!(
                "    Wins against {}: {} ({:.2}%)",
                result.opponent,
                result.wins,
                result.win_rate() * 100.0
            );
        }
    }
}

/// Evaluate every strategy against every other one.
///
/// Each ordered pair `(a, b)` with `a != b` plays `games` matches, so every
/// unordered pairing is measured twice, once from each side.
pub fn evaluate_all(
    engine: &mut NimGame,
    strategies: &mut [Box<dyn Strategy>],
    games: u64,
) -> Result<EvaluationReport, Error> {
    let mut results = Vec::with_capacity(strategies.len() * strategies.len().saturating_sub(1));

    for i in 0..strategies.len() {
        for j in 0..strategies.len() {
            if i == j {
                continue;
            }

            let (strategy, opponent) = pair_mut(strategies, i, j);
            results.push(evaluate_pair(engine, &mut **strategy, &mut **opponent, games)?);
        }
    }

    Ok(EvaluationReport {
        game: engine.config(),
        games,
        results,
    })
}

/// Two distinct mutable elements of a slice.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
