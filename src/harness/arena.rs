//! Playing matches between strategies.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::nim::NimGame;
use crate::strategy::Strategy;

/// Which side of a match moved first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The side that made the opening move.
    First,
    /// The side that replied.
    Second,
}

impl Seat {
    /// The opposite seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// Play `engine` to the end from its current position.
///
/// `first` moves first. The engine is not restarted, so callers can set up
/// a specific position beforehand.
///
/// # Returns
/// The seat that took the last object and therefore won.
pub fn play_match(
    engine: &mut NimGame,
    first: &mut dyn Strategy,
    second: &mut dyn Strategy,
) -> Result<Seat, Error> {
    let mut mover = Seat::First;

    loop {
        let strategy: &mut dyn Strategy = match mover {
            Seat::First => &mut *first,
            Seat::Second => &mut *second,
        };

        let action = strategy.choose_action(engine.piles())?;
        engine.apply(action)?;

        if engine.is_terminal() {
            return Ok(mover);
        }
        mover = mover.other();
    }
}

/// Outcome of repeated matches between two strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    /// Strategy whose wins are counted.
    pub strategy: String,
    /// Its opponent.
    pub opponent: String,
    /// Matches played.
    pub games: u64,
    /// Matches won by `strategy`.
    pub wins: u64,
    /// Matches won by `strategy` when it moved first.
    pub wins_moving_first: u64,
}

impl PairingResult {
    /// Matches lost by `strategy`.
    pub fn losses(&self) -> u64 {
        self.games - self.wins
    }

    /// Fraction of matches won, 0.0 when no games were played.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Play `games` matches between `strategy` and `opponent` on fresh deals.
///
/// The first mover alternates, starting with `strategy`.
pub fn evaluate_pair(
    engine: &mut NimGame,
    strategy: &mut dyn Strategy,
    opponent: &mut dyn Strategy,
    games: u64,
) -> Result<PairingResult, Error> {
    let mut wins = 0;
    let mut wins_moving_first = 0;

    for game in 0..games {
        engine.restart();

        let strategy_seat = if game % 2 == 0 { Seat::First } else { Seat::Second };
        let winner = match strategy_seat {
            Seat::First => play_match(engine, strategy, opponent)?,
            Seat::Second => play_match(engine, opponent, strategy)?,
        };

        if winner == strategy_seat {
            wins += 1;
            if strategy_seat == Seat::First {
                wins_moving_first += 1;
            }
        }
    }

    log::debug!(
        "{} vs {}: {}/{} wins",
        strategy.name(),
        opponent.name(),
        wins,
        games
    );

    Ok(PairingResult {
        strategy: strategy.name().to_string(),
        opponent: opponent.name().to_string(),
        games,
        wins,
        wins_moving_first,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;
    use crate::nim::{nim_sum, Action, GameConfig};
    use crate::strategy::{OptimalStrategy, RandomStrategy};

    #[test]
    fn test_seat_other() {
        assert_eq!(Seat::First.other(), Seat::Second);
        assert_eq!(Seat::Second.other(), Seat::First);
    }

    #[test]
    fn test_last_mover_wins() {
        // [2]: first mover takes both
        let mut game = NimGame::from_piles(vec![2]);
        let winner = play_match(&mut game, &mut OptimalStrategy, &mut OptimalStrategy).unwrap();
        assert_eq!(winner, Seat::First);
        assert!(game.is_terminal());

        // [1, 1]: two forced moves, second mover finishes
        let mut game = NimGame::from_piles(vec![1, 1]);
        let winner = play_match(&mut game, &mut OptimalStrategy, &mut OptimalStrategy).unwrap();
        assert_eq!(winner, Seat::Second);
    }

    #[test]
    fn test_optimal_first_mover_wins_from_nonzero_sum() {
        let mut dealer = NimGame::with_seed(GameConfig::new(4, 12), 31).unwrap();
        let mut played = 0;

        while played < 200 {
            dealer.restart();
            let piles = dealer.snapshot();
            let winner_expected = if nim_sum(&piles) != 0 { Seat::First } else { Seat::Second };

            let mut game = NimGame::from_piles(piles);
            let winner = play_match(&mut game, &mut OptimalStrategy, &mut OptimalStrategy).unwrap();
            assert_eq!(winner, winner_expected);
            played += 1;
        }
    }

    #[test]
    fn test_random_play_terminates_within_pile_sum() {
        let mut game = NimGame::with_seed(GameConfig::new(5, 10), 8).unwrap();
        let mut a = RandomStrategy::with_seed(1);
        let mut b = RandomStrategy::with_seed(2);

        for _ in 0..50 {
            game.restart();
            let total = game.remaining();
            let mut moves = 0;
            let mut mover = Seat::First;
            while !game.is_terminal() {
                let strategy: &mut dyn Strategy = match mover {
                    Seat::First => &mut a,
                    Seat::Second => &mut b,
                };
                let action = strategy.choose_action(game.piles()).unwrap();
                game.apply(action).unwrap();
                moves += 1;
                mover = mover.other();
            }
            assert!(moves <= total);
        }
    }

    #[test]
    fn test_evaluate_pair_alternates_first_mover() {
        let mut game = NimGame::with_seed(GameConfig::new(3, 5), 4).unwrap();
        let mut optimal = OptimalStrategy::new();
        let mut random = RandomStrategy::with_seed(3);

        let result = evaluate_pair(&mut game, &mut optimal, &mut random, 400).unwrap();
        assert_eq!(result.games, 400);
        assert_eq!(result.wins + result.losses(), 400);
        assert!(result.wins_moving_first <= 200);
        assert!(result.win_rate() > 0.8, "optimal won {:.3}", result.win_rate());
        assert_eq!(result.strategy, "Optimal");
        assert_eq!(result.opponent, "Random");
    }

    #[test]
    fn test_zero_games() {
        let mut game = NimGame::from_piles(vec![3]);
        let result =
            evaluate_pair(&mut game, &mut OptimalStrategy, &mut OptimalStrategy, 0).unwrap();
        assert_eq!(result.win_rate(), 0.0);
    }

    #[test]
    fn test_play_match_with_differently_borrowed_strategies() {
        let mut boxed: Box<dyn Strategy> = Box::new(RandomStrategy::with_seed(6));
        let mut game = NimGame::from_piles(vec![3, 4, 5]);

        let winner = {
            let mut local = OptimalStrategy::new();
            play_match(&mut game, &mut local, &mut *boxed).unwrap()
        };
        // Nim-sum of [3, 4, 5] is non-zero, so the optimal first mover wins
        assert_eq!(winner, Seat::First);
        assert!(game.is_terminal());
    }

    struct Cheater;

    impl Strategy for Cheater {
        fn choose_action(&mut self, state: &[u32]) -> Result<Action, StrategyError> {
            Ok(Action::new(state.len(), 1))
        }

        fn name(&self) -> &str {
            "Cheater"
        }
    }

    #[test]
    fn test_illegal_move_propagates() {
        let mut game = NimGame::from_piles(vec![3, 3]);
        let err = play_match(&mut game, &mut Cheater, &mut OptimalStrategy).unwrap_err();
        assert!(matches!(err, Error::InvalidMove(_)));
        assert_eq!(game.snapshot(), vec![3, 3]);
    }

    #[test]
    fn test_terminal_start_propagates_strategy_error() {
        let mut game = NimGame::from_piles(vec![0, 0]);
        let err = play_match(&mut game, &mut OptimalStrategy, &mut OptimalStrategy).unwrap_err();
        assert_eq!(err, Error::Strategy(StrategyError::NoMovesAvailable));
    }
}
