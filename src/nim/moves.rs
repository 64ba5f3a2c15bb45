//! Actions and legal-move enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A move: take `count` objects from pile `pile`.
///
/// An action is never valid or invalid on its own, only for a given state.
/// Use [`Action::is_legal_in`] or [`legal_moves`] to check against one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    /// Index of the pile, starting at 0.
    pub pile: usize,
    /// Number of objects to remove (at least 1).
    pub count: u32,
}

impl Action {
    /// Create a new action.
    pub fn new(pile: usize, count: u32) -> Self {
        Self { pile, count }
    }

    /// Whether this action is legal in `state`.
    pub fn is_legal_in(&self, state: &[u32]) -> bool {
        match state.get(self.pile) {
            Some(&size) => self.count >= 1 && self.count <= size,
            None => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.count, self.pile + 1)
    }
}

/// Enumerate every legal action for `state`.
///
/// Actions come out pile-ascending, then count-ascending. The order is
/// deterministic, which the learner relies on for its tie-break.
/// The number of actions equals the sum of the pile counts.
pub fn legal_moves(state: &[u32]) -> Vec<Action> {
    let mut actions = Vec::with_capacity(move_count(state));

    for (pile, &size) in state.iter().enumerate() {
        for count in 1..=size {
            actions.push(Action { pile, count });
        }
    }

    actions
}

/// Number of legal actions in `state`, the sum of its piles.
///
/// Summed as `usize` so large configurations cannot overflow.
pub fn move_count(state: &[u32]) -> usize {
    state.iter().map(|&pile| pile as usize).sum()
}

/// Bitwise XOR of all pile counts.
///
/// Zero means the player to move loses against optimal play.
pub fn nim_sum(state: &[u32]) -> u32 {
    state.iter().fold(0, |acc, &pile| acc ^ pile)
}

/// Whether every pile is empty.
pub fn is_terminal_state(state: &[u32]) -> bool {
    state.iter().all(|&pile| pile == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_legal_moves_matches_definition() {
        let state = [3, 0, 2];
        let moves = legal_moves(&state);

        assert_eq!(moves.len(), 5);

        let expected: HashSet<Action> = [(0, 1), (0, 2), (0, 3), (2, 1), (2, 2)]
            .iter()
            .map(|&(p, c)| Action::new(p, c))
            .collect();
        let actual: HashSet<Action> = moves.iter().copied().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_legal_moves_size_is_pile_sum() {
        for state in [vec![1], vec![5, 5, 5], vec![7, 0, 1, 3], vec![10, 2]] {
            let moves = legal_moves(&state);
            let sum: u32 = state.iter().sum();
            assert_eq!(moves.len(), sum as usize);

            // No duplicates
            let unique: HashSet<Action> = moves.iter().copied().collect();
            assert_eq!(unique.len(), moves.len());

            for action in &moves {
                assert!(action.is_legal_in(&state));
            }
        }
    }

    #[test]
    fn test_legal_moves_is_deterministic() {
        let state = [2, 3];
        assert_eq!(legal_moves(&state), legal_moves(&state));
        assert_eq!(legal_moves(&state)[0], Action::new(0, 1));
        assert_eq!(legal_moves(&state)[4], Action::new(1, 3));
    }

    #[test]
    fn test_move_count() {
        assert_eq!(move_count(&[3, 0, 2]), legal_moves(&[3, 0, 2]).len());
        assert_eq!(move_count(&[]), 0);
        // Pile sum past u32::MAX
        assert_eq!(move_count(&[u32::MAX, 2]), u32::MAX as usize + 2);
    }

    #[test]
    fn test_terminal_state_has_no_moves() {
        assert!(legal_moves(&[0, 0, 0]).is_empty());
        assert!(legal_moves(&[]).is_empty());
        assert!(is_terminal_state(&[0, 0]));
        assert!(!is_terminal_state(&[0, 1]));
    }

    #[test]
    fn test_is_legal_in() {
        let state = [3, 4];
        assert!(Action::new(1, 4).is_legal_in(&state));
        assert!(!Action::new(1, 5).is_legal_in(&state));
        assert!(!Action::new(0, 0).is_legal_in(&state));
        assert!(!Action::new(2, 1).is_legal_in(&state));
    }

    #[test]
    fn test_nim_sum() {
        assert_eq!(nim_sum(&[1, 4, 5]), 0);
        assert_eq!(nim_sum(&[3, 4, 5]), 2);
        assert_eq!(nim_sum(&[]), 0);
    }
}
