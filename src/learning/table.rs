//! Storage for learned action values.
//!
//! The table maps a (state, action) pair to the learner's current estimate
//! of that move's value. Pairs that were never updated read as 0.0.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::nim::Action;

/// Composite key: a pile configuration together with a move made from it.
///
/// Equality and hashing are structural, element by element, so two keys
/// built from equal snapshots always hit the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateAction {
    /// Pile configuration the action was taken from.
    pub state: Vec<u32>,
    /// The action taken.
    pub action: Action,
}

impl StateAction {
    /// Create a key from a borrowed state.
    pub fn new(state: &[u32], action: Action) -> Self {
        Self {
            state: state.to_vec(),
            action,
        }
    }
}

/// Action-value (Q) table.
///
/// Owned by exactly one learner. Entries are only ever inserted or
/// overwritten, so the table grows monotonically during training.
#[derive(Debug, Clone, Default)]
pub struct ActionValueTable {
    /// (state, action) -> value estimate
    values: FxHashMap<StateAction, f64>,
}

impl ActionValueTable {
    /// Create new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Value for a key, 0.0 if never stored.
    pub fn get(&self, key: &StateAction) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }

    /// Value for a (state, action) pair, 0.0 if never stored.
    pub fn value(&self, state: &[u32], action: Action) -> f64 {
        self.get(&StateAction::new(state, action))
    }

    /// Store a value, overwriting any previous one.
    pub fn set(&mut self, key: StateAction, value: f64) {
        self.values.insert(key, value);
    }

    /// Whether a value has been stored for the key.
    pub fn contains(&self, key: &StateAction) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored (state, action) pairs.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct states with at least one stored action.
    pub fn num_states(&self) -> usize {
        self.values
            .keys()
            .map(|key| key.state.as_slice())
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Iterate over all stored entries.
    pub fn iter(&self) -> impl Iterator<Item = (&StateAction, &f64)> {
        self.values.iter()
    }

    /// Clear all stored data.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Get total memory usage estimate in bytes.
    pub fn memory_usage(&self) -> usize {
        self.values
            .keys()
            .map(|k| {
                std::mem::size_of::<StateAction>()
                    + k.state.len() * std::mem::size_of::<u32>()
                    + std::mem::size_of::<f64>()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_zero() {
        let table = ActionValueTable::new();
        assert_eq!(table.value(&[1, 2], Action::new(0, 1)), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_keys_are_structural() {
        let mut table = ActionValueTable::with_capacity(4);
        let state = vec![3, 1, 4];
        table.set(StateAction::new(&state, Action::new(2, 3)), 0.75);

        // A separately built snapshot with the same contents hits the entry
        let copy: Vec<u32> = [3, 1, 4].to_vec();
        assert_eq!(table.value(&copy, Action::new(2, 3)), 0.75);

        // Different action or state misses
        assert_eq!(table.value(&copy, Action::new(2, 2)), 0.0);
        assert_eq!(table.value(&[3, 1, 5], Action::new(2, 3)), 0.0);
    }

    #[test]
    fn test_set_overwrites() {
        let mut table = ActionValueTable::new();
        let key = StateAction::new(&[2], Action::new(0, 2));
        table.set(key.clone(), 1.0);
        table.set(key.clone(), -0.5);
        assert_eq!(table.get(&key), -0.5);
        assert_eq!(table.len(), 1);
        assert!(table.contains(&key));
    }

    #[test]
    fn test_num_states_and_clear() {
        let mut table = ActionValueTable::new();
        table.set(StateAction::new(&[2, 1], Action::new(0, 1)), 0.1);
        table.set(StateAction::new(&[2, 1], Action::new(1, 1)), 0.2);
        table.set(StateAction::new(&[1, 1], Action::new(0, 1)), 0.3);

        assert_eq!(table.len(), 3);
        assert_eq!(table.num_states(), 2);
        assert!(table.memory_usage() > 0);
        assert_eq!(table.iter().count(), 3);

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.memory_usage(), 0);
    }
}
