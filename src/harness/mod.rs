//! Driving strategies against each other.
//!
//! - [`arena`]: single matches and head-to-head series
//! - [`report`]: round-robin evaluation of a set of strategies
//! - [`sweep`]: train-and-evaluate runs over many game shapes

pub mod arena;
pub mod report;
pub mod sweep;

pub use arena::{evaluate_pair, play_match, PairingResult, Seat};
pub use report::{evaluate_all, EvaluationReport};
pub use sweep::{
    run_sweep, run_sweep_with_progress, ConfigurationResult, SweepConfig, SweepReport,
};
