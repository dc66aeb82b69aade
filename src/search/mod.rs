//! Search module for the renju AI
//!
//! Contains the bounded VCT evaluator that scores forcing threat sequences.

pub mod threat;

pub use threat::{evaluate_vct, find_forced_responses, find_threatening_moves, ThreatSearcher};
