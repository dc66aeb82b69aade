//! Evaluation module for renju positions
//!
//! This module provides pattern recognition and scoring for candidate moves.
//! The evaluation considers:
//! - Directional shapes (live/chong fours, live/dead threes, live twos)
//! - Five-cell window scoring over the whole board
//! - Defensive urgency graded by threat level
//! - Positional bonuses (center control, bagua points)
//! - Forbidden-move traps against a restricted opponent
//!
//! All constants come from one [`Weights`] table.

pub mod heuristic;
pub mod shape;
pub mod weights;

pub use heuristic::{
    count_live_twos, evaluate_bagua_point, evaluate_defensive_value, evaluate_diagonal_threat,
    evaluate_forbidden_trap, evaluate_window, score_position, score_position_advanced,
};
pub use shape::{analyze_pattern, PatternCounts, ShapeKind, ThreatLevel};
pub use weights::Weights;
