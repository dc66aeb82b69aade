//! Error types for the boundary operations of the engine
//!
//! Evaluation never fails: forbidden moves, wins and draws are ordinary
//! values. Only inputs coming from outside (coordinates, board sizes,
//! configuration files) are rejected here.

use thiserror::Error;

/// Errors raised when a move or board request cannot be honoured
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The coordinate is outside the board
    #[error("invalid move ({row}, {col}): outside the board")]
    InvalidMove { row: i32, col: i32 },

    /// The cell already holds a stone
    #[error("invalid move ({row}, {col}): cell is occupied")]
    Occupied { row: i32, col: i32 },

    /// Requested board size cannot hold a five or exceeds the bitboard
    #[error("unsupported board size {0}")]
    InvalidBoardSize(usize),

    /// A move was submitted after the game ended
    #[error("game is already over")]
    GameOver,

    /// A move was submitted before the session was started
    #[error("game has not started")]
    NotStarted,

    /// An engine was asked to play under different rules than the session's
    #[error("engine rules do not match the game rules")]
    RulesMismatch,

    /// The stone colour cannot move (e.g. `Stone::Empty`)
    #[error("{0} cannot take a turn")]
    InvalidPlayer(crate::board::Stone),
}

/// Errors raised while loading an [`EngineConfig`](crate::config::EngineConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
