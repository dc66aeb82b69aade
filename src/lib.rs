//! Renju engine: five-in-a-row with forbidden moves and a threat-driven AI
//!
//! Rules implemented:
//! - Square board, 15x15 by default (5x5 up to 16x16)
//! - Five in a row wins
//! - One configurable player (Black in standard renju) is restricted: it
//!   wins only with an exact five and may not play a long connection,
//!   double four or double three
//! - Completing an exact five overrides every forbidden shape
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Win detection and forbidden-move classification
//! - [`eval`]: Shape analysis, the weights table and heuristics
//! - [`search`]: Bounded threat-sequence (VCT) evaluation
//! - [`engine`]: Move-selection cascade
//! - [`game`]: Session state machine with history and undo
//! - [`config`]: TOML-loadable engine configuration
//!
//! # Quick Start
//!
//! ```
//! use renju::{apply_move, classify_forbidden, init_board, select_ai_move, EngineConfig, Stone};
//!
//! let config = EngineConfig::default();
//! let rules = config.rules();
//! let mut board = init_board(15).unwrap();
//!
//! let outcome = apply_move(&mut board, 7, 7, Stone::Black, &rules).unwrap();
//! assert!(!outcome.win);
//!
//! // AI answers as White
//! let reply = select_ai_move(&board, Stone::White, &config).unwrap();
//! apply_move(&mut board, reply.row as i32, reply.col as i32, Stone::White, &rules).unwrap();
//!
//! // Pre-move hint for the restricted player
//! assert!(!classify_forbidden(&board, 0, 0, Stone::Black).is_forbidden());
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

use serde::Serialize;
use tracing::debug;

// Re-export commonly used types for convenience
pub use board::{Board, Direction, Pos, Stone, BOARD_SIZE};
pub use config::{EngineConfig, Restricted};
pub use engine::{Engine, MoveResult, Strategy};
pub use error::{ConfigError, GameError};
pub use eval::{PatternCounts, ThreatLevel, Weights};
pub use game::{GameSession, Phase, WinReason};
pub use rules::{ForbiddenKind, ForbiddenResult, Rules};

/// What a stone placed by [`apply_move`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MoveOutcome {
    /// The mover completed a winning line
    pub win: bool,
    /// Set when the move was forbidden for the mover; the stone is still placed
    pub forbidden: Option<ForbiddenResult>,
}

/// Fresh empty board of `size` x `size`
pub fn init_board(size: usize) -> Result<Board, GameError> {
    Board::with_size(size)
}

/// Place `player`'s stone at (row, col) and report a win or forbidden move.
///
/// Out-of-range and occupied cells are rejected without touching the board.
/// A forbidden move is placed and reported, never a win.
pub fn apply_move(
    board: &mut Board,
    row: i32,
    col: i32,
    player: Stone,
    rules: &Rules,
) -> Result<MoveOutcome, GameError> {
    if player == Stone::Empty {
        return Err(GameError::InvalidPlayer(player));
    }
    if !board.contains(row, col) {
        return Err(GameError::InvalidMove { row, col });
    }
    let pos = Pos::new(row as u8, col as u8);
    if !board.is_empty(pos) {
        return Err(GameError::Occupied { row, col });
    }

    let check = rules.check(board, pos, player);
    board.place_stone(pos, player);

    let outcome = if check.is_forbidden() {
        MoveOutcome {
            win: false,
            forbidden: Some(check),
        }
    } else {
        MoveOutcome {
            win: rules.wins(board, pos, player),
            forbidden: None,
        }
    };
    debug!(%player, %pos, win = outcome.win, forbidden = ?outcome.forbidden, "move applied");
    Ok(outcome)
}

/// Engine move for `ai_player`; `None` only on a full board
pub fn select_ai_move(board: &Board, ai_player: Stone, config: &EngineConfig) -> Option<Pos> {
    Engine::with_config(config.clone()).select_move(board, ai_player)
}

/// Forbidden-shape classification of `player` playing (row, col).
///
/// Classifies the shape regardless of which side the rule set restricts.
/// Off-board and occupied cells, and [`Stone::Empty`], are reported legal.
/// The board is never modified.
pub fn classify_forbidden(board: &Board, row: i32, col: i32, player: Stone) -> ForbiddenResult {
    if player == Stone::Empty || !board.contains(row, col) {
        return ForbiddenResult::LEGAL;
    }
    let pos = Pos::new(row as u8, col as u8);
    if !board.is_empty(pos) {
        return ForbiddenResult::LEGAL;
    }
    let mut scratch = board.clone();
    rules::classify(&mut scratch, pos, player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_board_sizes() {
        assert_eq!(init_board(15).unwrap().size(), 15);
        assert_eq!(init_board(5).unwrap().size(), 5);
        assert_eq!(init_board(4), Err(GameError::InvalidBoardSize(4)));
        assert_eq!(init_board(17), Err(GameError::InvalidBoardSize(17)));
    }

    #[test]
    fn test_apply_move_rejects_bad_input() {
        let rules = Rules::renju();
        let mut board = Board::new();
        apply_move(&mut board, 7, 7, Stone::Black, &rules).unwrap();

        assert_eq!(
            apply_move(&mut board, 7, 7, Stone::White, &rules),
            Err(GameError::Occupied { row: 7, col: 7 })
        );
        assert_eq!(
            apply_move(&mut board, 15, 0, Stone::White, &rules),
            Err(GameError::InvalidMove { row: 15, col: 0 })
        );
        assert_eq!(
            apply_move(&mut board, 0, 0, Stone::Empty, &rules),
            Err(GameError::InvalidPlayer(Stone::Empty))
        );
        assert_eq!(board.stone_count(), 1);
    }

    #[test]
    fn test_apply_move_reports_forbidden() {
        let rules = Rules::renju();
        let mut board = Board::new();
        for (r, c) in [(7, 6), (7, 8), (6, 7), (8, 7)] {
            apply_move(&mut board, r, c, Stone::Black, &rules).unwrap();
        }
        let outcome = apply_move(&mut board, 7, 7, Stone::Black, &rules).unwrap();
        assert!(!outcome.win);
        assert_eq!(
            outcome.forbidden,
            Some(ForbiddenResult::forbidden(ForbiddenKind::DoubleThree))
        );
        assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
    }

    #[test]
    fn test_apply_move_win() {
        let rules = Rules::renju();
        let mut board = Board::new();
        for c in 3..7 {
            apply_move(&mut board, 7, c, Stone::Black, &rules).unwrap();
        }
        let outcome = apply_move(&mut board, 7, 7, Stone::Black, &rules).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome {
                win: true,
                forbidden: None
            }
        );
    }

    #[test]
    fn test_classify_forbidden_is_pure() {
        let mut board = Board::new();
        for c in 7..11 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        board.place_stone(Pos::new(7, 5), Stone::Black);
        let before = board.clone();

        // (7,6) joins 5 and 7..10 into six; (7,11) makes exactly five
        assert_eq!(
            classify_forbidden(&board, 7, 6, Stone::Black).kind,
            Some(ForbiddenKind::LongConnection)
        );
        assert!(!classify_forbidden(&board, 7, 11, Stone::Black).is_forbidden());
        assert_eq!(board, before);
    }

    #[test]
    fn test_classify_forbidden_out_of_range() {
        let board = Board::new();
        assert_eq!(classify_forbidden(&board, -1, 4, Stone::Black), ForbiddenResult::LEGAL);
        assert_eq!(classify_forbidden(&board, 4, 99, Stone::Black), ForbiddenResult::LEGAL);
        assert_eq!(classify_forbidden(&board, 4, 4, Stone::Empty), ForbiddenResult::LEGAL);
    }

    #[test]
    fn test_select_ai_move_on_empty_board() {
        let board = Board::new();
        let config = EngineConfig::default();
        assert_eq!(select_ai_move(&board, Stone::Black, &config), Some(Pos::new(7, 7)));
    }
}
