//! Game session state machine
//!
//! A session owns one board and drives it from `Idle` through alternating
//! turns to a terminal `Won` or `Draw`. A forbidden move by the restricted
//! player is not rejected: it is played and loses the game on the spot.

use std::fmt;

use tracing::{debug, info};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::GameError;
use crate::rules::{winning_line, ForbiddenKind, Rules};

/// How a game was won
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    FiveInRow,
    /// The loser played a forbidden move
    Forbidden(ForbiddenKind),
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created but not started
    Idle,
    AwaitingMove(Stone),
    Won { winner: Stone, reason: WinReason },
    /// Board full without a winner
    Draw,
}

impl Phase {
    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::Won { .. } | Phase::Draw)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => f.write_str("not started"),
            Phase::AwaitingMove(stone) => write!(f, "{} to move", stone),
            Phase::Won {
                winner,
                reason: WinReason::FiveInRow,
            } => write!(f, "{} wins with five in a row", winner),
            Phase::Won {
                winner,
                reason: WinReason::Forbidden(kind),
            } => write!(f, "{} wins: {} played a forbidden {}", winner, winner.opponent(), kind),
            Phase::Draw => f.write_str("draw"),
        }
    }
}

/// One game on one board
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    rules: Rules,
    first_player: Stone,
    phase: Phase,
    history: Vec<(Pos, Stone)>,
    winning_line: Option<Vec<Pos>>,
}

impl GameSession {
    /// Idle session sized and ruled by `config`
    pub fn new(config: &EngineConfig) -> Result<Self, GameError> {
        if config.first_player == Stone::Empty {
            return Err(GameError::InvalidPlayer(config.first_player));
        }
        Ok(Self {
            board: Board::with_size(config.board_size)?,
            rules: config.rules(),
            first_player: config.first_player,
            phase: Phase::Idle,
            history: Vec::new(),
            winning_line: None,
        })
    }

    /// Clear the board and hand the first turn out; restarts a finished game
    pub fn start(&mut self) {
        self.board = Board::with_size(self.board.size()).unwrap_or_default();
        self.history.clear();
        self.winning_line = None;
        self.phase = Phase::AwaitingMove(self.first_player);
        info!(size = self.board.size(), first = %self.first_player, "game started");
    }

    /// Play the side to move at (row, col)
    pub fn play(&mut self, row: i32, col: i32) -> Result<Phase, GameError> {
        let color = match self.phase {
            Phase::Idle => return Err(GameError::NotStarted),
            Phase::Won { .. } | Phase::Draw => return Err(GameError::GameOver),
            Phase::AwaitingMove(color) => color,
        };

        if !self.board.contains(row, col) {
            return Err(GameError::InvalidMove { row, col });
        }
        let pos = Pos::new(row as u8, col as u8);
        if !self.board.is_empty(pos) {
            return Err(GameError::Occupied { row, col });
        }

        let forbidden = self.rules.check(&mut self.board, pos, color);
        self.board.place_stone(pos, color);
        self.history.push((pos, color));
        debug!(%color, %pos, ply = self.history.len(), "stone placed");

        self.phase = if let Some(kind) = forbidden.kind {
            let winner = color.opponent();
            info!(%winner, %pos, %kind, "forbidden move ends the game");
            Phase::Won {
                winner,
                reason: WinReason::Forbidden(kind),
            }
        } else if self.rules.wins(&self.board, pos, color) {
            self.winning_line = winning_line(&self.board, pos, color);
            info!(winner = %color, %pos, "five in a row");
            Phase::Won {
                winner: color,
                reason: WinReason::FiveInRow,
            }
        } else if self.board.is_full() {
            info!(moves = self.history.len(), "board full, draw");
            Phase::Draw
        } else {
            Phase::AwaitingMove(color.opponent())
        };

        Ok(self.phase)
    }

    /// Let `engine` play the side to move.
    ///
    /// The engine must be configured with the session's rules, otherwise it
    /// could choose a cell this game forbids.
    pub fn play_ai(&mut self, engine: &mut Engine) -> Result<Phase, GameError> {
        let color = match self.phase {
            Phase::Idle => return Err(GameError::NotStarted),
            Phase::Won { .. } | Phase::Draw => return Err(GameError::GameOver),
            Phase::AwaitingMove(color) => color,
        };
        if engine.config().rules() != self.rules {
            return Err(GameError::RulesMismatch);
        }

        match engine.select_move(&self.board, color) {
            Some(pos) => self.play(pos.row as i32, pos.col as i32),
            None => {
                self.phase = Phase::Draw;
                Ok(self.phase)
            }
        }
    }

    /// Take back the last move; the side that made it is to move again.
    ///
    /// Returns the removed move, or `None` when nothing has been played.
    pub fn undo(&mut self) -> Option<(Pos, Stone)> {
        let undone = self.history.pop()?;

        // Simple undo: reset and replay
        let moves = std::mem::take(&mut self.history);
        self.board = Board::with_size(self.board.size()).unwrap_or_default();
        for &(pos, color) in &moves {
            self.board.place_stone(pos, color);
        }
        self.history = moves;
        self.winning_line = None;
        self.phase = Phase::AwaitingMove(undone.1);

        debug!(pos = %undone.0, color = %undone.1, "move undone");
        Some(undone)
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side to move, if the game is running
    pub fn current_player(&self) -> Option<Stone> {
        match self.phase {
            Phase::AwaitingMove(color) => Some(color),
            _ => None,
        }
    }

    /// Cells of the completed five after a `FiveInRow` win
    pub fn winning_line(&self) -> Option<&[Pos]> {
        self.winning_line.as_deref()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Moves played so far, oldest first
    #[inline]
    pub fn history(&self) -> &[(Pos, Stone)] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().map(|&(pos, _)| pos)
    }
}
