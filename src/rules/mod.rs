//! Game rules for renju-style five-in-a-row
//!
//! This module implements the rule set including:
//! - Win conditions (five in a row, exact five for the restricted player)
//! - Forbidden moves (long connection, double four, double three)
//!
//! Which player the forbidden-move rule applies to is a parameter of
//! [`Rules`], not a fixed convention.

pub mod forbidden;
pub mod win;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};

// Re-exports for convenient access
pub use forbidden::{classify, count_fours, ForbiddenKind, ForbiddenResult};
pub use win::{check_win, has_exact_five, line_length, longest_line, winning_line};

/// Rule set of a game: who, if anyone, is bound by the forbidden moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Player under the forbidden-move rule; `None` plays free gomoku
    pub restricted: Option<Stone>,
}

impl Default for Rules {
    fn default() -> Self {
        Self::renju()
    }
}

impl Rules {
    /// Standard renju: Black is restricted
    pub const fn renju() -> Self {
        Self {
            restricted: Some(Stone::Black),
        }
    }

    /// Free gomoku: nobody is restricted
    pub const fn free() -> Self {
        Self { restricted: None }
    }

    pub const fn restricting(color: Stone) -> Self {
        Self {
            restricted: Some(color),
        }
    }

    #[inline]
    pub fn is_restricted(&self, color: Stone) -> bool {
        color != Stone::Empty && self.restricted == Some(color)
    }

    /// Whether `color` playing (or having played) `pos` wins.
    ///
    /// The restricted player needs an exact five; anybody else wins with
    /// five or more.
    #[inline]
    pub fn wins(&self, board: &Board, pos: Pos, color: Stone) -> bool {
        if self.is_restricted(color) {
            has_exact_five(board, pos, color)
        } else {
            check_win(board, pos, color)
        }
    }

    /// Forbidden-move classification of `pos` for `color`.
    ///
    /// Always legal for an unrestricted player. Leaves the board unchanged.
    #[inline]
    pub fn check(&self, board: &mut Board, pos: Pos, color: Stone) -> ForbiddenResult {
        if self.is_restricted(color) {
            classify(board, pos, color)
        } else {
            ForbiddenResult::LEGAL
        }
    }

    /// Whether `color` playing `pos` leaves a cell that wins on the next move.
    ///
    /// A shape that looks like a four but can only be completed into an
    /// overline is no four for the restricted player.
    #[inline]
    pub fn makes_four(&self, board: &mut Board, pos: Pos, color: Stone) -> bool {
        count_fours(board, pos, color, self.is_restricted(color)) > 0
    }

    /// Empty and not forbidden for `color`
    #[inline]
    pub fn is_legal(&self, board: &mut Board, pos: Pos, color: Stone) -> bool {
        board.is_empty(pos) && !self.check(board, pos, color).is_forbidden()
    }
}
