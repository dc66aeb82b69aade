//! Forbidden move rules (renju restrictions)
//!
//! The restricted player may not play:
//! - a long connection: six or more stones in a row
//! - a double four: one move making fours in two directions
//! - a double three: one move making live threes in two directions
//!
//! Exception: a move that completes an exact five is always allowed, even if
//! it also forms one of the shapes above.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, LineWindow, Pos, Shape, Slot, Stone};

use super::win::{has_exact_five, line_length, longest_line};

use Slot::{Empty as E, Own as P};

/// Live three shapes, matched with the new stone on any `P` slot.
/// Off-board cells never count as open.
const LIVE_THREES: [Shape; 3] = [
    &[E, P, P, P, E],
    &[E, P, E, P, P, E],
    &[E, P, P, E, P, E],
];

/// Kind of forbidden move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForbiddenKind {
    LongConnection,
    DoubleThree,
    DoubleFour,
}

impl std::fmt::Display for ForbiddenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ForbiddenKind::LongConnection => "long connection",
            ForbiddenKind::DoubleThree => "double three",
            ForbiddenKind::DoubleFour => "double four",
        };
        f.write_str(name)
    }
}

/// Outcome of a forbidden-move check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ForbiddenResult {
    /// `None` when the move is legal
    pub kind: Option<ForbiddenKind>,
}

impl ForbiddenResult {
    pub const LEGAL: ForbiddenResult = ForbiddenResult { kind: None };

    #[inline]
    pub const fn forbidden(kind: ForbiddenKind) -> Self {
        Self { kind: Some(kind) }
    }

    #[inline]
    pub const fn is_forbidden(&self) -> bool {
        self.kind.is_some()
    }
}

/// Classify the move `pos` for `color` as if `color` were restricted.
///
/// The stone is placed tentatively and removed again before returning;
/// the board is left exactly as it was.
pub fn classify(board: &mut Board, pos: Pos, color: Stone) -> ForbiddenResult {
    board.with_stone(pos, color, |b| classify_placed(b, pos, color))
}

/// Classification with the stone already on the board
fn classify_placed(board: &Board, pos: Pos, color: Stone) -> ForbiddenResult {
    // Win exemption overrides every forbidden shape
    if has_exact_five(board, pos, color) {
        return ForbiddenResult::LEGAL;
    }

    if longest_line(board, pos, color) > 5 {
        return ForbiddenResult::forbidden(ForbiddenKind::LongConnection);
    }

    let mut fours = 0u8;
    let mut threes = 0u8;
    for dir in Direction::ALL {
        if makes_four(board, pos, color, dir, true) {
            fours += 1;
        } else if makes_live_three(board, pos, color, dir) {
            threes += 1;
        }
    }

    if fours >= 2 {
        ForbiddenResult::forbidden(ForbiddenKind::DoubleFour)
    } else if threes >= 2 {
        ForbiddenResult::forbidden(ForbiddenKind::DoubleThree)
    } else {
        ForbiddenResult::LEGAL
    }
}

/// Whether the stone at `pos` is part of a four along `dir`: some empty cell
/// within reach would turn the line through `pos` into a five (exactly five
/// when `exact_five` is set).
fn makes_four(board: &Board, pos: Pos, color: Stone, dir: Direction, exact_five: bool) -> bool {
    let size = board.size();
    for sign in [1, -1] {
        for k in 1..=4 {
            let Some(cell) = pos.offset(dir, sign * k, size) else {
                break;
            };
            match board.get(cell) {
                s if s == color => continue,
                Stone::Empty => {
                    // Every cell between pos and `cell` is ours, so the run
                    // through `cell` also runs through pos
                    let len = line_length(board, cell, color, dir);
                    if len == 5 || (!exact_five && len > 5) {
                        return true;
                    }
                    break;
                }
                _ => break,
            }
        }
    }
    false
}

/// Whether the stone at `pos` forms a live three along `dir`
fn makes_live_three(board: &Board, pos: Pos, color: Stone, dir: Direction) -> bool {
    LineWindow::extract(board, pos, color, dir).matches_any(&LIVE_THREES)
}

/// Number of directions in which playing `pos` makes a four.
///
/// With `exact_five` a completion that would overshoot to six or more does
/// not count, which is how fours look to the restricted player. Leaves the
/// board unchanged.
pub fn count_fours(board: &mut Board, pos: Pos, color: Stone, exact_five: bool) -> usize {
    board.with_stone(pos, color, |b| {
        Direction::ALL
            .iter()
            .filter(|&&dir| makes_four(b, pos, color, dir, exact_five))
            .count()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_all(board: &mut Board, cells: &[(u8, u8)], color: Stone) {
        for &(r, c) in cells {
            board.place_stone(Pos::new(r, c), color);
        }
    }

    #[test]
    fn test_empty_board_legal() {
        let mut board = Board::new();
        assert_eq!(classify(&mut board, Pos::new(7, 7), Stone::Black), ForbiddenResult::LEGAL);
    }

    #[test]
    fn test_exact_five_not_forbidden() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 7), (7, 8), (7, 9), (7, 10)], Stone::Black);
        assert!(!classify(&mut board, Pos::new(7, 6), Stone::Black).is_forbidden());
        assert!(!classify(&mut board, Pos::new(7, 11), Stone::Black).is_forbidden());
    }

    #[test]
    fn test_overline_is_long_connection() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 7), (7, 8), (7, 9), (7, 10), (7, 12)], Stone::Black);
        let result = classify(&mut board, Pos::new(7, 11), Stone::Black);
        assert_eq!(result.kind, Some(ForbiddenKind::LongConnection));

        let mut board = Board::new();
        place_all(&mut board, &[(7, 5), (7, 7), (7, 8), (7, 9), (7, 10)], Stone::Black);
        let result = classify(&mut board, Pos::new(7, 6), Stone::Black);
        assert_eq!(result.kind, Some(ForbiddenKind::LongConnection));
    }

    #[test]
    fn test_five_exempts_other_shapes() {
        let mut board = Board::new();
        // Horizontal: four waiting for (7,7)
        place_all(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6)], Stone::Black);
        // Vertical and diagonal open twos through (7,7)
        place_all(&mut board, &[(8, 7), (9, 7), (8, 8), (9, 9)], Stone::Black);
        assert!(!classify(&mut board, Pos::new(7, 7), Stone::Black).is_forbidden());
    }

    #[test]
    fn test_double_three_cross() {
        let mut board = Board::new();
        //     col: 6 7 8
        // row 6:   . B .
        // row 7:   B _ B
        // row 8:   . B .
        place_all(&mut board, &[(7, 6), (7, 8), (6, 7), (8, 7)], Stone::Black);
        let result = classify(&mut board, Pos::new(7, 7), Stone::Black);
        assert_eq!(result.kind, Some(ForbiddenKind::DoubleThree));
    }

    #[test]
    fn test_double_three_diagonals() {
        let mut board = Board::new();
        place_all(&mut board, &[(6, 6), (8, 8), (6, 8), (8, 6)], Stone::Black);
        let result = classify(&mut board, Pos::new(7, 7), Stone::Black);
        assert_eq!(result.kind, Some(ForbiddenKind::DoubleThree));
    }

    #[test]
    fn test_broken_three_counts() {
        let mut board = Board::new();
        // Horizontal _ B B _ [x] _  and vertical _ B [x] B _
        place_all(&mut board, &[(7, 4), (7, 5), (6, 7), (8, 7)], Stone::Black);
        let result = classify(&mut board, Pos::new(7, 7), Stone::Black);
        assert_eq!(result.kind, Some(ForbiddenKind::DoubleThree));
    }

    #[test]
    fn test_single_three_legal() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 6), (7, 8)], Stone::Black);
        assert!(!classify(&mut board, Pos::new(7, 7), Stone::Black).is_forbidden());
    }

    #[test]
    fn test_blocked_three_not_live() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 6), (7, 8), (6, 7), (8, 7)], Stone::Black);
        board.place_stone(Pos::new(7, 5), Stone::White);
        assert!(!classify(&mut board, Pos::new(7, 7), Stone::Black).is_forbidden());
    }

    #[test]
    fn test_edge_closes_three() {
        let mut board = Board::new();
        // Row 0 vertical three touching the top edge: [edge] B B B _
        place_all(&mut board, &[(0, 7), (2, 7)], Stone::Black);
        place_all(&mut board, &[(1, 6), (1, 8)], Stone::Black);
        // Horizontal through (1,7) is a live three, vertical is edge-closed
        assert!(!classify(&mut board, Pos::new(1, 7), Stone::Black).is_forbidden());
    }

    #[test]
    fn test_double_four() {
        let mut board = Board::new();
        // Horizontal B B B _ and vertical B B B _ meeting at (7,7), both closed on one side
        place_all(&mut board, &[(7, 4), (7, 5), (7, 6)], Stone::Black);
        place_all(&mut board, &[(4, 7), (5, 7), (6, 7)], Stone::Black);
        board.place_stone(Pos::new(7, 3), Stone::White);
        board.place_stone(Pos::new(3, 7), Stone::White);
        let result = classify(&mut board, Pos::new(7, 7), Stone::Black);
        assert_eq!(result.kind, Some(ForbiddenKind::DoubleFour));
    }

    #[test]
    fn test_double_four_takes_precedence_over_double_three() {
        let mut board = Board::new();
        // Two broken fours plus two open twos becoming threes
        place_all(&mut board, &[(7, 3), (7, 4), (7, 6)], Stone::Black);
        place_all(&mut board, &[(3, 7), (4, 7), (6, 7)], Stone::Black);
        place_all(&mut board, &[(6, 6), (8, 8), (6, 8), (8, 6)], Stone::Black);
        let result = classify(&mut board, Pos::new(7, 7), Stone::Black);
        assert_eq!(result.kind, Some(ForbiddenKind::DoubleFour));
    }

    #[test]
    fn test_four_three_is_legal() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 4), (7, 5), (7, 6)], Stone::Black);
        board.place_stone(Pos::new(7, 3), Stone::White);
        place_all(&mut board, &[(6, 7), (8, 7)], Stone::Black);
        assert!(!classify(&mut board, Pos::new(7, 7), Stone::Black).is_forbidden());
    }

    #[test]
    fn test_classify_leaves_board_unchanged() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 6), (7, 8), (6, 7), (8, 7)], Stone::Black);
        let before = board.clone();
        let first = classify(&mut board, Pos::new(7, 7), Stone::Black);
        let second = classify(&mut board, Pos::new(7, 7), Stone::Black);
        assert_eq!(first, second);
        assert_eq!(board, before);
    }

    #[test]
    fn test_count_fours() {
        let mut board = Board::new();
        place_all(&mut board, &[(7, 4), (7, 5), (7, 6)], Stone::White);
        assert_eq!(count_fours(&mut board, Pos::new(7, 7), Stone::White, true), 1);
        assert_eq!(count_fours(&mut board, Pos::new(0, 0), Stone::White, true), 0);
    }

    #[test]
    fn test_count_fours_overline_completion() {
        let mut board = Board::new();
        // X X _ X X X after (7,5): the gap makes six, never five
        place_all(&mut board, &[(7, 1), (7, 2), (7, 4), (7, 6)], Stone::Black);
        let before = board.clone();
        assert_eq!(count_fours(&mut board, Pos::new(7, 5), Stone::Black, true), 0);
        assert_eq!(count_fours(&mut board, Pos::new(7, 5), Stone::Black, false), 1);
        assert_eq!(board, before);
    }
}
