//! Win condition checking
//!
//! A move wins when it completes five or more stones of one colour in a
//! line. For the player under the forbidden-move rule only an exact five
//! counts; see [`Rules::wins`](super::Rules::wins).

use crate::board::{Board, Direction, Pos, Stone};

/// Length of the contiguous run of `color` through `pos` along `dir`.
///
/// `pos` itself always counts as one stone, whether or not it is occupied
/// yet, so the function answers "how long would the line be".
#[inline]
pub fn line_length(board: &Board, pos: Pos, color: Stone, dir: Direction) -> u32 {
    let size = board.size();
    let mut count = 1;
    for sign in [1, -1] {
        let mut k = 1;
        while let Some(p) = pos.offset(dir, sign * k, size) {
            if board.get(p) != color {
                break;
            }
            count += 1;
            k += 1;
        }
    }
    count
}

/// Longest run of `color` through `pos` over the four directions
#[inline]
pub fn longest_line(board: &Board, pos: Pos, color: Stone) -> u32 {
    Direction::ALL
        .iter()
        .map(|&dir| line_length(board, pos, color, dir))
        .max()
        .unwrap_or(1)
}

/// Five or more in a row through `pos` for `color`.
///
/// Only the four lines through `pos` are inspected; no allocation.
#[inline]
pub fn check_win(board: &Board, pos: Pos, color: Stone) -> bool {
    Direction::ALL
        .iter()
        .any(|&dir| line_length(board, pos, color, dir) >= 5)
}

/// Some direction through `pos` holds exactly five of `color`
#[inline]
pub fn has_exact_five(board: &Board, pos: Pos, color: Stone) -> bool {
    Direction::ALL
        .iter()
        .any(|&dir| line_length(board, pos, color, dir) == 5)
}

/// Cells of the first winning line through `pos`, ordered along the line
pub fn winning_line(board: &Board, pos: Pos, color: Stone) -> Option<Vec<Pos>> {
    let size = board.size();
    for dir in Direction::ALL {
        let mut line = vec![pos];

        let mut k = 1;
        while let Some(p) = pos.offset(dir, -k, size) {
            if board.get(p) != color {
                break;
            }
            line.insert(0, p);
            k += 1;
        }

        k = 1;
        while let Some(p) = pos.offset(dir, k, size) {
            if board.get(p) != color {
                break;
            }
            line.push(p);
            k += 1;
        }

        if line.len() >= 5 {
            return Some(line);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(board: &mut Board, row: u8, cols: std::ops::Range<u8>, color: Stone) {
        for c in cols {
            board.place_stone(Pos::new(row, c), color);
        }
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let mut board = Board::new();
        row_of(&mut board, 7, 0..5, Stone::Black);
        assert!(check_win(&board, Pos::new(7, 2), Stone::Black));
        assert!(!check_win(&board, Pos::new(7, 2), Stone::White));
    }

    #[test]
    fn test_five_in_row_vertical() {
        let mut board = Board::new();
        for r in 3..8 {
            board.place_stone(Pos::new(r, 9), Stone::White);
        }
        assert!(check_win(&board, Pos::new(5, 9), Stone::White));
    }

    #[test]
    fn test_five_in_row_diagonal() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(i, i), Stone::White);
        }
        assert!(check_win(&board, Pos::new(4, 4), Stone::White));
    }

    #[test]
    fn test_diagonal_sw_five() {
        let mut board = Board::new();
        for i in 0..5 {
            board.place_stone(Pos::new(4 + i, 8 - i), Stone::Black);
        }
        assert!(check_win(&board, Pos::new(6, 6), Stone::Black));
        let line = winning_line(&board, Pos::new(6, 6), Stone::Black).unwrap();
        assert_eq!(line.first(), Some(&Pos::new(4, 8)));
        assert_eq!(line.last(), Some(&Pos::new(8, 4)));
    }

    #[test]
    fn test_hypothetical_completion() {
        let mut board = Board::new();
        row_of(&mut board, 7, 3..7, Stone::Black);
        // (7,7) still empty: line_length counts it as the fifth stone
        assert!(check_win(&board, Pos::new(7, 7), Stone::Black));
        assert!(check_win(&board, Pos::new(7, 2), Stone::Black));
        assert!(!check_win(&board, Pos::new(7, 8), Stone::Black));
    }

    #[test]
    fn test_four_in_row_not_win() {
        let mut board = Board::new();
        row_of(&mut board, 7, 0..4, Stone::Black);
        assert!(!check_win(&board, Pos::new(7, 0), Stone::Black));
    }

    #[test]
    fn test_six_in_row_wins_but_not_exact() {
        let mut board = Board::new();
        row_of(&mut board, 7, 2..8, Stone::Black);
        assert!(check_win(&board, Pos::new(7, 4), Stone::Black));
        assert!(!has_exact_five(&board, Pos::new(7, 4), Stone::Black));
        assert_eq!(longest_line(&board, Pos::new(7, 4), Stone::Black), 6);
    }

    #[test]
    fn test_five_at_board_edge() {
        let mut board = Board::new();
        row_of(&mut board, 14, 10..15, Stone::White);
        assert!(check_win(&board, Pos::new(14, 14), Stone::White));
        assert!(has_exact_five(&board, Pos::new(14, 14), Stone::White));
    }

    #[test]
    fn test_blocked_line_breaks_run() {
        let mut board = Board::new();
        row_of(&mut board, 7, 0..2, Stone::Black);
        board.place_stone(Pos::new(7, 2), Stone::White);
        row_of(&mut board, 7, 3..6, Stone::Black);
        assert_eq!(line_length(&board, Pos::new(7, 4), Stone::Black, Direction::Horizontal), 3);
        assert!(winning_line(&board, Pos::new(7, 4), Stone::Black).is_none());
    }
}
