//! Fixed-radius line windows and structural shape matching
//!
//! A [`LineWindow`] is the 9 cells along one direction centered on a move,
//! seen from one player's side. Shapes are short slices of [`Slot`]s that are
//! matched against the window at every alignment that puts one of the
//! shape's own-stone slots on the center cell.

use super::{Board, Direction, Pos, Stone};

/// Cells on each side of the center
pub const WINDOW_RADIUS: i32 = 4;
pub const WINDOW_LEN: usize = 2 * WINDOW_RADIUS as usize + 1;
const CENTER: usize = WINDOW_RADIUS as usize;

/// Content of a window cell relative to the player being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Own,
    Opponent,
    Empty,
    /// Off the board
    Edge,
}

/// One position of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The player's stone
    Own,
    /// An empty, on-board cell
    Empty,
    /// Opponent stone or the board edge
    Blocked,
}

impl Slot {
    #[inline]
    pub fn accepts(self, cell: Cell) -> bool {
        match self {
            Slot::Own => cell == Cell::Own,
            Slot::Empty => cell == Cell::Empty,
            Slot::Blocked => matches!(cell, Cell::Opponent | Cell::Edge),
        }
    }
}

/// A shape is a contiguous run of slots along a line
pub type Shape = &'static [Slot];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    cells: [Cell; WINDOW_LEN],
}

impl LineWindow {
    /// Read the window around `pos` along `dir` from `color`'s side.
    ///
    /// The center cell is always [`Cell::Own`]: the window describes the line
    /// as it would be after `color` plays at `pos`.
    pub fn extract(board: &Board, pos: Pos, color: Stone, dir: Direction) -> Self {
        let size = board.size();
        let mut cells = [Cell::Edge; WINDOW_LEN];
        for (i, cell) in cells.iter_mut().enumerate() {
            let k = i as i32 - WINDOW_RADIUS;
            if k == 0 {
                *cell = Cell::Own;
                continue;
            }
            *cell = match pos.offset(dir, k, size) {
                None => Cell::Edge,
                Some(p) => match board.get(p) {
                    Stone::Empty => Cell::Empty,
                    s if s == color => Cell::Own,
                    _ => Cell::Opponent,
                },
            };
        }
        Self { cells }
    }

    /// Cell at signed offset from the center (`Edge` beyond the radius)
    #[inline]
    pub fn at(&self, offset: i32) -> Cell {
        let idx = offset + WINDOW_RADIUS;
        if (0..WINDOW_LEN as i32).contains(&idx) {
            self.cells[idx as usize]
        } else {
            Cell::Edge
        }
    }

    /// Whether `shape` occurs in the window with one of its `Own` slots on
    /// the center cell.
    pub fn matches(&self, shape: &[Slot]) -> bool {
        let len = shape.len();
        shape.iter().enumerate().any(|(anchor, &slot)| {
            if slot != Slot::Own || anchor > CENTER {
                return false;
            }
            let start = CENTER - anchor;
            start + len <= WINDOW_LEN
                && shape
                    .iter()
                    .zip(&self.cells[start..start + len])
                    .all(|(s, &c)| s.accepts(c))
        })
    }

    /// Whether any of `shapes` matches
    #[inline]
    pub fn matches_any(&self, shapes: &[Shape]) -> bool {
        shapes.iter().any(|shape| self.matches(shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Slot::{Blocked as X, Empty as E, Own as P};

    #[test]
    fn test_center_is_own() {
        let board = Board::new();
        let w = LineWindow::extract(&board, Pos::new(7, 7), Stone::Black, Direction::Horizontal);
        assert_eq!(w.at(0), Cell::Own);
        assert_eq!(w.at(1), Cell::Empty);
        assert_eq!(w.at(5), Cell::Edge);
    }

    #[test]
    fn test_edge_cells() {
        let board = Board::new();
        let w = LineWindow::extract(&board, Pos::new(0, 2), Stone::White, Direction::Horizontal);
        assert_eq!(w.at(-2), Cell::Empty);
        assert_eq!(w.at(-3), Cell::Edge);
        assert!(X.accepts(w.at(-3)));
        assert!(!E.accepts(w.at(-3)));
    }

    #[test]
    fn test_match_requires_center_on_own_slot() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 8), Stone::Black);
        board.place_stone(Pos::new(7, 9), Stone::Black);
        let three: Shape = &[E, P, P, P, E];

        let w = LineWindow::extract(&board, Pos::new(7, 7), Stone::Black, Direction::Horizontal);
        assert!(w.matches(three));

        // Same stones seen from a cell that is not part of the run
        let w = LineWindow::extract(&board, Pos::new(7, 5), Stone::Black, Direction::Horizontal);
        assert!(!w.matches(three));
    }

    #[test]
    fn test_opponent_blocks() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 6), Stone::White);
        board.place_stone(Pos::new(7, 8), Stone::Black);
        board.place_stone(Pos::new(7, 9), Stone::Black);
        let w = LineWindow::extract(&board, Pos::new(7, 7), Stone::Black, Direction::Horizontal);
        assert!(!w.matches(&[E, P, P, P, E]));
        assert!(w.matches(&[X, P, P, P, E]));
    }
}
