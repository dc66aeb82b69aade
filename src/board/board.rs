//! Board structure with the scoped tentative-placement primitive

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::GameError;

/// Game board: one bitboard per colour on an `size x size` grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    /// Empty 15x15 board
    pub fn new() -> Self {
        Self {
            size: BOARD_SIZE as u8,
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Empty board of the given size (5..=16)
    pub fn with_size(size: usize) -> Result<Self, GameError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(GameError::InvalidBoardSize(size));
        }
        Ok(Self {
            size: size as u8,
            black: Bitboard::new(),
            white: Bitboard::new(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether (row, col) lies on this board
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.size as i32 && col >= 0 && col < self.size as i32
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Get stone at signed coordinates; `None` off the board
    #[inline]
    pub fn get_at(&self, row: i32, col: i32) -> Option<Stone> {
        self.contains(row, col)
            .then(|| self.get(Pos::new(row as u8, col as u8)))
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone, overwriting whatever was there
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        self.remove_stone(pos);
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Run `f` with `stone` tentatively placed at `pos`.
    ///
    /// The cell is restored to its previous content before returning, so
    /// `f` may return early from anywhere without leaking the placement.
    /// Nested calls restore in LIFO order.
    pub fn with_stone<R>(&mut self, pos: Pos, stone: Stone, f: impl FnOnce(&mut Board) -> R) -> R {
        let previous = self.get(pos);
        self.place_stone(pos, stone);
        let result = f(self);
        self.place_stone(pos, previous);
        result
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.size() * self.size()
    }

    /// Center cell (rounded towards the top-left on even sizes)
    #[inline]
    pub fn center(&self) -> Pos {
        let c = (self.size / 2) as u8;
        Pos::new(c, c)
    }

    /// All cells in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size).flat_map(move |r| (0..size).map(move |c| Pos::new(r, c)))
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(move |&p| self.is_empty(p))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size {
            write!(f, "{:>3}", c)?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{:>3}", r)?;
            for c in 0..self.size {
                write!(f, "{:>3}", self.get(Pos::new(r, c)).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
