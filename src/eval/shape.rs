//! Directional shape analysis around a single move
//!
//! For each of the four directions the 9-cell window around the move is
//! matched against a fixed shape table. A direction contributes at most one
//! shape, the strongest one it matches:
//!
//! | Shape       | Patterns (`P` own, `_` empty, `X` opponent or edge) |
//! |-------------|------------------------------------------------------|
//! | live four   | `_PPPP_`                                             |
//! | chong four  | `XPPPP_` `_PPPPX` `P_PPP` `PP_PP` `PPP_P`            |
//! | live three  | `_PPP_` `_P_PP_` `_PP_P_`                            |
//! | dead three  | `XPPP_` `_PPPX`                                      |
//! | live two    | `_PP_` `_P_P_`                                       |
//!
//! The analysis is an approximation used for scoring. Legality is decided by
//! [`crate::rules::forbidden`].

use serde::Serialize;

use crate::board::{Board, Direction, LineWindow, Pos, Shape, Slot, Stone};

use Slot::{Blocked as X, Empty as E, Own as P};

const LIVE_FOURS: [Shape; 1] = [&[E, P, P, P, P, E]];
const CHONG_FOURS: [Shape; 5] = [
    &[X, P, P, P, P, E],
    &[E, P, P, P, P, X],
    &[P, E, P, P, P],
    &[P, P, E, P, P],
    &[P, P, P, E, P],
];
const LIVE_THREES: [Shape; 3] = [&[E, P, P, P, E], &[E, P, E, P, P, E], &[E, P, P, E, P, E]];
const DEAD_THREES: [Shape; 2] = [&[X, P, P, P, E], &[E, P, P, P, X]];
pub(crate) const LIVE_TWOS: [Shape; 2] = [&[E, P, P, E], &[E, P, E, P, E]];

/// Shape formed in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    LiveFour,
    ChongFour,
    LiveThree,
    DeadThree,
    LiveTwo,
}

/// Strongest shape `color` forms through `pos` along `dir`
pub fn classify_direction(board: &Board, pos: Pos, color: Stone, dir: Direction) -> Option<ShapeKind> {
    let window = LineWindow::extract(board, pos, color, dir);
    if window.matches_any(&LIVE_FOURS) {
        Some(ShapeKind::LiveFour)
    } else if window.matches_any(&CHONG_FOURS) {
        Some(ShapeKind::ChongFour)
    } else if window.matches_any(&LIVE_THREES) {
        Some(ShapeKind::LiveThree)
    } else if window.matches_any(&DEAD_THREES) {
        Some(ShapeKind::DeadThree)
    } else if window.matches_any(&LIVE_TWOS) {
        Some(ShapeKind::LiveTwo)
    } else {
        None
    }
}

/// Shape counts summed over the four directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatternCounts {
    pub live_fours: u8,
    pub chong_fours: u8,
    pub live_threes: u8,
    pub dead_threes: u8,
    pub live_twos: u8,
}

impl PatternCounts {
    /// Live and chong fours together
    #[inline]
    pub fn fours(&self) -> u8 {
        self.live_fours + self.chong_fours
    }

    /// Forms a four or a live three
    #[inline]
    pub fn is_threat(&self) -> bool {
        self.fours() > 0 || self.live_threes > 0
    }

    /// Ranking key of threatening moves: fours dominate threes
    #[inline]
    pub fn threat_rank(&self) -> i32 {
        self.live_fours as i32 * 100 + self.chong_fours as i32 * 10 + self.live_threes as i32
    }

    /// Urgency of these shapes when they belong to the opponent
    pub fn threat_level(&self) -> ThreatLevel {
        if self.live_fours > 0 {
            ThreatLevel::L5
        } else if self.chong_fours > 0 || self.live_threes > 0 {
            ThreatLevel::L4
        } else if self.live_twos >= 2 {
            ThreatLevel::L3
        } else if self.live_twos == 1 {
            ThreatLevel::L2
        } else {
            ThreatLevel::L1
        }
    }

    fn add(&mut self, kind: ShapeKind) {
        match kind {
            ShapeKind::LiveFour => self.live_fours += 1,
            ShapeKind::ChongFour => self.chong_fours += 1,
            ShapeKind::LiveThree => self.live_threes += 1,
            ShapeKind::DeadThree => self.dead_threes += 1,
            ShapeKind::LiveTwo => self.live_twos += 1,
        }
    }
}

/// Opponent threat urgency, `L5` most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ThreatLevel {
    /// Nothing to block
    L1,
    /// Single live two
    L2,
    /// Two or more live twos
    L3,
    /// Chong four or live three
    L4,
    /// Live four: must block
    L5,
}

/// Shapes `color` would form by playing `pos`.
///
/// `pos` is treated as holding `color` whatever it currently contains, so
/// the board is only read.
pub fn analyze_pattern(board: &Board, pos: Pos, color: Stone) -> PatternCounts {
    let mut counts = PatternCounts::default();
    for dir in Direction::ALL {
        if let Some(kind) = classify_direction(board, pos, color, dir) {
            counts.add(kind);
        }
    }
    counts
}
