//! Heuristic evaluation of board positions and candidate moves
//!
//! This module provides the scorers the move selector combines:
//! - Static board evaluation over every five-cell window
//! - Shape-weighted scoring of a single candidate move
//! - Defensive value of taking a cell away from the opponent
//! - Positional bonuses (center control, bagua points)
//! - Forbidden traps against a restricted opponent

use crate::board::{Board, Direction, LineWindow, Pos, Stone};
use crate::rules::{classify, ForbiddenKind, Rules};

use super::shape::{analyze_pattern, ThreatLevel, LIVE_TWOS};
use super::weights::Weights;

/// Length of a scoring window
const WINDOW: i32 = 5;

/// Knight's-move offsets from the center
const BAGUA_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Score one five-cell window from `player`'s side.
///
/// Windows holding stones of both colours only score when one side has four.
#[must_use]
pub fn evaluate_window(window: &[Stone; 5], player: Stone, w: &Weights) -> i32 {
    let opponent = player.opponent();
    let own = window.iter().filter(|&&s| s == player).count();
    let opp = window.iter().filter(|&&s| s == opponent).count();
    let empty = window.len() - own - opp;

    let mut score = match (own, empty) {
        (5, _) => w.window_five,
        (4, 1) => w.window_four,
        (3, 2) => w.window_three,
        (2, 3) => w.window_two,
        (1, 4) => w.window_one,
        _ => 0,
    };

    score -= match (opp, empty) {
        (5, _) => w.window_opp_five,
        (4, 1) => w.window_opp_four,
        (3, 2) => w.window_opp_three,
        (2, 3) => w.window_opp_two,
        (1, 4) => w.window_opp_one,
        _ => 0,
    };

    match (own, opp) {
        (4, 1) => score += w.window_blocked_four,
        (1, 4) => score -= w.window_opp_blocked_four,
        _ => {}
    }

    score
}

/// Static evaluation of the whole board for `player`.
///
/// Sums [`evaluate_window`] over every five-cell window in the four
/// directions, plus a center-distance bonus per stone.
#[must_use]
pub fn score_position(board: &Board, player: Stone, w: &Weights) -> i32 {
    let size = board.size();
    let mut score = evaluate_positions(board, player, w);

    for start in board.positions() {
        for dir in Direction::ALL {
            if start.offset(dir, WINDOW - 1, size).is_none() {
                continue;
            }
            let mut window = [Stone::Empty; 5];
            for (k, cell) in window.iter_mut().enumerate() {
                if let Some(p) = start.offset(dir, k as i32, size) {
                    *cell = board.get(p);
                }
            }
            score += evaluate_window(&window, player, w);
        }
    }

    score
}

/// Center control: own stones gain, opponent stones cost, both shrinking
/// with Manhattan distance from the center.
fn evaluate_positions(board: &Board, player: Stone, w: &Weights) -> i32 {
    let center = board.center();
    let mut score = 0;

    if let Some(stones) = board.stones(player) {
        for pos in stones.iter_ones() {
            score += w.center_own_base - pos.manhattan(center) / w.center_own_falloff.max(1);
        }
    }
    if let Some(stones) = board.stones(player.opponent()) {
        for pos in stones.iter_ones() {
            score -= w.center_opp_base - pos.manhattan(center) / w.center_opp_falloff.max(1);
        }
    }

    score
}

/// Full evaluation of `player` playing `pos`.
///
/// Board evaluation after the move, plus weighted shapes and combination
/// bonuses. A restricted player building two or more threes and fours at
/// once is penalised: the follow-up is likely to be forbidden for them.
#[must_use]
pub fn score_position_advanced(
    board: &mut Board,
    pos: Pos,
    player: Stone,
    rules: &Rules,
    w: &Weights,
) -> i32 {
    let counts = analyze_pattern(board, pos, player);
    let static_score = board.with_stone(pos, player, |b| score_position(b, player, w));

    let mut score = static_score + w.patterns(&counts) + w.combination(&counts);

    let near_threats = counts.live_threes + counts.dead_threes + counts.chong_fours;
    if rules.is_restricted(player) && near_threats >= 2 {
        score -= w.forbidden_risk;
    }

    score
}

/// Value of occupying `pos` to deny it to `opponent`.
///
/// The base is the weight of the opponent's threat level at `pos`. Urgent
/// threats (level 4 and up) earn extra for cutting several opponent lines at
/// once and for building an own threat on the same cell. Landing in the
/// middle of an opponent threat path earns a further bonus.
#[must_use]
pub fn evaluate_defensive_value(board: &Board, pos: Pos, opponent: Stone, w: &Weights) -> i32 {
    let me = opponent.opponent();
    let theirs = analyze_pattern(board, pos, opponent);
    let level = theirs.threat_level();

    let mut score = w.threat(level);

    if level >= ThreatLevel::L4 {
        score += match blocked_development_lines(board, pos, opponent) {
            n if n >= 3 => w.multi_line_three,
            2 => w.multi_line_two,
            _ => 0,
        };

        let mine = analyze_pattern(board, pos, me);
        if mine.live_threes > 0 || mine.chong_fours > 0 {
            score += w.attack_while_defending;
        }
    }

    score + critical_node_bonus(board, pos, opponent, w)
}

/// Directions in which `pos` sits on an opponent line with room to grow
fn blocked_development_lines(board: &Board, pos: Pos, opponent: Stone) -> usize {
    Direction::ALL
        .iter()
        .filter(|&&dir| blocks_development_line(board, pos, dir, opponent))
        .count()
}

fn blocks_development_line(board: &Board, pos: Pos, dir: Direction, opponent: Stone) -> bool {
    let size = board.size();
    let mut has_opponent = false;
    let mut potential = 0;

    for sign in [1, -1] {
        for k in 1..=4 {
            let Some(p) = pos.offset(dir, sign * k, size) else {
                break;
            };
            match board.get(p) {
                Stone::Empty => potential += 1,
                s if s == opponent => {
                    has_opponent = true;
                    potential += 1;
                }
                _ => break,
            }
        }
    }

    has_opponent && potential >= 3
}

/// Cells along `dir` through `pos` that `player` could still use: up to
/// `max_len` cells each side, stopping at the other colour or the edge.
/// Ordered along the line, `pos` included.
pub fn threat_path(board: &Board, pos: Pos, dir: Direction, player: Stone, max_len: i32) -> Vec<Pos> {
    let size = board.size();
    let usable = |p: Pos| {
        let s = board.get(p);
        s == player || s == Stone::Empty
    };

    let mut path = Vec::new();
    for k in (1..=max_len).rev() {
        match pos.offset(dir, -k, size) {
            Some(p) if usable(p) => path.push(p),
            // Anything beyond a blocker is unreachable
            _ => path.clear(),
        }
    }
    path.push(pos);
    for k in 1..=max_len {
        match pos.offset(dir, k, size) {
            Some(p) if usable(p) => path.push(p),
            _ => break,
        }
    }
    path
}

/// Whether `pos` lies in the middle 30%..70% of `path`
pub fn is_critical_node(path: &[Pos], pos: Pos) -> bool {
    if path.is_empty() {
        return false;
    }
    let len = path.len();
    let start = len * 3 / 10;
    let end = (len * 7 / 10).min(len - 1);
    path[start..=end].contains(&pos)
}

fn critical_node_bonus(board: &Board, pos: Pos, opponent: Stone, w: &Weights) -> i32 {
    Direction::ALL
        .iter()
        .filter(|&&dir| {
            let path = threat_path(board, pos, dir, opponent, WINDOW);
            let stones = path.iter().filter(|&&p| board.get(p) == opponent).count();
            stones >= 3 && is_critical_node(&path, pos)
        })
        .count() as i32
        * w.critical_node
}

/// Bonus for the knight's-move points around the center
#[must_use]
pub fn evaluate_bagua_point(board: &Board, pos: Pos, w: &Weights) -> i32 {
    let center = board.center();
    let dr = pos.row as i32 - center.row as i32;
    let dc = pos.col as i32 - center.col as i32;
    if BAGUA_OFFSETS.contains(&(dr, dc)) {
        w.bagua
    } else {
        0
    }
}

/// Bonus for playing `pos` when it turns nearby empty cells into forbidden
/// points for a restricted `opponent`.
///
/// Every empty cell within two rows and columns is classified for the
/// opponent with our stone on `pos`. A move that is itself a threat scores
/// extra per trap: the opponent may be forced to answer into it.
#[must_use]
pub fn evaluate_forbidden_trap(
    board: &mut Board,
    pos: Pos,
    opponent: Stone,
    rules: &Rules,
    w: &Weights,
) -> i32 {
    if !rules.is_restricted(opponent) {
        return 0;
    }
    let me = opponent.opponent();
    let own = analyze_pattern(board, pos, me);
    let forcing = own.live_threes > 0 || own.chong_fours > 0;

    board.with_stone(pos, me, |b| {
        let mut score = 0;
        for dr in -2..=2 {
            for dc in -2..=2 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (r, c) = (pos.row as i32 + dr, pos.col as i32 + dc);
                if b.get_at(r, c) != Some(Stone::Empty) {
                    continue;
                }
                let Some(kind) = classify(b, Pos::new(r as u8, c as u8), opponent).kind else {
                    continue;
                };
                score += match kind {
                    ForbiddenKind::DoubleThree => w.trap_double_three,
                    ForbiddenKind::LongConnection => w.trap_long_connection,
                    ForbiddenKind::DoubleFour => w.trap_double_four,
                };
                if forcing {
                    score += w.trap_forcing;
                }
            }
        }
        score
    })
}

/// Small bonus for open lines on the two diagonals: 3 per live three,
/// 1 per live two
#[must_use]
pub fn evaluate_diagonal_threat(board: &Board, pos: Pos, player: Stone) -> i32 {
    let size = board.size();
    let mut score = 0;

    for dir in Direction::ALL.into_iter().filter(|d| d.is_diagonal()) {
        let mut count = 1;
        let mut open_ends = 0;
        for sign in [1, -1] {
            for k in 1..=4 {
                let Some(p) = pos.offset(dir, sign * k, size) else {
                    break;
                };
                match board.get(p) {
                    s if s == player => count += 1,
                    Stone::Empty => {
                        open_ends += 1;
                        break;
                    }
                    _ => break,
                }
            }
        }

        score += match (count, open_ends) {
            (3, 2) => 3,
            (2, 2) => 1,
            _ => 0,
        };
    }

    score
}

/// Number of directions in which `player` playing `pos` forms an open two
#[must_use]
pub fn count_live_twos(board: &Board, pos: Pos, player: Stone) -> usize {
    Direction::ALL
        .iter()
        .filter(|&&dir| LineWindow::extract(board, pos, player, dir).matches_any(&LIVE_TWOS))
        .count()
}
