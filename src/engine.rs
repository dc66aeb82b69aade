//! Main AI engine: the move-selection cascade
//!
//! The engine tries an ordered list of strategies and plays the first move
//! any of them produces:
//!
//! 1. **Opening**: center, then fixed offsets, with a formation switch when
//!    the opponent mirrors around the center
//! 2. **Immediate win**: complete a five now
//! 3. **Immediate block**: take the cell the opponent would win on
//! 4. **Combination**: four-three, double four or double three
//! 5. **Safe chong four**: first cell making a four
//! 6. **Heuristic**: argmax of static, defensive, positional and VCT scores
//!
//! Every strategy skips cells that are forbidden for the side to move. When
//! no legal cell is left the engine plays a uniformly random empty cell, and
//! on a full board it reports a draw.
//!
//! # Example
//!
//! ```
//! use renju::{Board, Engine, Pos, Stone};
//!
//! let mut engine = Engine::new();
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.select_move_with_stats(&board, Stone::White);
//! println!("Best move: {:?} via {:?}", result.best_move, result.strategy);
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument, trace};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::{
    analyze_pattern, count_live_twos, evaluate_bagua_point, evaluate_defensive_value,
    evaluate_diagonal_threat, evaluate_forbidden_trap, score_position_advanced, PatternCounts,
};
use crate::rules::Rules;
use crate::search::ThreatSearcher;

/// Strategy that produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Opening,
    ImmediateWin,
    ImmediateBlock,
    Combination,
    SafeChongFour,
    Heuristic,
    /// No legal cell: random empty cell, or no move at all on a full board
    RandomFallback,
}

/// Result of a move selection with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Chosen move; `None` only when the board is full (draw)
    pub best_move: Option<Pos>,
    /// Score the producing strategy assigned to the move
    pub score: i32,
    pub strategy: Strategy,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl MoveResult {
    #[inline]
    fn found(pos: Pos, score: i32, strategy: Strategy, time_ms: u64) -> Self {
        Self {
            best_move: Some(pos),
            score,
            strategy,
            time_ms,
        }
    }

    /// Full board: nothing to play
    #[inline]
    fn draw(time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            strategy: Strategy::RandomFallback,
            time_ms,
        }
    }

    #[inline]
    pub fn is_draw(&self) -> bool {
        self.best_move.is_none()
    }
}

/// A strategy proposes a move and its score, or passes
type StrategyFn = fn(&mut Board, Stone, &EngineConfig) -> Option<(Pos, i32)>;

/// Strategies in priority order
const CASCADE: [(Strategy, StrategyFn); 6] = [
    (Strategy::Opening, opening_move),
    (Strategy::ImmediateWin, immediate_win),
    (Strategy::ImmediateBlock, immediate_block),
    (Strategy::Combination, combination_move),
    (Strategy::SafeChongFour, safe_chong_four),
    (Strategy::Heuristic, heuristic_move),
];

/// Diagonal "sword" formation around the center
const SWORD: [(i32, i32); 8] = [
    (-2, -2),
    (-1, -1),
    (1, 1),
    (2, 2),
    (-2, 2),
    (-1, 1),
    (1, -1),
    (2, -2),
];

/// "Swallow" formation around the center
const SWALLOW: [(i32, i32); 6] = [(-1, 0), (-2, -1), (-2, 1), (1, 0), (2, -1), (2, 1)];

/// Knight's-move points, then star points, then direct neighbours
const OPENING_OFFSETS: [(i32, i32); 16] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (0, -1),
    (0, 1),
    (1, 0),
];

/// Main AI engine
pub struct Engine {
    config: EngineConfig,
    rng: StdRng,
}

impl Engine {
    /// Engine with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with a custom configuration; seeds the random fallback from
    /// `config.seed` when present
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for `color`, `None` on a full board
    #[must_use]
    pub fn select_move(&mut self, board: &Board, color: Stone) -> Option<Pos> {
        self.select_move_with_stats(board, color).best_move
    }

    /// Run the cascade and report which strategy produced the move.
    ///
    /// The caller's board is never touched; strategies work on a scratch copy.
    #[instrument(skip(self, board), fields(stones = board.stone_count()))]
    pub fn select_move_with_stats(&mut self, board: &Board, color: Stone) -> MoveResult {
        let start = Instant::now();
        let mut scratch = board.clone();

        for (strategy, run) in CASCADE {
            if let Some((pos, score)) = run(&mut scratch, color, &self.config) {
                let time_ms = start.elapsed().as_millis() as u64;
                debug!(?strategy, %pos, score, time_ms, "move selected");
                return MoveResult::found(pos, score, strategy, time_ms);
            }
        }

        let empty: Vec<Pos> = scratch.empty_cells().collect();
        let time_ms = start.elapsed().as_millis() as u64;
        match empty.choose(&mut self.rng) {
            Some(&pos) => {
                debug!(%pos, candidates = empty.len(), "no legal cell, random fallback");
                MoveResult::found(pos, 0, Strategy::RandomFallback, time_ms)
            }
            None => {
                info!("board is full, no move available");
                MoveResult::draw(time_ms)
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// First move of `candidates` (offsets from the center) that is on the
/// board and legal
fn first_legal(
    board: &mut Board,
    color: Stone,
    config: &EngineConfig,
    candidates: &[(i32, i32)],
) -> Option<Pos> {
    let rules = config.rules();
    let center = board.center();
    candidates.iter().find_map(|&(dr, dc)| {
        let (r, c) = (center.row as i32 + dr, center.col as i32 + dc);
        if !board.contains(r, c) {
            return None;
        }
        let pos = Pos::new(r as u8, c as u8);
        rules.is_legal(board, pos, color).then_some(pos)
    })
}

/// Whether the opponent's stones mirror each other through the center
pub fn is_symmetric_opening(board: &Board, opponent: Stone) -> bool {
    let Some(stones) = board.stones(opponent) else {
        return false;
    };
    let center = board.center();
    let (cr, cc) = (center.row as i32, center.col as i32);

    let mut count = 0;
    let mut mirrored = 0;
    // The center is its own mirror image
    for pos in stones.iter_ones().filter(|&p| p != center) {
        count += 1;
        let (mr, mc) = (2 * cr - pos.row as i32, 2 * cc - pos.col as i32);
        if board.get_at(mr, mc) == Some(opponent) {
            mirrored += 1;
        }
    }

    count >= 2 && mirrored * 2 >= count
}

fn opening_move(board: &mut Board, color: Stone, config: &EngineConfig) -> Option<(Pos, i32)> {
    if board.stone_count() >= config.opening_plies {
        return None;
    }

    if let Some(pos) = first_legal(board, color, config, &[(0, 0)]) {
        return Some((pos, 0));
    }

    let pos = if is_symmetric_opening(board, color.opponent()) {
        debug!("symmetric opening, switching formation");
        first_legal(board, color, config, &SWORD)
            .or_else(|| first_legal(board, color, config, &SWALLOW))
    } else {
        first_legal(board, color, config, &OPENING_OFFSETS)
    };
    pos.map(|p| (p, evaluate_bagua_point(board, p, &config.weights)))
}

fn immediate_win(board: &mut Board, color: Stone, config: &EngineConfig) -> Option<(Pos, i32)> {
    let rules = config.rules();
    let candidates: Vec<Pos> = board.empty_cells().collect();
    candidates
        .into_iter()
        .find(|&pos| rules.wins(board, pos, color) && rules.is_legal(board, pos, color))
        .map(|pos| (pos, config.weights.window_five))
}

fn immediate_block(board: &mut Board, color: Stone, config: &EngineConfig) -> Option<(Pos, i32)> {
    let rules = config.rules();
    let opponent = color.opponent();
    let candidates: Vec<Pos> = board.empty_cells().collect();
    candidates
        .into_iter()
        .find(|&pos| rules.wins(board, pos, opponent) && rules.is_legal(board, pos, color))
        .map(|pos| (pos, config.weights.threat_l5))
}

/// Shape counts with the fours dropped when none of them can be completed
/// into a win under `rules`
fn effective_pattern(board: &mut Board, pos: Pos, color: Stone, rules: &Rules) -> PatternCounts {
    let mut counts = analyze_pattern(board, pos, color);
    if counts.fours() > 0 && !rules.makes_four(board, pos, color) {
        counts.live_fours = 0;
        counts.chong_fours = 0;
    }
    counts
}

/// Shapes the opponent cannot answer with a single stone
fn is_combination(counts: &PatternCounts) -> bool {
    counts.live_fours > 0
        || (counts.fours() > 0 && counts.live_threes > 0)
        || counts.chong_fours >= 2
        || counts.live_threes >= 2
}

fn combination_move(board: &mut Board, color: Stone, config: &EngineConfig) -> Option<(Pos, i32)> {
    let rules = config.rules();
    let w = &config.weights;
    let opponent = color.opponent();
    let candidates: Vec<Pos> = board.empty_cells().collect();

    let mut best: Option<(Pos, i32)> = None;
    for pos in candidates {
        let counts = effective_pattern(board, pos, color, &rules);
        if !is_combination(&counts) || !rules.is_legal(board, pos, color) {
            continue;
        }

        let score = w.patterns(&counts)
            + w.combination(&counts)
            + evaluate_diagonal_threat(board, pos, color) * w.diagonal_threat_unit
            + count_live_twos(board, pos, color) as i32 * w.live_two_unit
            + evaluate_forbidden_trap(board, pos, opponent, &rules, w);
        trace!(%pos, score, "combination candidate");

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((pos, score));
        }
    }
    best
}

fn safe_chong_four(board: &mut Board, color: Stone, config: &EngineConfig) -> Option<(Pos, i32)> {
    let rules = config.rules();
    let candidates: Vec<Pos> = board.empty_cells().collect();
    candidates
        .into_iter()
        .find(|&pos| {
            effective_pattern(board, pos, color, &rules).chong_fours > 0
                && rules.is_legal(board, pos, color)
        })
        .map(|pos| (pos, config.weights.chong_four))
}

/// Threat searcher for the heuristic step; only late in the game
fn late_game_searcher<'a>(board: &Board, config: &'a EngineConfig) -> Option<ThreatSearcher<'a>> {
    (board.stone_count() >= config.vct_min_stones)
        .then(|| ThreatSearcher::new(&config.weights, config.rules()).with_top_k(config.vct_top_k))
}

/// Heuristic value of `color` playing `pos`, with the threat sequence score
/// added when a searcher is given
fn candidate_score(
    board: &mut Board,
    pos: Pos,
    color: Stone,
    config: &EngineConfig,
    searcher: Option<&mut ThreatSearcher<'_>>,
) -> i32 {
    let rules = config.rules();
    let w = &config.weights;
    let mut score = score_position_advanced(board, pos, color, &rules, w)
        + evaluate_defensive_value(board, pos, color.opponent(), w)
        + evaluate_bagua_point(board, pos, w);

    if let Some(searcher) = searcher {
        let vct = searcher.evaluate_vct(board, pos, color, config.vct_depth);
        if vct > 0 {
            debug!(%pos, vct, "threat sequence");
        }
        score += vct;
    }
    score
}

fn heuristic_move(board: &mut Board, color: Stone, config: &EngineConfig) -> Option<(Pos, i32)> {
    let rules = config.rules();
    let mut searcher = late_game_searcher(board, config);
    let candidates: Vec<Pos> = board.empty_cells().collect();

    let mut best: Option<(Pos, i32)> = None;
    for pos in candidates {
        if !rules.is_legal(board, pos, color) {
            continue;
        }

        let score = candidate_score(board, pos, color, config, searcher.as_mut());
        trace!(%pos, score, "heuristic candidate");

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((pos, score));
        }
    }

    if let Some(searcher) = &searcher {
        trace!(nodes = searcher.nodes(), "threat search done");
    }
    best
}
