//! Bounded VCT (Victory by Continuous Threats) evaluation
//!
//! Rather than proving a win, the search scores how strongly a move starts a
//! forcing sequence:
//! - A live four is a near-certain win.
//! - A chong four forces the opponent onto its completion cell; from there
//!   the best follow-up threats are searched one ply shallower. If every
//!   completion cell is forbidden for the opponent the four cannot be
//!   answered at all.
//! - A four that can only be completed into an overline by the restricted
//!   player is no threat and is scored like any other shape.
//! - A live three earns a fixed bonus plus a discounted look at the same
//!   threat one ply shallower.
//!
//! Deeper results are discounted so shorter sequences rank first. Every
//! hypothetical stone goes through [`Board::with_stone`], so no branch can
//! leave the board changed.

use crate::board::{Board, Pos, Stone};
use crate::eval::{analyze_pattern, PatternCounts, Weights};
use crate::rules::Rules;

/// Follow-up threats examined per forced reply
pub const DEFAULT_TOP_K: usize = 5;

/// Threat sequence evaluator
pub struct ThreatSearcher<'a> {
    weights: &'a Weights,
    rules: Rules,
    /// Follow-up threats examined per forced reply
    top_k: usize,
    /// Node counter for statistics
    nodes: u64,
}

impl<'a> ThreatSearcher<'a> {
    pub fn new(weights: &'a Weights, rules: Rules) -> Self {
        Self {
            weights,
            rules,
            top_k: DEFAULT_TOP_K,
            nodes: 0,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Score of `player` opening a threat sequence at `pos`.
    ///
    /// Returns 0 when `depth <= 0` or when `pos` makes no threat.
    pub fn evaluate_vct(&mut self, board: &mut Board, pos: Pos, player: Stone, depth: i32) -> i32 {
        if depth <= 0 {
            return 0;
        }
        board.with_stone(pos, player, |b| self.vct_from_placed(b, pos, player, depth))
    }

    /// Same as [`evaluate_vct`](Self::evaluate_vct) with the stone already on `pos`
    fn vct_from_placed(&mut self, board: &mut Board, pos: Pos, player: Stone, depth: i32) -> i32 {
        if depth <= 0 {
            return 0;
        }
        self.nodes += 1;

        let w = self.weights;
        let counts = analyze_pattern(board, pos, player);

        if counts.fours() > 0 {
            let responses = find_forced_responses(board, player, &self.rules);
            // A four whose every completion overshoots five threatens nothing
            if !responses.is_empty() {
                return self.four_sequence(board, &counts, responses, player, depth);
            }
        }

        if counts.live_threes > 0 {
            let deeper = self.vct_from_placed(board, pos, player, depth - 1);
            w.vct_live_three + Weights::discount(deeper, w.vct_three_discount)
        } else {
            0
        }
    }

    /// Score of a four already on the board, given the cells that complete it
    fn four_sequence(
        &mut self,
        board: &mut Board,
        counts: &PatternCounts,
        responses: Vec<Pos>,
        player: Stone,
        depth: i32,
    ) -> i32 {
        let w = self.weights;
        if counts.live_fours > 0 {
            return w.vct_live_four;
        }

        let opponent = player.opponent();
        let rules = self.rules;
        let replies: Vec<Pos> = responses
            .into_iter()
            .filter(|&r| !rules.check(board, r, opponent).is_forbidden())
            .collect();
        if replies.is_empty() {
            return w.vct_unanswerable_four;
        }
        if depth == 1 {
            return 0;
        }

        let top_k = self.top_k;
        let mut best = 0;
        for reply in replies {
            let child = board.with_stone(reply, opponent, |b| {
                find_threatening_moves(b, player, &rules, top_k)
                    .into_iter()
                    .map(|threat| self.evaluate_vct(b, threat, player, depth - 1))
                    .max()
                    .unwrap_or(0)
            });
            best = best.max(child);
        }
        Weights::discount(best, w.vct_four_discount)
    }

    /// Nodes visited since creation
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

}

/// Convenience wrapper running a fresh [`ThreatSearcher`]
pub fn evaluate_vct(
    board: &mut Board,
    pos: Pos,
    player: Stone,
    depth: i32,
    rules: &Rules,
    weights: &Weights,
) -> i32 {
    ThreatSearcher::new(weights, *rules).evaluate_vct(board, pos, player, depth)
}

/// Empty cells where `player` would win on the next move; the opponent must
/// take one of them.
pub fn find_forced_responses(board: &Board, player: Stone, rules: &Rules) -> Vec<Pos> {
    board
        .empty_cells()
        .filter(|&p| rules.wins(board, p, player))
        .collect()
}

/// Legal cells where `player` makes a four or a live three, strongest first,
/// at most `top_k` of them.
///
/// Ranked by live fours, then chong fours, then live threes; ties keep
/// row-major order.
pub fn find_threatening_moves(board: &mut Board, player: Stone, rules: &Rules, top_k: usize) -> Vec<Pos> {
    let candidates: Vec<Pos> = board.empty_cells().collect();
    let mut threats: Vec<(Pos, i32)> = Vec::new();

    for pos in candidates {
        let counts = analyze_pattern(board, pos, player);
        if counts.is_threat() && !rules.check(board, pos, player).is_forbidden() {
            threats.push((pos, counts.threat_rank()));
        }
    }

    threats.sort_by(|a, b| b.1.cmp(&a.1));
    threats.into_iter().take(top_k).map(|(pos, _)| pos).collect()
}
