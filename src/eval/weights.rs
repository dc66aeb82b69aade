//! Score table for the evaluation functions
//!
//! Every constant the scorers use lives in [`Weights`] so the whole table can
//! be tuned from a config file. The defaults are the tuned values.

use serde::{Deserialize, Serialize};

use super::shape::{PatternCounts, ThreatLevel};

/// Declarative weight table consumed by [`crate::eval`] and [`crate::search`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    // Five-cell window scores (own / opponent stone counts, rest empty)
    /// Own five in a window
    pub window_five: i32,
    pub window_four: i32,
    pub window_three: i32,
    pub window_two: i32,
    pub window_one: i32,
    /// Opponent five; only reachable when win termination was skipped
    pub window_opp_five: i32,
    pub window_opp_four: i32,
    pub window_opp_three: i32,
    pub window_opp_two: i32,
    pub window_opp_one: i32,
    /// Own four with the fifth cell taken by the opponent
    pub window_blocked_four: i32,
    pub window_opp_blocked_four: i32,

    // Center control: `base - manhattan / falloff` per stone
    pub center_own_base: i32,
    pub center_own_falloff: i32,
    pub center_opp_base: i32,
    pub center_opp_falloff: i32,

    // Single shapes formed by a move
    pub live_four: i32,
    pub chong_four: i32,
    pub live_three: i32,
    pub dead_three: i32,
    pub live_two: i32,

    // Combinations
    /// A four plus a live three
    pub four_three: i32,
    pub double_chong_four: i32,
    pub double_live_three: i32,
    /// Subtracted when a restricted player builds several threes and fours at once
    pub forbidden_risk: i32,

    // Defensive value per opponent threat level
    pub threat_l5: i32,
    pub threat_l4: i32,
    pub threat_l3: i32,
    pub threat_l2: i32,
    /// Blocking cell that also builds an own three or four
    pub attack_while_defending: i32,
    /// Blocking cell cutting three or more development lines
    pub multi_line_three: i32,
    pub multi_line_two: i32,
    /// Blocking cell in the middle of an opponent threat path
    pub critical_node: i32,

    pub bagua: i32,

    // Forbidden traps for a restricted opponent
    pub trap_double_three: i32,
    pub trap_long_connection: i32,
    pub trap_double_four: i32,
    /// The trapping move is itself a threat
    pub trap_forcing: i32,

    // Combination search extras
    pub diagonal_threat_unit: i32,
    pub live_two_unit: i32,

    // Threat sequence search
    pub vct_live_four: i32,
    /// Chong four the opponent cannot answer
    pub vct_unanswerable_four: i32,
    pub vct_live_three: i32,
    /// Percentage kept per ply after a chong four
    pub vct_four_discount: i32,
    /// Percentage kept per ply after a live three
    pub vct_three_discount: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            window_five: 1_000_000,
            window_four: 50_000,
            window_three: 5_000,
            window_two: 500,
            window_one: 50,
            window_opp_five: 800_000,
            window_opp_four: 100_000,
            window_opp_three: 10_000,
            window_opp_two: 1_000,
            window_opp_one: 100,
            window_blocked_four: 1_000,
            window_opp_blocked_four: 2_000,

            center_own_base: 7,
            center_own_falloff: 2,
            center_opp_base: 3,
            center_opp_falloff: 4,

            live_four: 100_000,
            chong_four: 10_000,
            live_three: 5_000,
            dead_three: 500,
            live_two: 100,

            four_three: 50_000,
            double_chong_four: 40_000,
            double_live_three: 20_000,
            forbidden_risk: 30_000,

            threat_l5: 99_999,
            threat_l4: 5_000,
            threat_l3: 300,
            threat_l2: 50,
            attack_while_defending: 15_000,
            multi_line_three: 8_000,
            multi_line_two: 3_000,
            critical_node: 2_000,

            bagua: 300,

            trap_double_three: 5_000,
            trap_long_connection: 8_000,
            trap_double_four: 12_000,
            trap_forcing: 10_000,

            diagonal_threat_unit: 200,
            live_two_unit: 300,

            vct_live_four: 100_000,
            vct_unanswerable_four: 90_000,
            vct_live_three: 5_000,
            vct_four_discount: 90,
            vct_three_discount: 80,
        }
    }
}

impl Weights {
    /// Defensive weight of an opponent threat level
    #[inline]
    pub fn threat(&self, level: ThreatLevel) -> i32 {
        match level {
            ThreatLevel::L5 => self.threat_l5,
            ThreatLevel::L4 => self.threat_l4,
            ThreatLevel::L3 => self.threat_l3,
            ThreatLevel::L2 => self.threat_l2,
            ThreatLevel::L1 => 0,
        }
    }

    /// Weighted sum of the single shapes in `counts`
    #[inline]
    pub fn patterns(&self, counts: &PatternCounts) -> i32 {
        counts.live_fours as i32 * self.live_four
            + counts.chong_fours as i32 * self.chong_four
            + counts.live_threes as i32 * self.live_three
            + counts.dead_threes as i32 * self.dead_three
            + counts.live_twos as i32 * self.live_two
    }

    /// Bonus for shape combinations that the opponent cannot answer with one stone
    #[inline]
    pub fn combination(&self, counts: &PatternCounts) -> i32 {
        let mut bonus = 0;
        if counts.fours() > 0 && counts.live_threes > 0 {
            bonus += self.four_three;
        }
        if counts.chong_fours >= 2 {
            bonus += self.double_chong_four;
        }
        if counts.live_threes >= 2 {
            bonus += self.double_live_three;
        }
        bonus
    }

    /// Apply a percentage discount
    #[inline]
    pub(crate) fn discount(score: i32, percent: i32) -> i32 {
        score * percent / 100
    }
}
