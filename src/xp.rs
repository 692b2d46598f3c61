//! XP awards for completed puzzles.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn multiplier(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Minute breakpoints for the +3/+2/+1 time bonus tiers.
    pub fn bonus_minutes(self) -> [f64; 3] {
        match self {
            Difficulty::Easy => EASY_BONUS_MINUTES,
            Difficulty::Medium => MEDIUM_BONUS_MINUTES,
            Difficulty::Hard => HARD_BONUS_MINUTES,
            Difficulty::Expert => EXPERT_BONUS_MINUTES,
        }
    }

    pub fn base_xp(self) -> u32 {
        BASE_PUZZLE_XP * self.multiplier()
    }
}

/// 3, 2, 1 or 0 bonus points; a tier applies when the solve is strictly under its breakpoint.
pub fn time_bonus(difficulty: Difficulty, elapsed_secs: f64) -> u32 {
    let minutes = elapsed_secs / 60.0;
    difficulty
        .bonus_minutes()
        .iter()
        .position(|&limit| minutes < limit)
        .map_or(0, |tier| MAX_TIME_BONUS - tier as u32)
}

/// XP granted for one solved puzzle. Assisted solves earn nothing.
pub fn compute_xp_gain(difficulty: Difficulty, elapsed_secs: f64, assistance_used: bool) -> u32 {
    if assistance_used {
        return 0;
    }
    difficulty.base_xp() + time_bonus(difficulty, elapsed_secs)
}
