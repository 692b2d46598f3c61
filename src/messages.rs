//! ECS Messages - Inputs from the host UI and outputs for it to present.

use bevy::prelude::*;

use crate::locale::Locale;
use crate::xp::Difficulty;

// ============================================================================
// INPUTS (host UI -> progression)
// ============================================================================

/// A puzzle ended. Losses still count as played games.
#[derive(Message, Clone, Debug)]
pub struct PuzzleCompletedMsg {
    pub won: bool,
    pub difficulty: Difficulty,
    pub elapsed_secs: f64,
    pub assistance_used: bool,
}

/// The UI finished presenting the current level-up or milestone reveal.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct CelebrationAckMsg;

/// Ask for another milestone check, e.g. when the progression screen reopens.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct MilestoneRecheckMsg;

/// The trail container was laid out with a new width.
#[derive(Message, Clone, Copy, Debug)]
pub struct TrailResizedMsg {
    pub width: f32,
}

/// Switch text to another locale. Tables are rebuilt.
#[derive(Message, Clone, Copy, Debug)]
pub struct SetLocaleMsg(pub Locale);

// ============================================================================
// OUTPUTS (progression -> host UI)
// ============================================================================

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct XpAwardedMsg {
    pub amount: u32,
    pub previous_xp: u64,
    pub total_xp: u64,
    pub new_best_time: bool,
}

#[derive(Message, Clone, Debug, PartialEq)]
pub struct LevelUpMsg {
    pub previous_level: usize,
    pub current_level: usize,
    pub path_changed: bool,
    pub display_name: String,
}

#[derive(Message, Clone, Debug, PartialEq)]
pub struct MilestoneReachedMsg {
    pub level: usize,
    pub message: String,
}
