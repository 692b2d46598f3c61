//! Constants - Tuning parameters for progression and the trail layout

// ============================================================================
// XP AWARDS
// ============================================================================

/// XP for any solved puzzle before the difficulty multiplier.
pub const BASE_PUZZLE_XP: u32 = 2;

/// Largest time bonus a single puzzle can earn.
pub const MAX_TIME_BONUS: u32 = 3;

/// Time bonus breakpoints in minutes, fastest tier first: [<3 → +3, <5 → +2, <8 → +1].
pub const EASY_BONUS_MINUTES: [f64; 3] = [3.0, 5.0, 8.0];
pub const MEDIUM_BONUS_MINUTES: [f64; 3] = [5.0, 8.0, 12.0];
pub const HARD_BONUS_MINUTES: [f64; 3] = [8.0, 12.0, 18.0];
pub const EXPERT_BONUS_MINUTES: [f64; 3] = [12.0, 18.0, 25.0];

// ============================================================================
// PROGRESS
// ============================================================================

/// Percentage reported once the last level is reached.
pub const MAX_PROGRESS_PERCENT: u8 = 100;

// ============================================================================
// TRAIL GEOMETRY
// ============================================================================

/// Height of the trail drawing area.
pub const TRAIL_HEIGHT: f32 = 120.0;

/// Horizontal padding on both sides of the trail.
pub const TRAIL_PAD_X: f32 = 16.0;

/// Baseline y of the zig-zag.
pub const TRAIL_BASE_Y: f32 = 70.0;

/// Zig-zag amplitude around the baseline.
pub const TRAIL_AMPLITUDE: f32 = 24.0;

/// Even nodes (except the start) sit this fraction of the amplitude below the baseline.
pub const TRAIL_EVEN_DROP: f32 = 0.22;

/// The second-to-last node only rises this fraction of the amplitude.
pub const TRAIL_PENULTIMATE_RISE: f32 = 0.45;

/// Polyline samples per full Bézier segment.
pub const TRAIL_SAMPLES_PER_SEGMENT: usize = 24;

/// Control points sit this fraction of the node spacing away from each endpoint.
pub const TRAIL_CONTROL_FRACTION: f32 = 0.35;

/// Usable width never drops below this, even in a tiny container.
pub const TRAIL_MIN_USABLE_WIDTH: f32 = 80.0;
