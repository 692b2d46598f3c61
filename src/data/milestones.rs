//! Levels that fire a one-time congratulation. Text lives under `milestones.<level>`.

/// One milestone per path entry after the first. Ascending.
pub const MILESTONE_LEVELS: &[usize] = &[5, 10, 15, 20];
