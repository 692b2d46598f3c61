//! LevelInfo - everything the presentation layer needs for one XP value.

use bevy::prelude::Resource;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::data::{ConfigError, LevelThreshold, PathInfo, ProgressionTables};
use crate::resolve::is_last_level_in_path;

/// Immutable snapshot of a player's standing for a given XP total.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelInfo {
    /// XP the snapshot was computed for, clamped to zero.
    pub xp: u64,
    pub current_level_index: usize,
    pub level_data: LevelThreshold,
    pub next_level_data: Option<LevelThreshold>,
    pub current_path: PathInfo,
    pub is_last_level_in_path: bool,
    pub progress_percentage: u8,
    pub xp_to_next_level: u64,
    /// Set only when the next level opens a new path.
    pub milestone_message: Option<String>,
    pub path_completion_message: Option<String>,
    /// `"Level 3: Patient Observer"`
    pub display_name: String,
    /// `"Path of Insight (2/5)"`
    pub display_path: String,
}

impl LevelInfo {
    pub fn is_max_level(&self) -> bool {
        self.next_level_data.is_none()
    }
}

/// Pure `xp -> LevelInfo`. Same XP and tables always produce an equal snapshot.
pub fn compute_level_info(tables: &ProgressionTables, xp: i64) -> Result<LevelInfo, ConfigError> {
    let xp = xp.max(0);
    let level = tables.level_index_for_xp(xp);
    let level_data = tables
        .level(level)
        .cloned()
        .ok_or(ConfigError::LevelOutOfRange { level, levels: tables.levels().len() })?;
    let next_level_data = tables.level(level + 1).cloned();
    let path = tables.path_for_level(level)?;
    let is_last = is_last_level_in_path(level, path);
    let xp = xp as u64;

    let xp_to_next_level = next_level_data
        .as_ref()
        .map_or(0, |next| next.xp_required.saturating_sub(xp));
    let milestone_message = next_level_data
        .as_ref()
        .filter(|next| next.path_local_index == 0)
        .and_then(|_| tables.milestone_message(level + 1))
        .map(str::to_owned);
    let path_completion_message = is_last.then(|| path.completion_message.clone());

    let display_name = format!("{} {}: {}", tables.level_label(), level + 1, level_data.name);
    let display_path = format!(
        "{} ({}/{})",
        path.name,
        level_data.path_local_index + 1,
        path.level_range.level_count()
    );

    Ok(LevelInfo {
        xp,
        current_level_index: level,
        progress_percentage: tables.progress_percent(xp as i64, level),
        level_data,
        next_level_data,
        current_path: path.clone(),
        is_last_level_in_path: is_last,
        xp_to_next_level,
        milestone_message,
        path_completion_message,
        display_name,
        display_path,
    })
}

// ============================================================================
// MEMOIZATION
// ============================================================================

/// Caller-managed memo of `compute_level_info`, keyed by clamped XP.
/// Must be cleared whenever the tables are rebuilt.
#[derive(Resource, Default, Debug)]
pub struct LevelInfoCache {
    entries: HashMap<u64, LevelInfo>,
}

impl LevelInfoCache {
    pub fn get_or_compute(
        &mut self,
        tables: &ProgressionTables,
        xp: i64,
    ) -> Result<&LevelInfo, ConfigError> {
        match self.entries.entry(xp.max(0) as u64) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(compute_level_info(tables, xp)?)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ============================================================================
// HELPERS
// ============================================================================

pub fn has_leveled_up(previous: &LevelInfo, current: &LevelInfo) -> bool {
    current.current_level_index > previous.current_level_index
}

pub fn has_path_transition(previous: &LevelInfo, current: &LevelInfo) -> bool {
    previous.current_path.id != current.current_path.id
}

/// `"+5 XP"` for gains, `"0 XP"` otherwise.
pub fn format_xp_gain(amount: u32) -> String {
    if amount > 0 { format!("+{amount} XP") } else { format!("{amount} XP") }
}
