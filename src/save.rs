//! Player stats persistence - the stats snapshot and the store it lives in.
//! Snapshot format is camelCase JSON; missing fields from older saves take defaults.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::xp::{Difficulty, compute_xp_gain};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stats file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stats version {found} > supported {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("cannot determine stats directory")]
    NoStatsDir,
    #[error("store rejected the write")]
    Unavailable,
}

// ============================================================================
// STATS SNAPSHOT
// ============================================================================

const STATS_VERSION: u32 = 1;

/// Persisted player statistics. `None` best times mean "never solved".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsSnapshot {
    pub version: u32,
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub best_time_easy: Option<f64>,
    pub best_time_medium: Option<f64>,
    pub best_time_hard: Option<f64>,
    pub best_time_expert: Option<f64>,
    pub completed_easy: u32,
    pub completed_medium: u32,
    pub completed_hard: u32,
    pub completed_expert: u32,
    pub reached_milestones: Vec<usize>,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            version: STATS_VERSION,
            games_played: 0,
            games_won: 0,
            current_streak: 0,
            longest_streak: 0,
            total_xp: 0,
            best_time_easy: None,
            best_time_medium: None,
            best_time_hard: None,
            best_time_expert: None,
            completed_easy: 0,
            completed_medium: 0,
            completed_hard: 0,
            completed_expert: 0,
            reached_milestones: Vec::new(),
        }
    }
}

/// Outcome of one recorded game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameRecord {
    pub previous_xp: u64,
    pub total_xp: u64,
    pub xp_gained: u32,
    pub new_best_time: bool,
}

impl StatsSnapshot {
    pub fn best_time(&self, difficulty: Difficulty) -> Option<f64> {
        match difficulty {
            Difficulty::Easy => self.best_time_easy,
            Difficulty::Medium => self.best_time_medium,
            Difficulty::Hard => self.best_time_hard,
            Difficulty::Expert => self.best_time_expert,
        }
    }

    fn best_time_mut(&mut self, difficulty: Difficulty) -> &mut Option<f64> {
        match difficulty {
            Difficulty::Easy => &mut self.best_time_easy,
            Difficulty::Medium => &mut self.best_time_medium,
            Difficulty::Hard => &mut self.best_time_hard,
            Difficulty::Expert => &mut self.best_time_expert,
        }
    }

    pub fn completed(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.completed_easy,
            Difficulty::Medium => self.completed_medium,
            Difficulty::Hard => self.completed_hard,
            Difficulty::Expert => self.completed_expert,
        }
    }

    fn completed_mut(&mut self, difficulty: Difficulty) -> &mut u32 {
        match difficulty {
            Difficulty::Easy => &mut self.completed_easy,
            Difficulty::Medium => &mut self.completed_medium,
            Difficulty::Hard => &mut self.completed_hard,
            Difficulty::Expert => &mut self.completed_expert,
        }
    }

    pub fn shown_milestones(&self) -> BTreeSet<usize> {
        self.reached_milestones.iter().copied().collect()
    }

    /// Append `level` to the reached milestones. Returns false if it was already there.
    pub fn mark_milestone(&mut self, level: usize) -> bool {
        if self.reached_milestones.contains(&level) {
            return false;
        }
        self.reached_milestones.push(level);
        true
    }

    /// Apply one finished game. Assisted games and non-positive times leave the stats untouched.
    pub fn record_game(
        &mut self,
        won: bool,
        difficulty: Difficulty,
        elapsed_secs: f64,
        assistance_used: bool,
    ) -> Option<GameRecord> {
        if assistance_used || !(elapsed_secs > 0.0) {
            debug!(assistance_used, elapsed_secs, "game not recorded");
            return None;
        }

        let previous_xp = self.total_xp;
        let xp_gained = if won { compute_xp_gain(difficulty, elapsed_secs, false) } else { 0 };
        self.games_played += 1;

        let mut new_best_time = false;
        if won {
            self.games_won += 1;
            self.current_streak += 1;
            self.longest_streak = self.longest_streak.max(self.current_streak);
            self.total_xp += u64::from(xp_gained);
            *self.completed_mut(difficulty) += 1;

            let best = self.best_time_mut(difficulty);
            if best.is_none_or(|t| t <= 0.0 || elapsed_secs < t) {
                *best = Some(elapsed_secs);
                new_best_time = true;
            }
        } else {
            self.current_streak = 0;
        }

        Some(GameRecord { previous_xp, total_xp: self.total_xp, xp_gained, new_best_time })
    }
}

// ============================================================================
// STORE
// ============================================================================

/// Storage collaborator for player stats. Calls block; run them off the main thread.
pub trait ProgressStore: Send + Sync + 'static {
    fn load_stats(&self) -> Result<StatsSnapshot, StoreError>;

    fn save_stats(&self, stats: &StatsSnapshot) -> Result<(), StoreError>;

    /// Idempotent set-add of a shown milestone. Reloads and rewrites the record, so
    /// don't run it alongside other saves to the same store.
    fn mark_milestone_reached(&self, level: usize) -> Result<(), StoreError> {
        let mut stats = self.load_stats()?;
        if stats.mark_milestone(level) {
            self.save_stats(&stats)?;
            info!("Milestone at level {level} marked as reached");
        }
        Ok(())
    }
}

fn stats_dir() -> Option<PathBuf> {
    let home = std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .ok()?;
    let dir = PathBuf::from(home).join("Documents").join("SudokuProgression");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Stats kept as one JSON file.
#[derive(Clone, Debug)]
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `Documents/SudokuProgression/stats.json` under the user's home.
    pub fn default_location() -> Result<Self, StoreError> {
        stats_dir()
            .map(|dir| Self::new(dir.join("stats.json")))
            .ok_or(StoreError::NoStatsDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonStatsStore {
    /// A missing file is a fresh player.
    fn load_stats(&self) -> Result<StatsSnapshot, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StatsSnapshot::default()),
            Err(source) => {
                return Err(StoreError::Io { action: "read", path: self.path.clone(), source });
            }
        };
        let stats: StatsSnapshot = serde_json::from_str(&json)?;
        if stats.version > STATS_VERSION {
            return Err(StoreError::UnsupportedVersion { found: stats.version, supported: STATS_VERSION });
        }
        Ok(stats)
    }

    fn save_stats(&self, stats: &StatsSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(stats)?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            action: "write",
            path: self.path.clone(),
            source,
        })?;
        debug!("Stats saved to {}", self.path.display());
        Ok(())
    }
}

/// In-process store. `fail_writes` makes every save fail, for exercising degraded paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    stats: Mutex<StatsSnapshot>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new(stats: StatsSnapshot) -> Self {
        Self { stats: Mutex::new(stats), fail_writes: AtomicBool::new(false) }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ProgressStore for MemoryStore {
    fn load_stats(&self) -> Result<StatsSnapshot, StoreError> {
        Ok(self.snapshot())
    }

    fn save_stats(&self, stats: &StatsSnapshot) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable);
        }
        *self.stats.lock().unwrap_or_else(PoisonError::into_inner) = stats.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_saves_load_with_defaults() {
        let json = r#"{"gamesPlayed":4,"gamesWon":3,"currentStreak":1,"longestStreak":2,
            "bestTimeEasy":95.0,"bestTimeMedium":null}"#;
        let stats: StatsSnapshot = serde_json::from_str(json).expect("parse");
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.total_xp, 0);
        assert!(stats.reached_milestones.is_empty());
        assert_eq!(stats.best_time(Difficulty::Easy), Some(95.0));
        assert_eq!(stats.best_time(Difficulty::Medium), None);
        assert_eq!(stats.completed(Difficulty::Expert), 0);
        assert_eq!(stats.version, STATS_VERSION);
    }

    #[test]
    fn total_xp_uses_legacy_key() {
        let json = serde_json::to_value(StatsSnapshot { total_xp: 42, ..Default::default() })
            .expect("serialize");
        assert_eq!(json["totalXP"], 42);
        assert!(json["bestTimeHard"].is_null());
    }

    #[test]
    fn won_game_updates_counters_and_xp() {
        let mut stats = StatsSnapshot::default();
        let record = stats.record_game(true, Difficulty::Expert, 600.0, false).expect("recorded");
        assert_eq!(record.xp_gained, 11);
        assert_eq!(record.previous_xp, 0);
        assert_eq!(stats.total_xp, 11);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.completed_expert, 1);
        assert_eq!(stats.best_time_expert, Some(600.0));
        assert!(record.new_best_time);

        let slower = stats.record_game(true, Difficulty::Expert, 900.0, false).expect("recorded");
        assert!(!slower.new_best_time);
        assert_eq!(stats.best_time_expert, Some(600.0));
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn lost_game_resets_streak_without_xp() {
        let mut stats = StatsSnapshot { current_streak: 4, longest_streak: 4, ..Default::default() };
        let record = stats.record_game(false, Difficulty::Easy, 120.0, false).expect("recorded");
        assert_eq!(record.xp_gained, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 4);
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.best_time_easy, None);
    }

    #[test]
    fn assisted_or_zero_time_games_are_ignored() {
        let mut stats = StatsSnapshot::default();
        assert_eq!(stats.record_game(true, Difficulty::Hard, 300.0, true), None);
        assert_eq!(stats.record_game(true, Difficulty::Hard, 0.0, false), None);
        assert_eq!(stats, StatsSnapshot::default());
    }

    #[test]
    fn memory_store_marks_milestones_once() {
        let store = MemoryStore::default();
        store.mark_milestone_reached(5).expect("mark");
        store.mark_milestone_reached(5).expect("mark again");
        assert_eq!(store.snapshot().reached_milestones, vec![5]);

        store.set_fail_writes(true);
        assert!(matches!(store.mark_milestone_reached(10), Err(StoreError::Unavailable)));
        assert_eq!(store.snapshot().reached_milestones, vec![5]);
    }

    #[test]
    fn json_store_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!("sudoku_progression_stats_{}.json", std::process::id()));
        let store = JsonStatsStore::new(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(store.load_stats().expect("missing file"), StatsSnapshot::default());

        let mut stats = StatsSnapshot::default();
        stats.record_game(true, Difficulty::Medium, 200.0, false);
        store.save_stats(&stats).expect("save");
        store.mark_milestone_reached(5).expect("mark");

        let loaded = store.load_stats().expect("load");
        assert_eq!(loaded.total_xp, stats.total_xp);
        assert_eq!(loaded.reached_milestones, vec![5]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn json_store_rejects_future_versions() {
        let path = std::env::temp_dir().join(format!("sudoku_progression_future_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"version":99}"#).expect("write");
        let err = JsonStatsStore::new(&path).load_stats();
        assert!(matches!(err, Err(StoreError::UnsupportedVersion { found: 99, .. })));
        let _ = std::fs::remove_file(&path);
    }
}
