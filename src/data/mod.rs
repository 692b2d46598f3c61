//! Progression tables - levels, paths and milestones, validated once at construction.
//! A table that fails validation is never handed out.

mod levels;
mod milestones;
mod paths;

pub use levels::{LEVEL_ROWS, LevelRow};
pub use milestones::MILESTONE_LEVELS;
pub use paths::{PATH_ROWS, PathRow};

use std::collections::BTreeMap;

use bevy::color::{Color, Srgba};
use bevy::prelude::Resource;
use hashbrown::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::locale::{Locale, LocaleCatalog, MessageLookup};

// ============================================================================
// ERRORS
// ============================================================================

/// Table or catalog integrity violation. Fatal to the table being built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse message catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    #[error("message catalog root must be a JSON object")]
    CatalogShape,
    #[error("level table is empty")]
    EmptyLevelTable,
    #[error("first level must require 0 XP, found {xp}")]
    FirstThresholdNotZero { xp: u64 },
    #[error("level {level} requires {current} XP, not above the previous {previous}")]
    NonIncreasingThreshold { level: usize, previous: u64, current: u64 },
    #[error("path table is empty")]
    EmptyPathTable,
    #[error("duplicate path id '{id}'")]
    DuplicatePath { id: String },
    #[error("path '{path}' has an inverted range {first}..={last}")]
    InvertedRange { path: String, first: usize, last: usize },
    #[error("path '{path}' starts at level {found}, expected {expected}")]
    PathRangeGap { path: String, expected: usize, found: usize },
    #[error("paths cover {covered} levels but the table has {levels}")]
    PathCoverage { covered: usize, levels: usize },
    #[error("level {level} belongs to path '{found}' but lies in the range of '{expected}'")]
    LevelPathMismatch { level: usize, expected: String, found: String },
    #[error("level {level} has path-local index {found}, expected {expected}")]
    LocalIndexMismatch { level: usize, expected: usize, found: usize },
    #[error("level {level} has no owning path")]
    NoPathForLevel { level: usize },
    #[error("level {level} is outside the table of {levels} levels")]
    LevelOutOfRange { level: usize, levels: usize },
    #[error("milestone at level {level} is not a reachable level (table has {levels})")]
    MilestoneOutOfRange { level: usize, levels: usize },
    #[error("path '{path}' has an invalid color '{color}'")]
    InvalidColor { path: String, color: String },
}

// ============================================================================
// TABLE RECORDS
// ============================================================================

/// One level definition. The position in the table is the level index.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelThreshold {
    pub xp_required: u64,
    pub name: String,
    pub message: String,
    pub path_id: String,
    /// Index of this level inside its path (0 = first level of the path).
    pub path_local_index: usize,
}

/// Inclusive level-index range owned by a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelRange {
    pub first: usize,
    pub last: usize,
}

impl LevelRange {
    pub fn contains(&self, level: usize) -> bool {
        level >= self.first && level <= self.last
    }

    pub fn level_count(&self) -> usize {
        self.last + 1 - self.first
    }
}

/// One narrative path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub level_range: LevelRange,
    pub color: Color,
    pub color_hex: String,
    pub completion_message: String,
}

impl PathInfo {
    /// Build a path, parsing `color_hex` (`#RRGGBB`, `#RGB` or with alpha).
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        level_range: LevelRange,
        color_hex: &str,
        completion_message: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let id = id.into();
        let color = Srgba::hex(color_hex).map_err(|_| ConfigError::InvalidColor {
            path: id.clone(),
            color: color_hex.to_string(),
        })?;
        Ok(Self {
            id,
            name: name.into(),
            description: description.into(),
            level_range,
            color: Color::Srgba(color),
            color_hex: color_hex.to_string(),
            completion_message: completion_message.into(),
        })
    }
}

// ============================================================================
// PROGRESSION TABLES
// ============================================================================

/// Immutable, validated level/path/milestone tables for one locale.
#[derive(Resource, Clone, Debug)]
pub struct ProgressionTables {
    levels: Vec<LevelThreshold>,
    paths: Vec<PathInfo>,
    milestones: BTreeMap<usize, String>,
    level_label: String,
}

impl ProgressionTables {
    /// Built-in tables with text from a shipped catalog.
    pub fn builtin(locale: Locale) -> Result<Self, ConfigError> {
        let catalog = LocaleCatalog::builtin(locale)?;
        Self::build(&catalog)
    }

    /// Built-in tables with text resolved through `lookup`.
    pub fn build(lookup: &dyn MessageLookup) -> Result<Self, ConfigError> {
        let mut paths = Vec::with_capacity(PATH_ROWS.len());
        for row in PATH_ROWS {
            paths.push(PathInfo::new(
                row.id,
                lookup.text(&format!("paths.{}.name", row.id)),
                lookup.text(&format!("paths.{}.description", row.id)),
                LevelRange { first: row.first_level, last: row.last_level },
                row.color,
                lookup.text(&format!("paths.{}.completionMessage", row.id)),
            )?);
        }

        let levels = LEVEL_ROWS
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let first = PATH_ROWS
                    .iter()
                    .find(|p| p.id == row.path)
                    .map_or(index, |p| p.first_level);
                LevelThreshold {
                    xp_required: row.xp,
                    name: lookup.text(&format!("levels.{index}.name")),
                    message: lookup.text(&format!("levels.{index}.message")),
                    path_id: row.path.to_string(),
                    path_local_index: index.saturating_sub(first),
                }
            })
            .collect();

        let milestones = MILESTONE_LEVELS
            .iter()
            .map(|&level| (level, lookup.text(&format!("milestones.{level}"))))
            .collect();

        let mut tables = Self::from_parts(levels, paths, milestones)?;
        tables.level_label = lookup.text("labels.level");
        Ok(tables)
    }

    /// Assemble tables from caller-supplied parts. Runs the full validation pass.
    pub fn from_parts(
        levels: Vec<LevelThreshold>,
        paths: Vec<PathInfo>,
        milestones: BTreeMap<usize, String>,
    ) -> Result<Self, ConfigError> {
        validate(&levels, &paths, &milestones)?;
        debug!(
            levels = levels.len(),
            paths = paths.len(),
            milestones = milestones.len(),
            "progression tables validated"
        );
        Ok(Self { levels, paths, milestones, level_label: "Level".to_string() })
    }

    pub fn levels(&self) -> &[LevelThreshold] {
        &self.levels
    }

    pub fn paths(&self) -> &[PathInfo] {
        &self.paths
    }

    pub fn level(&self, index: usize) -> Option<&LevelThreshold> {
        self.levels.get(index)
    }

    /// Index of the highest level. Tables are never empty.
    pub fn max_level_index(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn milestones(&self) -> &BTreeMap<usize, String> {
        &self.milestones
    }

    pub fn milestone_message(&self, level: usize) -> Option<&str> {
        self.milestones.get(&level).map(String::as_str)
    }

    /// Milestone levels, ascending.
    pub fn milestone_levels(&self) -> Vec<usize> {
        self.milestones.keys().copied().collect()
    }

    /// Localized word used in `LevelInfo::display_name`.
    pub fn level_label(&self) -> &str {
        &self.level_label
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

fn validate(
    levels: &[LevelThreshold],
    paths: &[PathInfo],
    milestones: &BTreeMap<usize, String>,
) -> Result<(), ConfigError> {
    let first = levels.first().ok_or(ConfigError::EmptyLevelTable)?;
    if first.xp_required != 0 {
        return Err(ConfigError::FirstThresholdNotZero { xp: first.xp_required });
    }
    for (i, pair) in levels.windows(2).enumerate() {
        if pair[1].xp_required <= pair[0].xp_required {
            return Err(ConfigError::NonIncreasingThreshold {
                level: i + 1,
                previous: pair[0].xp_required,
                current: pair[1].xp_required,
            });
        }
    }

    if paths.is_empty() {
        return Err(ConfigError::EmptyPathTable);
    }
    let mut seen = HashSet::new();
    let mut expected = 0;
    for path in paths {
        if !seen.insert(path.id.as_str()) {
            return Err(ConfigError::DuplicatePath { id: path.id.clone() });
        }
        let range = path.level_range;
        if range.first > range.last {
            return Err(ConfigError::InvertedRange {
                path: path.id.clone(),
                first: range.first,
                last: range.last,
            });
        }
        if range.first != expected {
            return Err(ConfigError::PathRangeGap {
                path: path.id.clone(),
                expected,
                found: range.first,
            });
        }
        expected = range.last + 1;
    }
    if expected != levels.len() {
        return Err(ConfigError::PathCoverage { covered: expected, levels: levels.len() });
    }

    for (index, level) in levels.iter().enumerate() {
        let owner = paths
            .iter()
            .find(|p| p.level_range.contains(index))
            .ok_or(ConfigError::NoPathForLevel { level: index })?;
        if level.path_id != owner.id {
            return Err(ConfigError::LevelPathMismatch {
                level: index,
                expected: owner.id.clone(),
                found: level.path_id.clone(),
            });
        }
        let local = index - owner.level_range.first;
        if level.path_local_index != local {
            return Err(ConfigError::LocalIndexMismatch {
                level: index,
                expected: local,
                found: level.path_local_index,
            });
        }
    }

    if let Some(&bad) = milestones.keys().find(|&&k| k == 0 || k >= levels.len()) {
        return Err(ConfigError::MilestoneOutOfRange { level: bad, levels: levels.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(xp: u64, path: &str, local: usize) -> LevelThreshold {
        LevelThreshold {
            xp_required: xp,
            name: format!("L{xp}"),
            message: String::new(),
            path_id: path.to_string(),
            path_local_index: local,
        }
    }

    fn path(id: &str, first: usize, last: usize) -> PathInfo {
        PathInfo::new(id, id, "", LevelRange { first, last }, "#4285F4", "done").expect("valid color")
    }

    #[test]
    fn builtin_tables_validate_in_every_locale() {
        for locale in Locale::ALL {
            let tables = ProgressionTables::builtin(locale).expect("builtin tables");
            assert_eq!(tables.levels().len(), LEVEL_ROWS.len());
            assert_eq!(tables.paths().len(), 5);
            assert_eq!(tables.milestone_levels(), vec![5, 10, 15, 20]);
            assert!(tables.levels().iter().all(|l| !l.name.starts_with("levels.")));
        }
    }

    #[test]
    fn builtin_local_indices_follow_path_ranges() {
        let tables = ProgressionTables::builtin(Locale::En).expect("builtin tables");
        assert_eq!(tables.level(4).map(|l| l.path_local_index), Some(4));
        assert_eq!(tables.level(5).map(|l| l.path_local_index), Some(0));
        assert_eq!(tables.level(20).map(|l| l.path_id.as_str()), Some("transcendence"));
        assert_eq!(tables.level(21).map(|l| l.path_local_index), Some(1));
    }

    #[test]
    fn rejects_nonzero_first_threshold() {
        let err = ProgressionTables::from_parts(vec![level(1, "a", 0)], vec![path("a", 0, 0)], BTreeMap::new());
        assert!(matches!(err, Err(ConfigError::FirstThresholdNotZero { xp: 1 })));
    }

    #[test]
    fn rejects_non_increasing_thresholds() {
        let levels = vec![level(0, "a", 0), level(10, "a", 1), level(10, "a", 2)];
        let err = ProgressionTables::from_parts(levels, vec![path("a", 0, 2)], BTreeMap::new());
        assert!(matches!(err, Err(ConfigError::NonIncreasingThreshold { level: 2, .. })));
    }

    #[test]
    fn rejects_gaps_between_paths() {
        let levels = vec![level(0, "a", 0), level(5, "a", 1), level(9, "b", 0)];
        let err = ProgressionTables::from_parts(
            levels,
            vec![path("a", 0, 0), path("b", 2, 2)],
            BTreeMap::new(),
        );
        assert!(matches!(err, Err(ConfigError::PathRangeGap { expected: 1, found: 2, .. })));
    }

    #[test]
    fn rejects_paths_that_do_not_cover_the_table() {
        let levels = vec![level(0, "a", 0), level(5, "a", 1), level(9, "a", 2)];
        let err = ProgressionTables::from_parts(levels, vec![path("a", 0, 1)], BTreeMap::new());
        assert!(matches!(err, Err(ConfigError::PathCoverage { covered: 2, levels: 3 })));
    }

    #[test]
    fn rejects_level_in_foreign_path() {
        let levels = vec![level(0, "a", 0), level(5, "a", 1)];
        let err = ProgressionTables::from_parts(
            levels,
            vec![path("a", 0, 0), path("b", 1, 1)],
            BTreeMap::new(),
        );
        assert!(matches!(err, Err(ConfigError::LevelPathMismatch { level: 1, .. })));
    }

    #[test]
    fn rejects_inconsistent_local_index() {
        let levels = vec![level(0, "a", 0), level(5, "a", 0)];
        let err = ProgressionTables::from_parts(levels, vec![path("a", 0, 1)], BTreeMap::new());
        assert!(matches!(err, Err(ConfigError::LocalIndexMismatch { level: 1, expected: 1, found: 0 })));
    }

    #[test]
    fn rejects_duplicate_path_ids() {
        let levels = vec![level(0, "a", 0), level(5, "a", 0)];
        let err = ProgressionTables::from_parts(
            levels,
            vec![path("a", 0, 0), path("a", 1, 1)],
            BTreeMap::new(),
        );
        assert!(matches!(err, Err(ConfigError::DuplicatePath { .. })));
    }

    #[test]
    fn rejects_unreachable_milestones() {
        let levels = vec![level(0, "a", 0), level(5, "a", 1)];
        let milestones = BTreeMap::from([(2, "too far".to_string())]);
        let err = ProgressionTables::from_parts(levels, vec![path("a", 0, 1)], milestones);
        assert!(matches!(err, Err(ConfigError::MilestoneOutOfRange { level: 2, levels: 2 })));
    }

    #[test]
    fn rejects_bad_colors() {
        let err = PathInfo::new("a", "A", "", LevelRange { first: 0, last: 0 }, "teal", "");
        assert!(matches!(err, Err(ConfigError::InvalidColor { .. })));
    }
}
