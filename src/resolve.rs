//! Level and path resolution over validated tables.

use crate::constants::MAX_PROGRESS_PERCENT;
use crate::data::{ConfigError, PathInfo, ProgressionTables};

impl ProgressionTables {
    /// Highest level whose threshold is at or below `xp`. Negative XP resolves to level 0.
    pub fn level_index_for_xp(&self, xp: i64) -> usize {
        let xp = xp.max(0) as u64;
        // Thresholds strictly increase and levels[0] is 0, so this is always >= 1.
        self.levels().partition_point(|l| l.xp_required <= xp).saturating_sub(1)
    }

    pub fn xp_threshold_for_level(&self, level: usize) -> Result<u64, ConfigError> {
        self.level(level)
            .map(|l| l.xp_required)
            .ok_or(ConfigError::LevelOutOfRange { level, levels: self.levels().len() })
    }

    /// Whole-percent progress from `level`'s threshold toward the next one, in `0..=100`.
    /// The last level always reports 100.
    pub fn progress_percent(&self, xp: i64, level: usize) -> u8 {
        let (Some(current), Some(next)) = (self.level(level), self.level(level + 1)) else {
            return MAX_PROGRESS_PERCENT;
        };
        let span = next.xp_required.saturating_sub(current.xp_required).max(1) as f64;
        let gained = (xp as f64) - current.xp_required as f64;
        (100.0 * gained / span).round().clamp(0.0, MAX_PROGRESS_PERCENT as f64) as u8
    }

    pub fn path_for_level(&self, level: usize) -> Result<&PathInfo, ConfigError> {
        self.paths()
            .iter()
            .find(|p| p.level_range.contains(level))
            .ok_or(ConfigError::NoPathForLevel { level })
    }

    /// Index of `path` within the path table, if it belongs to these tables.
    pub fn path_position(&self, path: &PathInfo) -> Option<usize> {
        self.paths().iter().position(|p| p.id == path.id)
    }
}

pub fn is_last_level_in_path(level: usize, path: &PathInfo) -> bool {
    level == path.level_range.last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    fn tables() -> ProgressionTables {
        ProgressionTables::builtin(Locale::En).expect("builtin tables")
    }

    #[test]
    fn negative_and_zero_xp_resolve_to_first_level() {
        let t = tables();
        assert_eq!(t.level_index_for_xp(-500), 0);
        assert_eq!(t.level_index_for_xp(0), 0);
        assert_eq!(t.level_index_for_xp(4), 0);
        assert_eq!(t.level_index_for_xp(5), 1);
    }

    #[test]
    fn every_threshold_is_an_exact_boundary() {
        let t = tables();
        for (i, level) in t.levels().iter().enumerate() {
            let xp = level.xp_required as i64;
            assert_eq!(t.level_index_for_xp(xp), i);
            if i > 0 {
                assert_eq!(t.level_index_for_xp(xp - 1), i - 1);
            }
        }
    }

    #[test]
    fn xp_beyond_table_clamps_to_last_level() {
        let t = tables();
        assert_eq!(t.level_index_for_xp(i64::MAX), t.max_level_index());
        assert_eq!(t.progress_percent(i64::MAX, t.max_level_index()), 100);
    }

    #[test]
    fn threshold_lookup_fails_out_of_bounds() {
        let t = tables();
        assert_eq!(t.xp_threshold_for_level(2).ok(), Some(15));
        assert!(matches!(
            t.xp_threshold_for_level(t.levels().len()),
            Err(ConfigError::LevelOutOfRange { .. })
        ));
    }

    #[test]
    fn progress_rounds_and_clamps() {
        let t = tables();
        // Level 2 spans 15..30.
        assert_eq!(t.progress_percent(20, 2), 33);
        assert_eq!(t.progress_percent(15, 2), 0);
        assert_eq!(t.progress_percent(29, 2), 93);
        assert_eq!(t.progress_percent(10, 2), 0);
        assert_eq!(t.progress_percent(400, 2), 100);
    }

    #[test]
    fn paths_resolve_by_range() {
        let t = tables();
        assert_eq!(t.path_for_level(0).map(|p| p.id.as_str()).ok(), Some("fundamentals"));
        assert_eq!(t.path_for_level(9).map(|p| p.id.as_str()).ok(), Some("insight"));
        assert_eq!(t.path_for_level(72).map(|p| p.id.as_str()).ok(), Some("transcendence"));
        assert!(matches!(t.path_for_level(73), Err(ConfigError::NoPathForLevel { level: 73 })));

        let insight = t.path_for_level(5).expect("insight");
        assert!(is_last_level_in_path(9, insight));
        assert!(!is_last_level_in_path(8, insight));
        assert_eq!(t.path_position(insight), Some(1));
    }
}
