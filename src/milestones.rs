//! Milestone decisions. One milestone fires per check; skipped ones surface on later checks.

use std::collections::BTreeSet;

use crate::data::ProgressionTables;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneHit {
    pub level: usize,
    pub message: String,
}

/// Stateless decision logic over the milestone table. The shown set lives with the store.
#[derive(Clone, Copy, Debug)]
pub struct MilestoneTracker<'a> {
    tables: &'a ProgressionTables,
}

impl<'a> MilestoneTracker<'a> {
    pub fn new(tables: &'a ProgressionTables) -> Self {
        Self { tables }
    }

    /// Milestone to announce after a level change, if any.
    /// Nothing fires unless `current > previous`.
    pub fn check(
        &self,
        previous: usize,
        current: usize,
        shown: &BTreeSet<usize>,
    ) -> Option<MilestoneHit> {
        if current <= previous {
            return None;
        }
        self.next_pending(current, shown)
    }

    /// Lowest reached milestone not yet shown, regardless of a level change.
    pub fn next_pending(&self, current: usize, shown: &BTreeSet<usize>) -> Option<MilestoneHit> {
        self.tables
            .milestones()
            .iter()
            .find(|(level, _)| current >= **level && !shown.contains(level))
            .map(|(&level, message)| MilestoneHit { level, message: message.clone() })
    }
}
