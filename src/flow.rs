//! Celebration flow - sequences level-up and milestone reveals.
//! The engine decides transitions; the UI decides when to acknowledge.

use bevy::prelude::States;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CelebrationPhase {
    #[default]
    Idle,
    LevelUpPending,
    LevelUpShown,
    MilestoneCheckPending,
    MilestoneShown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// A completed puzzle raised the level index.
    LevelUp,
    /// A completed puzzle awarded XP without a level change.
    NoLevelUp,
    /// The UI finished presenting the current reveal.
    Acknowledged,
    /// Milestone check ran and chose a milestone to show.
    MilestoneFound,
    /// Milestone check ran and found nothing to show.
    NoMilestone,
}

impl CelebrationPhase {
    /// Next phase for `event`. Events that don't apply leave the phase unchanged.
    pub fn advance(self, event: FlowEvent) -> CelebrationPhase {
        use CelebrationPhase::*;
        use FlowEvent::*;
        match (self, event) {
            (Idle, LevelUp) => LevelUpPending,
            (LevelUpPending, Acknowledged) => LevelUpShown,
            (LevelUpShown, Acknowledged) => MilestoneCheckPending,
            (MilestoneCheckPending, MilestoneFound) => MilestoneShown,
            (MilestoneCheckPending, NoMilestone) => Idle,
            (MilestoneShown, Acknowledged) => Idle,
            (phase, _) => phase,
        }
    }

    /// `Acknowledged`, except that a dismissed milestone goes back to the check
    /// while a level-up that arrived during the reveal is still unchecked.
    pub fn acknowledge(self, check_pending: bool) -> CelebrationPhase {
        match self {
            CelebrationPhase::MilestoneShown if check_pending => CelebrationPhase::MilestoneCheckPending,
            phase => phase.advance(FlowEvent::Acknowledged),
        }
    }

    pub fn is_idle(self) -> bool {
        self == CelebrationPhase::Idle
    }
}
