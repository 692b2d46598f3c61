//! Milestone systems - decide, announce and persist one milestone per check.

use bevy::prelude::*;

use crate::data::ProgressionTables;
use crate::flow::{CelebrationPhase, FlowEvent};
use crate::messages::{MilestoneRecheckMsg, MilestoneReachedMsg};
use crate::milestones::MilestoneTracker;
use crate::resources::*;
use crate::settings::ProgressionSettings;

/// Runs while in `MilestoneCheckPending`. The mark is saved with the rest of the
/// stats through the store writer; the decision never waits on it.
pub fn milestone_check_system(
    tables: Res<ProgressionTables>,
    settings: Res<ProgressionSettings>,
    current: Res<CurrentLevel>,
    store: Res<StoreHandle>,
    mut stats: ResMut<PlayerStats>,
    mut ledger: ResMut<MilestoneLedger>,
    mut reached: MessageWriter<MilestoneReachedMsg>,
    mut next_phase: ResMut<NextState<CelebrationPhase>>,
) {
    let pending = CelebrationPhase::MilestoneCheckPending;
    ledger.check_pending = false;
    let hit = if settings.show_milestones {
        let tracker = MilestoneTracker::new(&tables);
        match ledger.level_change {
            Some((previous, now)) => tracker.check(previous, now, &ledger.shown),
            None => tracker.next_pending(current.level_index(), &ledger.shown),
        }
    } else {
        None
    };

    let Some(hit) = hit else {
        next_phase.set(pending.advance(FlowEvent::NoMilestone));
        return;
    };

    info!("Milestone reached at level {}", hit.level);
    ledger.shown.insert(hit.level);
    if stats.snapshot.mark_milestone(hit.level) {
        store.save(&stats);
    }

    reached.write(MilestoneReachedMsg { level: hit.level, message: hit.message.clone() });
    ledger.active = Some(hit);
    next_phase.set(pending.advance(FlowEvent::MilestoneFound));
}

/// A re-check only starts from `Idle` once stats are loaded.
pub fn milestone_recheck_system(
    mut requests: MessageReader<MilestoneRecheckMsg>,
    stats: Res<PlayerStats>,
    phase: Res<State<CelebrationPhase>>,
    mut next_phase: ResMut<NextState<CelebrationPhase>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if !stats.loaded || !phase.get().is_idle() {
        debug!("milestone re-check skipped in {:?}", phase.get());
        return;
    }
    next_phase.set(CelebrationPhase::MilestoneCheckPending);
}
