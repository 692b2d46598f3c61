//! Celebration acknowledgements from the UI.

use bevy::prelude::*;

use crate::flow::CelebrationPhase;
use crate::messages::CelebrationAckMsg;
use crate::resources::MilestoneLedger;

pub fn celebration_ack_system(
    mut acks: MessageReader<CelebrationAckMsg>,
    phase: Res<State<CelebrationPhase>>,
    mut next_phase: ResMut<NextState<CelebrationPhase>>,
    mut ledger: ResMut<MilestoneLedger>,
) {
    // One ack per frame; the next phase isn't applied until the state transition runs.
    if acks.read().count() == 0 {
        return;
    }
    let now = *phase.get();
    let next = now.acknowledge(ledger.check_pending);
    if next == now {
        return;
    }
    if now == CelebrationPhase::MilestoneShown {
        ledger.active = None;
    }
    next_phase.set(next);
}
