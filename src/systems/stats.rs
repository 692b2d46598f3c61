//! Stats systems - async load from the store and XP awards for finished puzzles.

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future};

use crate::messages::{PuzzleCompletedMsg, XpAwardedMsg};
use crate::resources::*;

pub fn start_stats_load(store: Res<StoreHandle>, mut load: ResMut<StatsLoad>) {
    load.0 = Some(store.spawn_load());
}

/// Finish the stats load. A failed load starts from empty stats and leaves the
/// store untouched for the rest of the session.
pub fn poll_stats_load(
    mut load: ResMut<StatsLoad>,
    mut stats: ResMut<PlayerStats>,
    mut ledger: ResMut<MilestoneLedger>,
) {
    let Some(task) = load.0.as_mut() else { return };
    let Some(result) = block_on(future::poll_once(task)) else { return };
    load.0 = None;

    match result {
        Ok(snapshot) => {
            info!(
                "Stats loaded: {} XP, {} games, {} milestones shown",
                snapshot.total_xp,
                snapshot.games_played,
                snapshot.reached_milestones.len()
            );
            ledger.shown.extend(snapshot.reached_milestones.iter().copied());
            stats.snapshot = snapshot;
        }
        Err(e) => {
            warn!("Failed to load stats, progress this session will not be saved: {e}");
            stats.load_failed = true;
        }
    }
    stats.loaded = true;
}

/// Apply finished puzzles to the stats and queue a save. Games that end before the load completes wait in a backlog.
pub fn award_xp_system(
    mut completed: MessageReader<PuzzleCompletedMsg>,
    mut backlog: Local<Vec<PuzzleCompletedMsg>>,
    mut stats: ResMut<PlayerStats>,
    store: Res<StoreHandle>,
    mut awarded: MessageWriter<XpAwardedMsg>,
) {
    backlog.extend(completed.read().cloned());
    if !stats.loaded || backlog.is_empty() {
        return;
    }

    let mut changed = false;
    for game in backlog.drain(..) {
        let Some(record) =
            stats.snapshot.record_game(game.won, game.difficulty, game.elapsed_secs, game.assistance_used)
        else {
            continue;
        };
        changed = true;
        debug!(
            won = game.won,
            difficulty = ?game.difficulty,
            xp = record.xp_gained,
            total = record.total_xp,
            "game recorded"
        );
        awarded.write(XpAwardedMsg {
            amount: record.xp_gained,
            previous_xp: record.previous_xp,
            total_xp: record.total_xp,
            new_best_time: record.new_best_time,
        });
    }

    if changed {
        store.save(&stats);
    }
}
