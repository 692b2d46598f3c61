//! Level systems - keep the current LevelInfo and trail span in step with XP.

use bevy::prelude::*;

use crate::data::ProgressionTables;
use crate::flow::{CelebrationPhase, FlowEvent};
use crate::level_info::{LevelInfo, LevelInfoCache, has_leveled_up, has_path_transition};
use crate::messages::{LevelUpMsg, SetLocaleMsg, XpAwardedMsg};
use crate::resources::*;
use crate::settings::ProgressionSettings;
use crate::trail::level_to_units;

fn xp_key(xp: u64) -> i64 {
    i64::try_from(xp).unwrap_or(i64::MAX)
}

fn level_info(cache: &mut LevelInfoCache, tables: &ProgressionTables, xp: u64) -> Option<LevelInfo> {
    match cache.get_or_compute(tables, xp_key(xp)) {
        Ok(info) => Some(info.clone()),
        Err(e) => {
            error!("Level lookup failed for {xp} XP: {e}");
            None
        }
    }
}

fn set_trail_span(trail: &mut TrailView, tables: &ProgressionTables, previous: usize, current: usize) {
    let milestones = tables.milestone_levels();
    trail.previous_units = level_to_units(previous, &milestones);
    trail.current_units = level_to_units(current, &milestones);
}

/// First LevelInfo once stats have loaded.
pub fn sync_level_on_load(
    tables: Res<ProgressionTables>,
    stats: Res<PlayerStats>,
    mut cache: ResMut<LevelInfoCache>,
    mut current: ResMut<CurrentLevel>,
    mut trail: ResMut<TrailView>,
) {
    if !stats.loaded || current.info.is_some() {
        return;
    }
    let Some(info) = level_info(&mut cache, &tables, stats.snapshot.total_xp) else { return };
    let level = info.current_level_index;
    current.previous_level = level;
    current.info = Some(info);
    set_trail_span(&mut trail, &tables, level, level);
}

/// Recompute the level after each award and start the celebration on a level-up.
pub fn level_tracking_system(
    mut awarded: MessageReader<XpAwardedMsg>,
    tables: Res<ProgressionTables>,
    settings: Res<ProgressionSettings>,
    phase: Res<State<CelebrationPhase>>,
    mut next_phase: ResMut<NextState<CelebrationPhase>>,
    mut cache: ResMut<LevelInfoCache>,
    mut current: ResMut<CurrentLevel>,
    mut ledger: ResMut<MilestoneLedger>,
    mut trail: ResMut<TrailView>,
    mut level_ups: MessageWriter<LevelUpMsg>,
) {
    let mut flow = *phase.get();
    for award in awarded.read() {
        let Some(before) = level_info(&mut cache, &tables, award.previous_xp) else { continue };
        let Some(after) = level_info(&mut cache, &tables, award.total_xp) else { continue };

        if has_leveled_up(&before, &after) {
            info!(
                "Level up: {} -> {} ({})",
                before.current_level_index, after.current_level_index, after.display_name
            );
            level_ups.write(LevelUpMsg {
                previous_level: before.current_level_index,
                current_level: after.current_level_index,
                path_changed: has_path_transition(&before, &after),
                display_name: after.display_name.clone(),
            });
            ledger.note_level_up(before.current_level_index, after.current_level_index);
            set_trail_span(&mut trail, &tables, before.current_level_index, after.current_level_index);
            current.previous_level = before.current_level_index;

            flow = flow.advance(FlowEvent::LevelUp);
            if !settings.enable_level_up_animation && flow == CelebrationPhase::LevelUpPending {
                flow = flow.advance(FlowEvent::Acknowledged).advance(FlowEvent::Acknowledged);
            }
        } else {
            flow = flow.advance(FlowEvent::NoLevelUp);
        }
        current.info = Some(after);
    }

    if flow != *phase.get() {
        next_phase.set(flow);
    }
}

/// Rebuild the tables for a new locale and refresh the current snapshot.
pub fn set_locale_system(
    mut requests: MessageReader<SetLocaleMsg>,
    mut tables: ResMut<ProgressionTables>,
    mut settings: ResMut<ProgressionSettings>,
    mut cache: ResMut<LevelInfoCache>,
    stats: Res<PlayerStats>,
    mut current: ResMut<CurrentLevel>,
) {
    let Some(&SetLocaleMsg(locale)) = requests.read().last() else { return };
    if locale == settings.locale {
        return;
    }
    match ProgressionTables::builtin(locale) {
        Ok(rebuilt) => {
            *tables = rebuilt;
            cache.clear();
            settings.locale = locale;
            if stats.loaded {
                current.info = level_info(&mut cache, &tables, stats.snapshot.total_xp);
            }
            info!("Progression text switched to '{}'", locale.code());
        }
        Err(e) => error!("Failed to build progression tables for '{}': {e}", locale.code()),
    }
}
