//! Sudoku progression - XP levels, narrative paths, milestones and the progress trail.
//!
//! The pure engine (tables, resolvers, `compute_level_info`, `compute_xp_gain`,
//! `MilestoneTracker`, `TrailGeometry`) has no ECS dependency and can be called
//! from any thread. `ProgressionPlugin` wires it into a Bevy app: the host UI sends
//! messages in and presents the messages, resources and `CelebrationPhase` that come out.

// ============================================================================
// MODULES
// ============================================================================

pub mod constants;
pub mod data;
pub mod flow;
pub mod level_info;
pub mod locale;
pub mod messages;
pub mod milestones;
pub mod resolve;
pub mod resources;
pub mod save;
pub mod settings;
pub mod systems;
pub mod trail;
pub mod xp;

#[cfg(test)]
mod tests;

// ============================================================================
// IMPORTS
// ============================================================================

use bevy::prelude::*;
use std::sync::Arc;

use data::{ConfigError, ProgressionTables};
use flow::CelebrationPhase;
use level_info::LevelInfoCache;
use messages::*;
use resources::*;
use save::ProgressStore;
use settings::ProgressionSettings;
use systems::*;

// ============================================================================
// PLUGIN
// ============================================================================

/// Update phases. Chained so each phase sees the messages the previous one wrote.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressionStep {
    Load,      // Finish stats load, locale switches, first snapshot
    Award,     // Finished puzzles -> XP
    Level,     // XP -> LevelInfo, level-up detection
    Celebrate, // Acks, milestone checks
    Trail,     // Trail relayout
}

/// Requires `StatesPlugin` (part of `DefaultPlugins`) and a task pool plugin.
pub struct ProgressionPlugin {
    tables: ProgressionTables,
    settings: ProgressionSettings,
    store: Arc<dyn ProgressStore>,
}

impl ProgressionPlugin {
    /// Builds the tables for `settings.locale` up front so a bad table never reaches the app.
    pub fn new(store: Arc<dyn ProgressStore>, settings: ProgressionSettings) -> Result<Self, ConfigError> {
        let tables = ProgressionTables::builtin(settings.locale)?;
        Ok(Self { tables, settings, store })
    }

    /// Same as [`ProgressionPlugin::new`] with the settings saved under the user's Documents folder.
    pub fn from_saved_settings(store: Arc<dyn ProgressStore>) -> Result<Self, ConfigError> {
        Self::new(store, settings::load_settings())
    }

    pub fn with_settings_file(store: Arc<dyn ProgressStore>, path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::new(store, settings::load_settings_from(path))
    }
}

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PuzzleCompletedMsg>()
           .add_message::<CelebrationAckMsg>()
           .add_message::<MilestoneRecheckMsg>()
           .add_message::<TrailResizedMsg>()
           .add_message::<SetLocaleMsg>()
           .add_message::<XpAwardedMsg>()
           .add_message::<LevelUpMsg>()
           .add_message::<MilestoneReachedMsg>()
           .init_state::<CelebrationPhase>()
           .insert_resource(self.tables.clone())
           .insert_resource(self.settings.clone())
           .insert_resource(StoreHandle::new(Arc::clone(&self.store)))
           .init_resource::<PlayerStats>()
           .init_resource::<CurrentLevel>()
           .init_resource::<LevelInfoCache>()
           .init_resource::<MilestoneLedger>()
           .init_resource::<TrailView>()
           .init_resource::<StatsLoad>()
           .configure_sets(Update, (
               ProgressionStep::Load,
               ProgressionStep::Award,
               ProgressionStep::Level,
               ProgressionStep::Celebrate,
               ProgressionStep::Trail,
           ).chain())
           .add_systems(Startup, start_stats_load)
           .add_systems(Update, (
               poll_stats_load,
               set_locale_system,
               sync_level_on_load,
           ).chain().in_set(ProgressionStep::Load))
           .add_systems(Update, award_xp_system.in_set(ProgressionStep::Award))
           .add_systems(Update, level_tracking_system.in_set(ProgressionStep::Level))
           .add_systems(Update, (
               celebration_ack_system,
               milestone_recheck_system,
               milestone_check_system.run_if(in_state(CelebrationPhase::MilestoneCheckPending)),
           ).chain().in_set(ProgressionStep::Celebrate))
           .add_systems(Update, trail_resize_system.in_set(ProgressionStep::Trail));
    }
}
