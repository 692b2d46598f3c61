//! Integration tests - progression engine and plugin driven end to end.
//!
//! Pure-engine tests call the resolvers directly; plugin tests run a headless
//! `App` with `MinimalPlugins` and drive it with messages.

mod xp;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ProgressionPlugin;
use crate::data::{LevelRange, LevelThreshold, PathInfo, ProgressionTables};
use crate::flow::CelebrationPhase;
use crate::locale::Locale;
use crate::messages::CelebrationAckMsg;
use crate::resources::PlayerStats;
use crate::save::{MemoryStore, ProgressStore, StatsSnapshot};
use crate::settings::ProgressionSettings;

// ============================================================================
// TABLES
// ============================================================================

pub fn english_tables() -> ProgressionTables {
    ProgressionTables::builtin(Locale::En).expect("builtin tables")
}

/// One-path table with the given thresholds and no milestones.
pub fn single_path_tables(thresholds: &[u64]) -> ProgressionTables {
    let levels = thresholds
        .iter()
        .enumerate()
        .map(|(i, &xp)| LevelThreshold {
            xp_required: xp,
            name: format!("Level {i}"),
            message: String::new(),
            path_id: "only".to_string(),
            path_local_index: i,
        })
        .collect();
    let path = PathInfo::new(
        "only",
        "Only Path",
        "",
        LevelRange { first: 0, last: thresholds.len() - 1 },
        "#4285F4",
        "All done",
    )
    .expect("path");
    ProgressionTables::from_parts(levels, vec![path], BTreeMap::new()).expect("tables")
}

// ============================================================================
// APP HARNESS
// ============================================================================

/// Every message of type `M` seen since the app started.
#[derive(Resource)]
pub struct Collected<M>(pub Vec<M>);

impl<M> Default for Collected<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn collect<M: Message + Clone>(mut reader: MessageReader<M>, mut out: ResMut<Collected<M>>) {
    out.0.extend(reader.read().cloned());
}

pub fn collect_messages<M: Message + Clone>(app: &mut App) {
    app.init_resource::<Collected<M>>()
        .add_systems(Last, collect::<M>);
}

pub fn collected<M: Message + Clone>(app: &App) -> &[M] {
    &app.world().resource::<Collected<M>>().0
}

pub fn test_app(stats: StatsSnapshot, settings: ProgressionSettings) -> (App, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(stats));
    (app_with_store(store.clone(), settings), store)
}

pub fn app_with_store(store: Arc<dyn ProgressStore>, settings: ProgressionSettings) -> App {
    let plugin = ProgressionPlugin::new(store, settings).expect("plugin");
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin)).add_plugins(plugin);
    app
}

/// Update until `done` holds. Async store work finishes on the IO pool.
pub fn run_until(app: &mut App, what: &str, done: impl Fn(&World) -> bool) {
    for _ in 0..2000 {
        app.update();
        if done(app.world()) {
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    panic!("timed out waiting for {what}");
}

pub fn wait_for_stats(app: &mut App) {
    run_until(app, "stats load", |w| w.resource::<PlayerStats>().loaded);
}

/// Enough frames for a phase change to apply and the next phase's systems to run.
pub fn settle(app: &mut App) {
    for _ in 0..3 {
        app.update();
    }
}

pub fn phase(app: &App) -> CelebrationPhase {
    *app.world().resource::<State<CelebrationPhase>>().get()
}

pub fn acknowledge(app: &mut App) {
    app.world_mut().write_message(CelebrationAckMsg);
    settle(app);
}
