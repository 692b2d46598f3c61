//! ECS Resources - Shared progression state accessible by all systems

use bevy::math::Vec2;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task, TaskPool};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::level_info::LevelInfo;
use crate::milestones::MilestoneHit;
use crate::save::{ProgressStore, StatsSnapshot, StoreError};
use crate::trail::TrailGeometry;

/// Latest stats snapshot. `loaded` flips once the store has answered.
#[derive(Resource, Default, Debug)]
pub struct PlayerStats {
    pub snapshot: StatsSnapshot,
    pub loaded: bool,
    /// The store could not be read. Progress is tracked in memory only so the
    /// unreadable record is never overwritten.
    pub load_failed: bool,
}

impl PlayerStats {
    pub fn writable(&self) -> bool {
        self.loaded && !self.load_failed
    }
}

/// Level snapshot for the current XP, plus the level it replaced.
#[derive(Resource, Default, Debug)]
pub struct CurrentLevel {
    pub info: Option<LevelInfo>,
    pub previous_level: usize,
}

impl CurrentLevel {
    pub fn level_index(&self) -> usize {
        self.info.as_ref().map_or(0, |i| i.current_level_index)
    }
}

/// Milestone bookkeeping for the session.
#[derive(Resource, Default, Debug)]
pub struct MilestoneLedger {
    /// Milestones already shown, mirrored from the store.
    pub shown: BTreeSet<usize>,
    /// Most recent level-up (previous, current). Re-checks reuse it.
    pub level_change: Option<(usize, usize)>,
    /// A level-up has not been through a milestone check yet.
    pub check_pending: bool,
    /// Milestone currently on screen.
    pub active: Option<MilestoneHit>,
}

impl MilestoneLedger {
    /// Record a level-up. Level-ups that pile up before the next check widen
    /// the pending range instead of replacing it.
    pub fn note_level_up(&mut self, previous: usize, current: usize) {
        self.level_change = match self.level_change {
            Some((from, _)) if self.check_pending => Some((from, current)),
            _ => Some((previous, current)),
        };
        self.check_pending = true;
    }
}

/// Trail layout and the progress span to animate across.
#[derive(Resource, Default, Debug)]
pub struct TrailView {
    pub width: f32,
    pub geometry: TrailGeometry,
    pub previous_units: f32,
    pub current_units: f32,
}

impl TrailView {
    pub fn filled(&self) -> Vec<Vec2> {
        self.geometry.truncated(self.current_units)
    }

    pub fn marker(&self) -> Vec2 {
        self.geometry.marker(self.current_units)
    }
}

/// Shared handle to the stats store.
///
/// Saves go through one writer: each save replaces the queued snapshot and the
/// IO task that runs next writes whatever is newest, so the stored record never
/// moves backwards.
#[derive(Resource, Clone)]
pub struct StoreHandle {
    store: Arc<dyn ProgressStore>,
    queued: Arc<Mutex<Option<StatsSnapshot>>>,
    writer: Arc<Mutex<()>>,
}

impl StoreHandle {
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store, queued: Arc::default(), writer: Arc::default() }
    }

    /// Queue the current stats for writing. Skipped while the store is unreadable.
    /// Failures are logged, never retried.
    pub fn save(&self, stats: &PlayerStats) {
        if !stats.writable() {
            debug!("stats save skipped, store not writable this session");
            return;
        }
        *self.queued.lock().unwrap_or_else(PoisonError::into_inner) = Some(stats.snapshot.clone());

        let store = Arc::clone(&self.store);
        let queued = Arc::clone(&self.queued);
        let writer = Arc::clone(&self.writer);
        IoTaskPool::get_or_init(TaskPool::new)
            .spawn(async move {
                let _writing = writer.lock().unwrap_or_else(PoisonError::into_inner);
                let Some(snapshot) = queued.lock().unwrap_or_else(PoisonError::into_inner).take() else {
                    return;
                };
                if let Err(e) = store.save_stats(&snapshot) {
                    warn!("Failed to save stats: {e}");
                }
            })
            .detach();
    }

    pub fn spawn_load(&self) -> Task<Result<StatsSnapshot, StoreError>> {
        let store = Arc::clone(&self.store);
        IoTaskPool::get_or_init(TaskPool::new).spawn(async move { store.load_stats() })
    }
}

/// In-flight stats load, if any.
#[derive(Resource, Default)]
pub struct StatsLoad(pub Option<Task<Result<StatsSnapshot, StoreError>>>);
