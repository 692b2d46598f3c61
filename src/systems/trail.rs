//! Trail systems - relayout the progress trail when its container resizes.

use bevy::prelude::*;

use crate::data::ProgressionTables;
use crate::messages::TrailResizedMsg;
use crate::resources::TrailView;
use crate::settings::ProgressionSettings;
use crate::trail::TrailGeometry;

/// Relayout the trail when its container width changes.
pub fn trail_resize_system(
    mut resized: MessageReader<TrailResizedMsg>,
    tables: Res<ProgressionTables>,
    settings: Res<ProgressionSettings>,
    mut trail: ResMut<TrailView>,
) {
    let Some(&TrailResizedMsg { width }) = resized.read().last() else { return };
    if width == trail.width && !trail.geometry.is_empty() {
        return;
    }
    let node_count = tables.milestones().len() + 1;
    trail.geometry = TrailGeometry::new(width, node_count, &settings.trail);
    trail.width = width;
}
