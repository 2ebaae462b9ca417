//! Saved areas of interest: the entity collection, its persistence, and the
//! handoff from the drawing session.

mod aoi;
pub mod persistence;

pub use aoi::{estimated_memory_mb, AreaOfInterest};
pub use persistence::{
    AreasDirtyState, AreasLoadError, AreasSaveError, AsyncAreasOperation, CurrentAreasFile,
    LoadAreasRequest, SaveAreasRequest,
};

use bevy::prelude::*;

use crate::config::{AppConfig, ConfigLoaded};
use crate::editor::AoiFinalized;

/// Message to remove a saved area
#[derive(Message)]
pub struct DeleteAreaRequest {
    pub entity: Entity,
}

/// Spawns an entity for every polygon the drawing session hands off.
fn spawn_finalized_areas(mut commands: Commands, mut finalized: MessageReader<AoiFinalized>) {
    for message in finalized.read() {
        commands.spawn(message.area.clone());
    }
}

fn handle_delete_requests(
    mut commands: Commands,
    mut events: MessageReader<DeleteAreaRequest>,
    areas: Query<&AreaOfInterest>,
) {
    for event in events.read() {
        if let Ok(area) = areas.get(event.entity) {
            info!("Deleting \"{}\"", area.name);
        }
        commands.entity(event.entity).despawn();
    }
}

/// Restores the last areas file on startup when the config points at one.
fn autoload_last_areas(
    config: Res<AppConfig>,
    mut load_events: MessageWriter<LoadAreasRequest>,
) {
    let Some(ref path) = config.data.last_areas_path else {
        return;
    };

    if path.exists() {
        load_events.write(LoadAreasRequest { path: path.clone() });
    } else {
        info!("Last areas file no longer exists: {:?}", path);
    }
}

pub struct AreasPlugin;

impl Plugin for AreasPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AreasSaveError>()
            .init_resource::<AreasLoadError>()
            .init_resource::<AsyncAreasOperation>()
            .init_resource::<CurrentAreasFile>()
            .init_resource::<AreasDirtyState>()
            .add_message::<SaveAreasRequest>()
            .add_message::<LoadAreasRequest>()
            .add_message::<DeleteAreaRequest>()
            .add_systems(Startup, autoload_last_areas.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    spawn_finalized_areas,
                    handle_delete_requests.run_if(on_message::<DeleteAreaRequest>),
                    persistence::save_areas_system.run_if(on_message::<SaveAreasRequest>),
                    persistence::load_areas_system.run_if(on_message::<LoadAreasRequest>),
                    persistence::poll_save_tasks,
                    persistence::poll_load_tasks,
                    persistence::detect_area_changes,
                ),
            );
    }
}
