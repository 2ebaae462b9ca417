//! Async save/load of the areas collection.
//!
//! The on-disk format is a plain JSON array of [`AreaOfInterest`] records.
//! File I/O runs on the [`IoTaskPool`]; task entities are polled each frame
//! so the frame loop never blocks on the disk.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::path::PathBuf;

use crate::config::UpdateLastAreasPathRequest;
use crate::editor::DrawingSession;

use super::aoi::AreaOfInterest;

#[derive(Message)]
pub struct SaveAreasRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct LoadAreasRequest {
    pub path: PathBuf,
}

/// Resource tracking save operation errors for display to user.
#[derive(Resource, Default)]
pub struct AreasSaveError {
    pub message: Option<String>,
}

#[derive(Resource, Default)]
pub struct AreasLoadError {
    pub message: Option<String>,
}

/// Resource tracking async I/O operations so the UI can block conflicting
/// actions while one is in flight.
#[derive(Resource, Default)]
pub struct AsyncAreasOperation {
    pub is_saving: bool,
    pub is_loading: bool,
    pub operation_description: Option<String>,
}

impl AsyncAreasOperation {
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_loading
    }
}

/// Resource tracking the currently loaded areas file path
#[derive(Resource, Default)]
pub struct CurrentAreasFile {
    pub path: Option<PathBuf>,
}

/// Resource tracking whether the areas collection has unsaved changes
#[derive(Resource, Default)]
pub struct AreasDirtyState {
    pub is_dirty: bool,
}

/// Result of an async save operation
pub struct SaveResult {
    pub path: PathBuf,
    pub success: bool,
    pub error: Option<String>,
}

/// Result of an async load operation
pub struct LoadResult {
    pub path: PathBuf,
    pub areas: Option<Vec<AreaOfInterest>>,
    pub error: Option<String>,
}

/// Component for save task
#[derive(Component)]
pub struct SaveAreasTask(pub Task<SaveResult>);

/// Component for load task
#[derive(Component)]
pub struct LoadAreasTask(pub Task<LoadResult>);

/// Starts an async save operation
pub fn save_areas_system(
    mut commands: Commands,
    mut events: MessageReader<SaveAreasRequest>,
    areas: Query<&AreaOfInterest>,
    mut async_op: ResMut<AsyncAreasOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Areas file operation already in progress");
            continue;
        }

        let mut records: Vec<AreaOfInterest> = areas.iter().cloned().collect();
        records.sort_by_key(|area| area.id);

        let path = event.path.clone();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("areas")
            .to_string();

        async_op.is_saving = true;
        async_op.operation_description = Some(format!("Saving {}...", file_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            match serde_json::to_string_pretty(&records) {
                Ok(json) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        SaveResult {
                            path,
                            success: false,
                            error: Some(format!("Failed to write file: {}", e)),
                        }
                    } else {
                        SaveResult {
                            path,
                            success: true,
                            error: None,
                        }
                    }
                }
                Err(e) => SaveResult {
                    path,
                    success: false,
                    error: Some(format!("Failed to serialize areas: {}", e)),
                },
            }
        });

        commands.spawn(SaveAreasTask(task));
    }
}

/// Polls save tasks and handles completion
pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveAreasTask)>,
    mut async_op: ResMut<AsyncAreasOperation>,
    mut current_file: ResMut<CurrentAreasFile>,
    mut config_events: MessageWriter<UpdateLastAreasPathRequest>,
    mut dirty_state: ResMut<AreasDirtyState>,
    mut save_error: ResMut<AreasSaveError>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_saving = false;
            async_op.operation_description = None;

            if result.success {
                info!("Areas saved to {:?}", result.path);
                save_error.message = None;
                current_file.path = Some(result.path.clone());
                config_events.write(UpdateLastAreasPathRequest { path: result.path });
                dirty_state.is_dirty = false;
            } else if let Some(error) = result.error {
                error!("{}", error);
                save_error.message = Some(error);
            }

            commands.entity(entity).despawn();
        }
    }
}

/// Starts an async load operation (file I/O and parsing only)
pub fn load_areas_system(
    mut commands: Commands,
    mut events: MessageReader<LoadAreasRequest>,
    mut async_op: ResMut<AsyncAreasOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Areas file operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("areas")
            .to_string();

        async_op.is_loading = true;
        async_op.operation_description = Some(format!("Loading {}...", file_name));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let json = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    return LoadResult {
                        path,
                        areas: None,
                        error: Some(format!("Failed to read file: {}", e)),
                    };
                }
            };

            match serde_json::from_str::<Vec<AreaOfInterest>>(&json) {
                Ok(areas) => LoadResult {
                    path,
                    areas: Some(areas),
                    error: None,
                },
                Err(e) => LoadResult {
                    path,
                    areas: None,
                    error: Some(format!("Failed to parse areas file: {}", e)),
                },
            }
        });

        commands.spawn(LoadAreasTask(task));
    }
}

/// Polls load tasks and replaces the areas collection on completion
pub fn poll_load_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadAreasTask)>,
    mut async_op: ResMut<AsyncAreasOperation>,
    mut load_error: ResMut<AreasLoadError>,
    existing: Query<Entity, With<AreaOfInterest>>,
    mut session: ResMut<DrawingSession>,
    mut current_file: ResMut<CurrentAreasFile>,
    mut config_events: MessageWriter<UpdateLastAreasPathRequest>,
    mut dirty_state: ResMut<AreasDirtyState>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_loading = false;
            async_op.operation_description = None;
            load_error.message = None;

            if let Some(error) = result.error {
                error!("{}", error);
                load_error.message = Some(error);
                commands.entity(entity).despawn();
                continue;
            }

            let Some(areas) = result.areas else {
                commands.entity(entity).despawn();
                continue;
            };

            for old in existing.iter() {
                commands.entity(old).despawn();
            }

            let count = areas.len();
            for area in areas {
                commands.spawn(area);
            }

            // Keep new names unique with respect to what was just loaded
            session.resume_numbering(count);

            info!("Loaded {} areas from {:?}", count, result.path);
            current_file.path = Some(result.path.clone());
            config_events.write(UpdateLastAreasPathRequest { path: result.path });
            dirty_state.is_dirty = false;

            commands.entity(entity).despawn();
        }
    }
}

/// Marks the collection dirty when areas are added or removed.
pub fn detect_area_changes(
    mut dirty_state: ResMut<AreasDirtyState>,
    added: Query<Entity, Added<AreaOfInterest>>,
    mut removed: RemovedComponents<AreaOfInterest>,
) {
    if added.is_empty() && removed.read().next().is_none() {
        return;
    }
    dirty_state.is_dirty = true;
}
