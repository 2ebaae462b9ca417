//! Viewport tracking and the zoom-driven geometry rebuild pipeline.
//!
//! Camera motion is debounced before the viewport bounds refresh, cursor
//! readout updates are throttled, and geometry rebuilds run through a
//! chunked batch - one chunk per frame when idle scheduling is available,
//! paced by a minimal-delay timer when it is not - so large collections
//! never stall interaction.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::time::Duration;

use crate::areas::AreaOfInterest;
use crate::constants::{
    AOI_CHUNK_SIZE, CURSOR_THROTTLE_MS, REBUILD_FALLBACK_MS, VIEW_DEBOUNCE_MS,
};
use crate::geo::{bounds_of, simplify, tolerance_for_zoom, GeoBounds, LatLng};
use crate::perf::{PerformanceMonitor, RuntimeCapabilities};
use crate::timing::{BatchStatus, ChunkedBatch, Debounce, Throttle};

use super::camera::{MapCamera, MapView};
use super::params::MapCameraParams;

/// Timing label for the simplification stage.
pub const SIMPLIFY_LABEL: &str = "simplify";
/// Timing label for the culling stage.
pub const CULL_LABEL: &str = "cull";

/// Simplified, culled render geometry for one AOI at the current zoom.
#[derive(Component, Debug, Clone)]
pub struct RenderGeometry {
    pub points: Vec<LatLng>,
    pub bounds: GeoBounds,
    pub in_view: bool,
}

/// Visible map extent in degrees, refreshed after debounced camera motion.
#[derive(Resource, Default)]
pub struct ViewportBounds {
    pub bounds: GeoBounds,
}

/// Fired when the debounced viewport refresh lands.
#[derive(Message)]
pub struct ViewportChanged;

/// Debounces camera motion before the viewport refresh.
#[derive(Resource)]
pub struct ViewRefreshDebounce(pub Debounce<()>);

impl Default for ViewRefreshDebounce {
    fn default() -> Self {
        Self(Debounce::new(Duration::from_millis(VIEW_DEBOUNCE_MS)))
    }
}

/// Throttles cursor readout updates under continuous pointer motion.
#[derive(Resource)]
pub struct CursorThrottle(pub Throttle);

impl Default for CursorThrottle {
    fn default() -> Self {
        Self(Throttle::new(Duration::from_millis(CURSOR_THROTTLE_MS)))
    }
}

/// Geographic coordinate most recently reported under the cursor.
#[derive(Resource, Default)]
pub struct CursorReadout {
    pub position: Option<LatLng>,
}

/// Work queue for geometry rebuilds.
#[derive(Resource)]
pub struct GeometryRebuild {
    pending: Vec<Entity>,
    active: Option<ChunkedBatch<Entity>>,
    last_zoom: Option<i32>,
    fallback: Timer,
}

impl Default for GeometryRebuild {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            active: None,
            last_zoom: None,
            fallback: Timer::new(
                Duration::from_millis(REBUILD_FALLBACK_MS),
                TimerMode::Repeating,
            ),
        }
    }
}

/// Feeds camera motion and zoom changes into the refresh debounce.
pub fn watch_camera(
    view: Res<MapView>,
    moved: Query<(), (With<MapCamera>, Changed<Transform>)>,
    mut debounce: ResMut<ViewRefreshDebounce>,
) {
    if view.is_changed() || !moved.is_empty() {
        debounce.0.call(());
    }
}

/// Recomputes the viewport bounds when the debounce window fires.
pub fn tick_view_refresh(
    time: Res<Time>,
    mut debounce: ResMut<ViewRefreshDebounce>,
    view: Res<MapView>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<&Transform, With<MapCamera>>,
    mut viewport: ResMut<ViewportBounds>,
    mut changed: MessageWriter<ViewportChanged>,
) {
    if debounce.0.tick(time.delta()).is_none() {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok(transform) = camera_query.single() else {
        return;
    };

    let degrees_per_pixel = view.degrees_per_pixel() as f64;
    let half_width = window.width() as f64 * 0.5 * degrees_per_pixel;
    let half_height = window.height() as f64 * 0.5 * degrees_per_pixel;
    let center_lat = transform.translation.y as f64;
    let center_lng = transform.translation.x as f64;

    viewport.bounds = GeoBounds::new(
        center_lat - half_height,
        center_lat + half_height,
        center_lng - half_width,
        center_lng + half_width,
    );
    changed.write(ViewportChanged);
}

/// Queues geometry work: newly added areas always, everything when the
/// debounced refresh lands on a different zoom level.
pub fn queue_rebuilds(
    view: Res<MapView>,
    mut rebuild: ResMut<GeometryRebuild>,
    mut viewport_changed: MessageReader<ViewportChanged>,
    all_areas: Query<Entity, With<AreaOfInterest>>,
    added_areas: Query<Entity, Added<AreaOfInterest>>,
) {
    let refreshed = viewport_changed.read().count() > 0;

    if refreshed && rebuild.last_zoom != Some(view.zoom) {
        rebuild.last_zoom = Some(view.zoom);
        rebuild.pending = all_areas.iter().collect();
        rebuild.active = None;
        return;
    }

    for entity in added_areas.iter() {
        rebuild.pending.push(entity);
    }
}

/// Processes one chunk of the active rebuild per yield point.
pub fn drive_rebuild(
    mut commands: Commands,
    mut rebuild: ResMut<GeometryRebuild>,
    capabilities: Res<RuntimeCapabilities>,
    time: Res<Time>,
    view: Res<MapView>,
    viewport: Res<ViewportBounds>,
    mut monitor: ResMut<PerformanceMonitor>,
    areas: Query<&AreaOfInterest>,
) {
    if rebuild.active.is_none() && !rebuild.pending.is_empty() {
        let mut entities = std::mem::take(&mut rebuild.pending);
        entities.sort_unstable();
        entities.dedup();
        debug!("Rebuilding render geometry for {} areas", entities.len());
        rebuild.active = Some(ChunkedBatch::new(entities, AOI_CHUNK_SIZE));
    }

    // Without idle scheduling, pace chunks with a minimal-delay timer
    // instead of the frame loop.
    if rebuild.active.is_some() && !capabilities.idle_scheduling {
        rebuild.fallback.tick(time.delta());
        if !rebuild.fallback.just_finished() {
            return;
        }
    }

    let tolerance = tolerance_for_zoom(view.zoom);
    let viewport_bounds = viewport.bounds;

    let Some(batch) = rebuild.active.as_mut() else {
        return;
    };

    monitor.start(SIMPLIFY_LABEL);
    let status = batch.process_chunk(|entity: &Entity, _index: usize| -> Result<(), ()> {
        // Areas deleted since queueing are skipped, not an error
        if let Ok(area) = areas.get(*entity) {
            let points = simplify(&area.points, tolerance);
            let bounds = bounds_of(&points);
            commands.entity(*entity).insert(RenderGeometry {
                in_view: bounds.intersects(&viewport_bounds),
                points,
                bounds,
            });
        }
        Ok(())
    });
    monitor.end(SIMPLIFY_LABEL);

    match status {
        Ok(BatchStatus::Complete) => {
            rebuild.active = None;
            debug!("Geometry rebuild complete");
        }
        Ok(BatchStatus::InProgress { processed, total }) => {
            debug!("Geometry rebuild at {}/{}", processed, total);
        }
        Err(()) => {
            rebuild.active = None;
        }
    }
}

/// Re-tests every polygon's bounds against the refreshed viewport.
pub fn apply_culling(
    mut viewport_changed: MessageReader<ViewportChanged>,
    viewport: Res<ViewportBounds>,
    mut monitor: ResMut<PerformanceMonitor>,
    mut geometries: Query<&mut RenderGeometry>,
) {
    if viewport_changed.is_empty() {
        return;
    }
    viewport_changed.clear();

    monitor.start(CULL_LABEL);
    let mut visible = 0usize;
    let mut total = 0usize;
    for mut geometry in geometries.iter_mut() {
        total += 1;
        let in_view = geometry.bounds.intersects(&viewport.bounds);
        if in_view {
            visible += 1;
        }
        if geometry.in_view != in_view {
            geometry.in_view = in_view;
        }
    }
    monitor.end(CULL_LABEL);

    if total > 0 {
        debug!("Culling: {}/{} areas in view", visible, total);
    }
}

/// Updates the cursor readout, throttled against continuous pointer motion.
pub fn update_cursor_readout(
    time: Res<Time>,
    mut throttle: ResMut<CursorThrottle>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    camera: MapCameraParams,
    mut readout: ResMut<CursorReadout>,
) {
    throttle.0.tick(time.delta());

    if mouse_motion.is_empty() {
        return;
    }
    mouse_motion.clear();

    let Some(position) = camera.cursor_latlng() else {
        // Cursor left the map surface; clear the readout and reopen the
        // gate so the next position shows immediately.
        if readout.position.is_some() {
            readout.position = None;
            throttle.0.cancel();
        }
        return;
    };

    if let Some(position) = throttle.0.accept(position) {
        readout.position = Some(position);
    }
}
