//! Map interaction: camera, tools, gesture classification, the polygon
//! drawing session, and the zoom/viewport-driven render pipeline.
//!
//! ## Module Structure
//!
//! - [`camera`] - 2D map camera with slippy-map zoom levels
//! - [`tools`] - tool selection and cursor feedback
//! - [`gestures`] - clicks classified into logical map gestures
//! - [`draw_tool`] - the point-capture state machine and its systems
//! - [`viewport`] - debounced viewport refresh, simplification, culling
//! - [`rendering`] - gizmo rendering of saved areas and the capture preview

pub mod camera;
mod draw_tool;
mod gestures;
mod params;
mod rendering;
pub mod tools;
mod viewport;

pub use camera::{MapCamera, MapView};
pub use draw_tool::{AoiFinalized, DrawMode, DrawingCommand, DrawingSession};
pub use tools::{CurrentTool, EditorTool};
pub use viewport::{CursorReadout, RenderGeometry, ViewportBounds};

use bevy::prelude::*;

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentTool>()
            .init_resource::<MapView>()
            .init_resource::<DrawingSession>()
            .init_resource::<gestures::ClickTracker>()
            .init_resource::<ViewportBounds>()
            .init_resource::<viewport::ViewRefreshDebounce>()
            .init_resource::<viewport::CursorThrottle>()
            .init_resource::<CursorReadout>()
            .init_resource::<viewport::GeometryRebuild>()
            .add_message::<gestures::MapClick>()
            .add_message::<gestures::MapDoubleClick>()
            .add_message::<DrawingCommand>()
            .add_message::<AoiFinalized>()
            .add_message::<viewport::ViewportChanged>()
            .add_systems(Startup, camera::spawn_camera)
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_zoom,
                    camera::double_click_zoom,
                    tools::update_cursor_icon,
                ),
            )
            .add_systems(
                Update,
                (
                    gestures::classify_clicks,
                    tools::handle_tool_shortcuts,
                    draw_tool::handle_capture,
                    draw_tool::sync_tool_session,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    viewport::watch_camera,
                    viewport::tick_view_refresh,
                    viewport::queue_rebuilds,
                    viewport::drive_rebuild,
                    viewport::apply_culling,
                    viewport::update_cursor_readout,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (rendering::render_areas, rendering::render_capture_preview),
            );
    }
}
