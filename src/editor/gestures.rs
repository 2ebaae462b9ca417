//! Raw pointer input classified into logical map gestures.
//!
//! Physical clicks become two decoupled events - "a point was clicked" and
//! "finish here" - so the drawing session and the camera never compete for
//! the same press. While a session is capturing, a double-click is routed to
//! the session as a finish command and [`MapDoubleClick`] is withheld, which
//! suppresses the camera's default zoom-on-double-click.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::time::Duration;

use crate::constants::{DOUBLE_CLICK_SLOP_PX, DOUBLE_CLICK_WINDOW_MS};
use crate::geo::LatLng;

use super::camera::MapView;
use super::draw_tool::{DrawingCommand, DrawingSession};
use super::params::{is_cursor_over_ui, MapCameraParams};

/// A single primary-button click on the map surface.
#[derive(Message)]
pub struct MapClick {
    pub position: LatLng,
}

/// Two primary-button clicks inside the double-click window, outside of a
/// capture. The second physical click is reported only here, never as a
/// [`MapClick`].
#[derive(Message)]
pub struct MapDoubleClick {
    pub position: LatLng,
}

#[derive(Resource, Default)]
pub struct ClickTracker {
    last_click: Option<(Duration, LatLng)>,
}

#[allow(clippy::too_many_arguments)]
pub fn classify_clicks(
    time: Res<Time>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    session: Res<DrawingSession>,
    view: Res<MapView>,
    camera: MapCameraParams,
    mut contexts: EguiContexts,
    mut tracker: ResMut<ClickTracker>,
    mut clicks: MessageWriter<MapClick>,
    mut double_clicks: MessageWriter<MapDoubleClick>,
    mut drawing_commands: MessageWriter<DrawingCommand>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(position) = camera.cursor_latlng() else {
        return;
    };

    let now = time.elapsed();
    let window = Duration::from_millis(DOUBLE_CLICK_WINDOW_MS);
    let slop = DOUBLE_CLICK_SLOP_PX * view.degrees_per_pixel();
    let is_double = tracker.last_click.is_some_and(|(at, there)| {
        now.saturating_sub(at) <= window
            && there.to_world().distance(position.to_world()) <= slop
    });

    if is_double {
        tracker.last_click = None;
        if session.is_capturing() {
            drawing_commands.write(DrawingCommand::Finish);
        } else {
            double_clicks.write(MapDoubleClick { position });
        }
    } else {
        tracker.last_click = Some((now, position));
        clicks.write(MapClick { position });
    }
}
