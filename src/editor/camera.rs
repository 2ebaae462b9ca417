use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};

use super::gestures::MapDoubleClick;

#[derive(Component)]
pub struct MapCamera;

/// Integer slippy-map zoom level. Drives both the camera's orthographic
/// scale and the simplification tolerance of the render pipeline.
#[derive(Resource)]
pub struct MapView {
    pub zoom: i32,
}

impl Default for MapView {
    fn default() -> Self {
        Self { zoom: DEFAULT_ZOOM }
    }
}

impl MapView {
    /// Degrees of longitude per screen pixel at this zoom.
    pub fn degrees_per_pixel(&self) -> f32 {
        360.0 / (TILE_SIZE * 2f32.powi(self.zoom))
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - 1).max(MIN_ZOOM);
    }
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        MapCamera,
        Transform::from_translation(DEFAULT_CENTER.to_world().extend(1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    view: Res<MapView>,
    mut camera_query: Query<&mut Transform, With<MapCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let degrees_per_pixel = view.degrees_per_pixel();
    for event in mouse_motion.read() {
        let delta = event.delta * degrees_per_pixel;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut view: ResMut<MapView>,
) {
    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 40.0,
        };

        if scroll_amount > 0.0 && view.zoom < MAX_ZOOM {
            view.zoom_in();
        } else if scroll_amount < 0.0 && view.zoom > MIN_ZOOM {
            view.zoom_out();
        }
    }
}

pub fn apply_zoom(
    view: Res<MapView>,
    mut camera_query: Query<&mut Projection, With<MapCamera>>,
) {
    if !view.is_changed() {
        return;
    }

    for mut projection in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = view.degrees_per_pixel();
        }
    }
}

/// Default double-click behavior: zoom one level in, recentered on the
/// clicked point. The gesture layer withholds `MapDoubleClick` while a
/// drawing session is capturing, so finishing a polygon never also zooms.
pub fn double_click_zoom(
    mut double_clicks: MessageReader<MapDoubleClick>,
    mut view: ResMut<MapView>,
    mut camera_query: Query<&mut Transform, With<MapCamera>>,
) {
    for click in double_clicks.read() {
        let Ok(mut transform) = camera_query.single_mut() else {
            continue;
        };

        let target = click.position.to_world();
        transform.translation.x = target.x;
        transform.translation.y = target.y;
        if view.zoom < MAX_ZOOM {
            view.zoom_in();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zoom() {
        assert_eq!(MapView::default().zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn test_zoom_clamps_to_limits() {
        let mut view = MapView { zoom: MAX_ZOOM };
        view.zoom_in();
        assert_eq!(view.zoom, MAX_ZOOM);

        let mut view = MapView { zoom: MIN_ZOOM };
        view.zoom_out();
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_degrees_per_pixel_halves_per_zoom_step() {
        let coarse = MapView { zoom: 10 }.degrees_per_pixel();
        let fine = MapView { zoom: 11 }.degrees_per_pixel();
        assert!((coarse / fine - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_degrees_per_pixel_at_base_zoom() {
        // At zoom 0 the whole 360 degrees span one tile
        let view = MapView { zoom: 0 };
        assert!((view.degrees_per_pixel() - 360.0 / TILE_SIZE).abs() < 1e-6);
    }
}
