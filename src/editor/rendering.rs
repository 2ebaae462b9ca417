//! Gizmo rendering of saved AOIs and the in-progress capture preview.

use bevy::prelude::*;

use crate::theme;

use super::camera::MapView;
use super::draw_tool::DrawingSession;
use super::viewport::RenderGeometry;

/// Draws every saved polygon whose bounds overlap the viewport, as a closed
/// ring of its simplified points.
pub fn render_areas(mut gizmos: Gizmos, areas: Query<&RenderGeometry>) {
    for geometry in areas.iter() {
        if !geometry.in_view || geometry.points.len() < 2 {
            continue;
        }

        for window in geometry.points.windows(2) {
            gizmos.line_2d(window[0].to_world(), window[1].to_world(), theme::AOI_STROKE);
        }

        let first = geometry.points[0];
        let last = geometry.points[geometry.points.len() - 1];
        gizmos.line_2d(last.to_world(), first.to_world(), theme::AOI_STROKE);
    }
}

/// Draws the open polyline of the capture in progress, with vertex markers.
/// Nothing renders below two vertices.
pub fn render_capture_preview(
    mut gizmos: Gizmos,
    session: Res<DrawingSession>,
    view: Res<MapView>,
) {
    if !session.is_capturing() {
        return;
    }

    let points = session.vertices();
    let marker_radius = 4.0 * view.degrees_per_pixel();
    for point in points {
        gizmos.circle_2d(point.to_world(), marker_radius, theme::AOI_VERTEX);
    }

    if points.len() < 2 {
        return;
    }

    for window in points.windows(2) {
        gizmos.line_2d(window[0].to_world(), window[1].to_world(), theme::AOI_PREVIEW);
    }
}
