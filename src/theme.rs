//! Centralized color theme for the application.

use bevy::prelude::Color;

/// Saved AOI outlines (brand orange)
pub const AOI_STROKE: Color = Color::srgb(1.0, 0.42, 0.21);

/// In-progress capture polyline
pub const AOI_PREVIEW: Color = Color::srgba(1.0, 0.42, 0.21, 0.6);

/// Vertex markers on the capture preview
pub const AOI_VERTEX: Color = Color::srgb(1.0, 0.95, 0.9);
