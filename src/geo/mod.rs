//! Planar geographic primitives for the AOI rendering pipeline.
//!
//! Everything here treats latitude/longitude as plain x/y deltas in degrees
//! (small-area approximation). There is no geodesic math, no projection, and
//! no coordinate validation: non-finite values propagate through comparisons
//! and can produce degenerate bounds or skipped simplification branches.
//!
//! - [`LatLng`] - a WGS84 coordinate pair
//! - [`GeoBounds`] - axis-aligned bounding box, also used as the viewport
//! - [`bounds_of`] - single-pass bounding box of a point sequence
//! - [`simplify`] - Ramer-Douglas-Peucker polyline reduction
//! - [`tolerance_for_zoom`] - zoom level to simplification tolerance

mod bounds;
mod simplify;

pub use bounds::{bounds_of, GeoBounds};
pub use simplify::{simplify, tolerance_for_zoom};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in degrees.
///
/// Serializes as a two-element `[lat, lng]` array so saved-area files stay
/// compact and order-stable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Position on the equirectangular world plane (x = lng, y = lat).
    pub fn to_world(self) -> Vec2 {
        Vec2::new(self.lng as f32, self.lat as f32)
    }

    pub fn from_world(pos: Vec2) -> Self {
        Self {
            lat: pos.y as f64,
            lng: pos.x as f64,
        }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(point: LatLng) -> Self {
        [point.lat, point.lng]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latlng_serializes_as_array() {
        let point = LatLng::new(50.9375, 6.9603);
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, "[50.9375,6.9603]");
    }

    #[test]
    fn test_latlng_deserializes_from_array() {
        let point: LatLng = serde_json::from_str("[1.5,-2.25]").unwrap();
        assert_eq!(point, LatLng::new(1.5, -2.25));
    }

    #[test]
    fn test_latlng_serde_roundtrip() {
        let point = LatLng::new(-33.8688, 151.2093);
        let json = serde_json::to_string(&point).unwrap();
        let parsed: LatLng = serde_json::from_str(&json).unwrap();
        assert_eq!(point, parsed);
    }

    #[test]
    fn test_world_conversion_axes() {
        // x carries longitude, y carries latitude
        let world = LatLng::new(50.0, 6.0).to_world();
        assert_eq!(world.x, 6.0);
        assert_eq!(world.y, 50.0);
    }

    #[test]
    fn test_world_roundtrip() {
        let point = LatLng::new(50.9375, 6.9603);
        let recovered = LatLng::from_world(point.to_world());
        assert!((recovered.lat - point.lat).abs() < 1e-4);
        assert!((recovered.lng - point.lng).abs() < 1e-4);
    }
}
