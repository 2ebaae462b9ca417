//! Area-of-interest data types.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// A finalized, user-drawn area of interest.
///
/// Created only by the drawing session when a capture is finished (never
/// with fewer than three vertices) and immutable afterwards. `id` is the
/// Unix-epoch-millisecond timestamp minted at finalize time and doubles as
/// the stable handle for UI and persistence.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct AreaOfInterest {
    pub id: i64,
    pub name: String,
    pub points: Vec<LatLng>,
}

/// Rough memory footprint of a polygon set, in megabytes: 16 bytes per
/// coordinate pair plus ~100 bytes of per-polygon overhead.
pub fn estimated_memory_mb<'a>(areas: impl Iterator<Item = &'a AreaOfInterest>) -> f64 {
    let (polygons, points) = areas.fold((0usize, 0usize), |(polygons, points), area| {
        (polygons + 1, points + area.points.len())
    });

    (points * 16 + polygons * 100) as f64 / (1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: i64, name: &str) -> AreaOfInterest {
        AreaOfInterest {
            id,
            name: name.to_string(),
            points: vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(0.0, 1.0),
                LatLng::new(1.0, 1.0),
                LatLng::new(1.0, 0.0),
            ],
        }
    }

    #[test]
    fn test_record_shape() {
        // The persisted record is {id, name, points: [[lat, lng], ...]}
        let json = serde_json::to_value(square(123456789, "Test AOI")).unwrap();
        assert_eq!(json["id"], 123456789);
        assert_eq!(json["name"], "Test AOI");
        assert_eq!(json["points"][0][0], 0.0);
        assert_eq!(json["points"][1][1], 1.0);
        assert_eq!(json["points"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_serde_roundtrip() {
        let area = square(42, "AOI 1");
        let json = serde_json::to_string(&area).unwrap();
        let parsed: AreaOfInterest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, area.id);
        assert_eq!(parsed.name, area.name);
        assert_eq!(parsed.points, area.points);
    }

    #[test]
    fn test_memory_estimate() {
        let areas = [square(1, "a"), square(2, "b")];
        // 8 points * 16 bytes + 2 polygons * 100 bytes
        let expected = (8.0 * 16.0 + 2.0 * 100.0) / (1024.0 * 1024.0);
        let estimate = estimated_memory_mb(areas.iter());
        assert!((estimate - expected).abs() < 1e-12);
    }

    #[test]
    fn test_memory_estimate_empty() {
        let areas: [AreaOfInterest; 0] = [];
        assert_eq!(estimated_memory_mb(areas.iter()), 0.0);
    }
}
