//! Bounding boxes over lat/lng point sequences.

use super::LatLng;

/// Axis-aligned bounding box in degrees.
///
/// Also used for the visible map extent: culling tests a polygon's box
/// against a viewport box supplied fresh by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    pub const fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Box-overlap test used for viewport culling.
    ///
    /// Boxes that merely touch along an edge count as overlapping. This is a
    /// conservative test on bounds only: it can report true for a polygon
    /// that never actually enters the viewport, so it gates rendering work
    /// and nothing else.
    pub fn intersects(&self, other: &GeoBounds) -> bool {
        !(self.max_lat < other.min_lat
            || self.min_lat > other.max_lat
            || self.max_lng < other.min_lng
            || self.min_lng > other.max_lng)
    }
}

/// Compute the bounding box of a point sequence in one pass.
///
/// An empty input yields the degenerate all-zero box, not an absent value;
/// callers that care about the distinction must check the input themselves.
pub fn bounds_of(points: &[LatLng]) -> GeoBounds {
    let Some(first) = points.first() else {
        return GeoBounds::default();
    };

    let mut bounds = GeoBounds::new(first.lat, first.lat, first.lng, first.lng);
    for point in points {
        if point.lat < bounds.min_lat {
            bounds.min_lat = point.lat;
        }
        if point.lat > bounds.max_lat {
            bounds.max_lat = point.lat;
        }
        if point.lng < bounds.min_lng {
            bounds.min_lng = point.lng;
        }
        if point.lng > bounds.max_lng {
            bounds.max_lng = point.lng;
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_degenerate_zero_box() {
        assert_eq!(bounds_of(&[]), GeoBounds::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_bounds_of_points() {
        let points = [
            LatLng::new(1.0, 2.0),
            LatLng::new(3.0, 4.0),
            LatLng::new(-1.0, 5.0),
        ];
        assert_eq!(bounds_of(&points), GeoBounds::new(-1.0, 3.0, 2.0, 5.0));
    }

    #[test]
    fn test_single_point_collapses() {
        let bounds = bounds_of(&[LatLng::new(50.9, 6.9)]);
        assert_eq!(bounds, GeoBounds::new(50.9, 50.9, 6.9, 6.9));
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = GeoBounds::new(0.0, 10.0, 0.0, 10.0);
        let b = GeoBounds::new(5.0, 15.0, 5.0, 15.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_disjoint_boxes_do_not_intersect() {
        let a = GeoBounds::new(0.0, 1.0, 0.0, 1.0);
        let b = GeoBounds::new(5.0, 6.0, 5.0, 6.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_count_as_visible() {
        let a = GeoBounds::new(0.0, 1.0, 0.0, 1.0);
        let b = GeoBounds::new(1.0, 2.0, 0.0, 1.0);
        assert!(a.intersects(&b));

        let c = GeoBounds::new(0.0, 1.0, 1.0, 2.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_disjoint_on_single_axis() {
        let a = GeoBounds::new(0.0, 1.0, 0.0, 1.0);
        // overlaps in longitude, separated in latitude
        let b = GeoBounds::new(2.0, 3.0, 0.0, 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = GeoBounds::new(-10.0, 10.0, -10.0, 10.0);
        let inner = GeoBounds::new(-1.0, 1.0, -1.0, 1.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }
}
