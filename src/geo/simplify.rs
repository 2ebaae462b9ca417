//! Polyline reduction (Ramer-Douglas-Peucker) and the zoom-to-tolerance
//! policy that drives it.

use super::LatLng;

/// Squared distance from `p` to the segment `(a, b)`.
///
/// The projection parameter is clamped to the segment, so a point past an
/// endpoint measures against that endpoint. Squared distances are used
/// throughout; tolerances are squared once at the call site.
fn sq_segment_dist(p: LatLng, a: LatLng, b: LatLng) -> f64 {
    let (mut x1, mut y1) = (a.lat, a.lng);
    let (x2, y2) = (b.lat, b.lng);

    let dx = x2 - x1;
    let dy = y2 - y1;

    if dx != 0.0 || dy != 0.0 {
        let t = ((p.lat - x1) * dx + (p.lng - y1) * dy) / (dx * dx + dy * dy);
        if t > 1.0 {
            x1 = x2;
            y1 = y2;
        } else if t > 0.0 {
            x1 += dx * t;
            y1 += dy * t;
        }
    }

    let dx = p.lat - x1;
    let dy = p.lng - y1;
    dx * dx + dy * dy
}

/// Reduce a polyline, dropping interior points within `tolerance` degrees of
/// the chord between kept neighbors.
///
/// Inputs with fewer than three points are returned unchanged. The first and
/// last input points are always kept, and surviving points keep their input
/// order. A tolerance of zero still collapses exactly-colinear interior
/// points (the comparison is strictly greater-than).
///
/// Sub-ranges live on an explicit work list rather than the call stack, so
/// paths with tens of thousands of points cannot overflow it; the kept-point
/// set is identical to the textbook recursive formulation.
pub fn simplify(points: &[LatLng], tolerance: f64) -> Vec<LatLng> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let sq_tolerance = tolerance * tolerance;
    let last_index = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last_index] = true;

    let mut ranges = vec![(0usize, last_index)];
    while let Some((first, last)) = ranges.pop() {
        let mut max_sq_dist = sq_tolerance;
        let mut index = 0;

        // First maximum wins ties (strict comparison, left-to-right scan).
        for i in first + 1..last {
            let sq_dist = sq_segment_dist(points[i], points[first], points[last]);
            if sq_dist > max_sq_dist {
                index = i;
                max_sq_dist = sq_dist;
            }
        }

        if max_sq_dist > sq_tolerance {
            keep[index] = true;
            if index - first > 1 {
                ranges.push((first, index));
            }
            if last - index > 1 {
                ranges.push((index, last));
            }
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| **kept)
        .map(|(point, _)| *point)
        .collect()
}

/// Simplification tolerance for a slippy-map zoom level.
///
/// Bands follow the usual scales: country (<= 9), city (10-13),
/// neighborhood (14-16). At building level (>= 17) geometry renders
/// unsimplified.
pub fn tolerance_for_zoom(zoom: i32) -> f64 {
    if zoom <= 9 {
        0.01
    } else if zoom <= 13 {
        0.001
    } else if zoom <= 16 {
        0.0001
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(coords: &[[f64; 2]]) -> Vec<LatLng> {
        coords.iter().map(|&[lat, lng]| LatLng::new(lat, lng)).collect()
    }

    /// Textbook recursive formulation, used as an oracle for the
    /// work-list implementation.
    fn simplify_recursive(points: &[LatLng], tolerance: f64) -> Vec<LatLng> {
        fn step(
            points: &[LatLng],
            first: usize,
            last: usize,
            sq_tolerance: f64,
            out: &mut Vec<LatLng>,
        ) {
            let mut max_sq_dist = sq_tolerance;
            let mut index = 0;
            for i in first + 1..last {
                let sq_dist = sq_segment_dist(points[i], points[first], points[last]);
                if sq_dist > max_sq_dist {
                    index = i;
                    max_sq_dist = sq_dist;
                }
            }
            if max_sq_dist > sq_tolerance {
                if index - first > 1 {
                    step(points, first, index, sq_tolerance, out);
                }
                out.push(points[index]);
                if last - index > 1 {
                    step(points, index, last, sq_tolerance, out);
                }
            }
        }

        if points.len() < 3 {
            return points.to_vec();
        }
        let last = points.len() - 1;
        let mut out = vec![points[0]];
        step(points, 0, last, tolerance * tolerance, &mut out);
        out.push(points[last]);
        out
    }

    #[test]
    fn test_short_inputs_returned_unchanged() {
        for tolerance in [0.0, 0.001, 10.0] {
            assert_eq!(simplify(&[], tolerance), vec![]);

            let single = path(&[[1.0, 2.0]]);
            assert_eq!(simplify(&single, tolerance), single);

            let pair = path(&[[1.0, 2.0], [3.0, 4.0]]);
            assert_eq!(simplify(&pair, tolerance), pair);
        }
    }

    #[test]
    fn test_endpoints_always_survive() {
        let points = path(&[[0.0, 0.0], [0.5, 0.1], [1.0, 0.9], [2.0, 2.0]]);
        for tolerance in [0.0, 0.01, 100.0] {
            let simplified = simplify(&points, tolerance);
            assert_eq!(simplified[0], points[0]);
            assert_eq!(simplified[simplified.len() - 1], points[points.len() - 1]);
            assert!(simplified.len() <= points.len());
        }
    }

    #[test]
    fn test_colinear_middle_point_collapses() {
        let points = path(&[[0.0, 0.0], [0.0, 1.0], [0.0, 2.0]]);
        let simplified = simplify(&points, 0.0001);
        assert_eq!(simplified, path(&[[0.0, 0.0], [0.0, 2.0]]));
    }

    #[test]
    fn test_zero_tolerance_still_collapses_exact_colinearity() {
        // Strictly-greater comparison: a point at distance exactly zero is
        // never kept, even with tolerance zero.
        let points = path(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(simplify(&points, 0.0), path(&[[0.0, 0.0], [2.0, 2.0]]));
    }

    #[test]
    fn test_zero_tolerance_keeps_any_deviation() {
        let points = path(&[[0.0, 0.0], [1.0, 1.0 + 1e-9], [2.0, 2.0]]);
        assert_eq!(simplify(&points, 0.0).len(), 3);
    }

    #[test]
    fn test_peak_survives_and_flanks_collapse() {
        // The peak is kept; the flank points sit exactly on the sub-chords
        // created by the split and are dropped.
        let points = path(&[[0.0, 0.0], [1.0, 0.5], [2.0, 1.0], [3.0, 0.5], [4.0, 0.0]]);
        let simplified = simplify(&points, 0.001);
        assert_eq!(simplified, path(&[[0.0, 0.0], [2.0, 1.0], [4.0, 0.0]]));
    }

    #[test]
    fn test_large_tolerance_collapses_to_endpoints() {
        let points = path(&[[0.0, 0.0], [0.3, 0.8], [0.6, 0.2], [1.0, 1.0]]);
        let simplified = simplify(&points, 10.0);
        assert_eq!(simplified, path(&[[0.0, 0.0], [1.0, 1.0]]));
    }

    #[test]
    fn test_matches_recursive_formulation() {
        // A deterministic zigzag with varying amplitude, long enough to
        // exercise several levels of splitting.
        let points: Vec<LatLng> = (0..200)
            .map(|i| {
                let t = i as f64;
                LatLng::new(t * 0.01, ((i % 7) as f64 - 3.0) * 0.002 * (1.0 + (i % 13) as f64))
            })
            .collect();

        for tolerance in [0.0, 0.0001, 0.001, 0.01, 0.1] {
            assert_eq!(
                simplify(&points, tolerance),
                simplify_recursive(&points, tolerance),
                "divergence at tolerance {}",
                tolerance
            );
        }
    }

    #[test]
    fn test_projection_clamps_to_endpoints() {
        // Interior point lies beyond the segment's far endpoint; its
        // distance is measured to that endpoint, not the infinite line.
        let beyond = LatLng::new(0.0, 3.0);
        let dist = sq_segment_dist(beyond, LatLng::new(0.0, 0.0), LatLng::new(0.0, 2.0));
        assert_eq!(dist, 1.0);

        let before = LatLng::new(0.0, -2.0);
        let dist = sq_segment_dist(before, LatLng::new(0.0, 0.0), LatLng::new(0.0, 2.0));
        assert_eq!(dist, 4.0);
    }

    #[test]
    fn test_degenerate_segment_measures_point_distance() {
        let p = LatLng::new(3.0, 4.0);
        let dist = sq_segment_dist(p, LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.0));
        assert_eq!(dist, 25.0);
    }

    #[test]
    fn test_tolerance_for_zoom_bands() {
        assert_eq!(tolerance_for_zoom(6), 0.01);
        assert_eq!(tolerance_for_zoom(11), 0.001);
        assert_eq!(tolerance_for_zoom(15), 0.0001);
        assert_eq!(tolerance_for_zoom(18), 0.0);
    }

    #[test]
    fn test_tolerance_for_zoom_band_edges() {
        assert_eq!(tolerance_for_zoom(9), 0.01);
        assert_eq!(tolerance_for_zoom(10), 0.001);
        assert_eq!(tolerance_for_zoom(13), 0.001);
        assert_eq!(tolerance_for_zoom(14), 0.0001);
        assert_eq!(tolerance_for_zoom(16), 0.0001);
        assert_eq!(tolerance_for_zoom(17), 0.0);
    }
}
