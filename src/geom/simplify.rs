//! Ramer-Douglas-Peucker path simplification

use super::Point;

/// Distance from `point` to the segment `a -> b`
///
/// The projection parameter is clamped to the segment, so points beyond an
/// end measure to that endpoint. A zero-length segment yields 0.
pub fn perpendicular_distance(point: Point, a: Point, b: Point) -> f32 {
    let d = b - a;
    let len_sq = d.length_squared();
    if len_sq == 0.0 {
        return 0.0;
    }

    let t = (point - a).dot(d) / len_sq;
    if t < 0.0 {
        return point.distance(a);
    }
    if t > 1.0 {
        return point.distance(b);
    }

    point.distance(a + d * t)
}

/// Reduce `path` to the points that deviate more than `tolerance` from the
/// chord between their neighbours.
///
/// Paths of two points or fewer come back unchanged. The first and last
/// points are always kept and the output is a subsequence of the input.
pub fn simplify(path: &[Point], tolerance: f32) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(path.len());
    simplify_into(path, tolerance, &mut out);
    out.push(path[path.len() - 1]);
    out
}

/// Recursive step. Pushes every kept point of `path` except the last one,
/// which the caller (or the next sibling span) owns.
fn simplify_into(path: &[Point], tolerance: f32, out: &mut Vec<Point>) {
    let first = path[0];
    let last = path[path.len() - 1];

    let mut max_dist = 0.0_f32;
    let mut max_idx = 0;
    for (i, &p) in path.iter().enumerate().take(path.len() - 1).skip(1) {
        let dist = perpendicular_distance(p, first, last);
        // Strict comparison keeps the lowest index on ties
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        simplify_into(&path[..=max_idx], tolerance, out);
        simplify_into(&path[max_idx..], tolerance, out);
    } else {
        out.push(first);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_distance_projects_onto_segment() {
        let d = perpendicular_distance(p(5.0, 3.0), p(0.0, 0.0), p(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_clamps_to_endpoints() {
        let before = perpendicular_distance(p(-3.0, 4.0), p(0.0, 0.0), p(10.0, 0.0));
        assert!((before - 5.0).abs() < 1e-6);

        let after = perpendicular_distance(p(13.0, 4.0), p(0.0, 0.0), p(10.0, 0.0));
        assert!((after - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_degenerate_segment_is_zero() {
        let d = perpendicular_distance(p(7.0, 7.0), p(1.0, 1.0), p(1.0, 1.0));
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_straight_line_collapses_to_endpoints() {
        let path: Vec<Point> = (0..10).map(|i| p(i as f32 * 10.0, 0.0)).collect();
        let out = simplify(&path, 1.0);
        assert_eq!(out, vec![p(0.0, 0.0), p(90.0, 0.0)]);
    }

    #[test]
    fn test_corner_is_kept() {
        let path = vec![
            p(0.0, 0.0),
            p(50.0, 0.0),
            p(100.0, 0.0),
            p(100.0, 50.0),
            p(100.0, 100.0),
        ];
        let out = simplify(&path, 5.0);
        assert_eq!(out, vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 100.0)]);
    }

    #[test]
    fn test_tie_prefers_lowest_index() {
        // Both bumps sit 10 units off the chord; the first one wins the split.
        // Splitting at the second bump would keep (30, 10) instead.
        let path = vec![p(0.0, 0.0), p(10.0, 10.0), p(20.0, 0.0), p(30.0, 10.0), p(40.0, 0.0)];
        let out = simplify(&path, 8.0);
        assert_eq!(out, vec![p(0.0, 0.0), p(10.0, 10.0), p(40.0, 0.0)]);

        assert_eq!(simplify(&path, 20.0), vec![p(0.0, 0.0), p(40.0, 0.0)]);
        assert_eq!(simplify(&path, 5.0).len(), 5);
    }

    #[test]
    fn test_within_tolerance_is_not_split() {
        let path = vec![p(0.0, 0.0), p(5.0, 6.0), p(10.0, 0.0)];
        assert_eq!(simplify(&path, 6.0).len(), 2);
        assert_eq!(simplify(&path, 5.9).len(), 3);
    }

    fn arb_path() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((-500.0f32..500.0, -500.0f32..500.0), 0..60)
            .prop_map(|v| v.into_iter().map(|(x, y)| p(x, y)).collect())
    }

    proptest! {
        #[test]
        fn prop_short_paths_unchanged(
            pts in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 0..=2),
            tol in 0.0f32..50.0,
        ) {
            let path: Vec<Point> = pts.into_iter().map(|(x, y)| p(x, y)).collect();
            prop_assert_eq!(simplify(&path, tol), path);
        }

        #[test]
        fn prop_output_is_subsequence_with_endpoints(path in arb_path(), tol in 0.0f32..50.0) {
            let out = simplify(&path, tol);
            if path.len() >= 2 {
                prop_assert_eq!(out.first(), path.first());
                prop_assert_eq!(out.last(), path.last());
            }

            // Greedy subsequence match
            let mut it = path.iter();
            for q in &out {
                prop_assert!(it.any(|x| x == q), "{:?} not found in order", q);
            }
        }
    }
}
