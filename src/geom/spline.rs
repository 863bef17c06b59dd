//! Catmull-Rom smoothing
//!
//! Uniform Catmull-Rom with tension 0.5. The control sequence is extended by
//! repeating its first and last points so the curve passes through every
//! control point, including both ends.

use super::Point;

/// Evaluate one Catmull-Rom span at `t` in [0, 1]. The curve runs `p1 -> p2`.
#[inline]
pub fn catmull_rom_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;

    let c0 = -0.5 * t3 + t2 - 0.5 * t;
    let c1 = 1.5 * t3 - 2.5 * t2 + 1.0;
    let c2 = -1.5 * t3 + 2.0 * t2 + 0.5 * t;
    let c3 = 0.5 * t3 - 0.5 * t2;

    p0 * c0 + p1 * c1 + p2 * c2 + p3 * c3
}

/// Sample a smooth curve through `control`.
///
/// Each span contributes its starting control point followed by `segments`
/// samples at `t = j / segments`, and the last control point closes the
/// curve, so the output holds `1 + (n - 1) * (segments + 1)` points.
/// Fewer than two control points come back unchanged. `segments == 0` is
/// treated as 1.
pub fn smooth(control: &[Point], segments: usize) -> Vec<Point> {
    let n = control.len();
    if n < 2 {
        return control.to_vec();
    }
    let segments = segments.max(1);

    let first = control[0];
    let last = control[n - 1];
    // Virtual neighbour lookup on [first, ..control, last]
    let ext = |i: usize| -> Point {
        match i {
            0 => first,
            i if i > n => last,
            i => control[i - 1],
        }
    };

    let mut out = Vec::with_capacity(1 + (n - 1) * (segments + 1));
    for i in 0..n - 1 {
        let (p0, p1, p2, p3) = (ext(i), ext(i + 1), ext(i + 2), ext(i + 3));
        out.push(p1);
        for j in 1..=segments {
            let t = j as f32 / segments as f32;
            out.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }
    out.push(last);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn test_short_input_unchanged() {
        assert!(smooth(&[], 8).is_empty());
        assert_eq!(smooth(&[p(3.0, 4.0)], 8), vec![p(3.0, 4.0)]);
    }

    #[test]
    fn test_two_points() {
        let out = smooth(&[p(0.0, 0.0), p(90.0, 30.0)], 8);
        assert_eq!(out.len(), 1 + 9);
        assert_eq!(out[0], p(0.0, 0.0));
        assert_eq!(*out.last().unwrap(), p(90.0, 30.0));

        // With both neighbours duplicated the span is a straight line
        for q in &out {
            assert!((q.y * 3.0 - q.x).abs() < 1e-3);
        }
    }

    #[test]
    fn test_passes_through_control_points() {
        let control = vec![p(0.0, 0.0), p(40.0, -20.0), p(80.0, 10.0), p(120.0, 0.0)];
        let segments = 5;
        let out = smooth(&control, segments);
        assert_eq!(out.len(), 1 + 3 * (segments + 1));

        for (i, c) in control.iter().enumerate().take(3) {
            assert_eq!(out[i * (segments + 1)], *c);
            // End of the previous span lands on the same control point
            if i > 0 {
                assert!(close(out[i * (segments + 1) - 1], *c));
            }
        }
    }

    #[test]
    fn test_basis_endpoints() {
        let (a, b, c, d) = (p(1.0, 2.0), p(3.0, 5.0), p(7.0, 1.0), p(9.0, 9.0));
        assert!(close(catmull_rom_point(a, b, c, d, 0.0), b));
        assert!(close(catmull_rom_point(a, b, c, d, 1.0), c));
    }

    #[test]
    fn test_single_segment_keeps_point_set() {
        let control = vec![p(0.0, 0.0), p(10.0, 5.0), p(20.0, -5.0), p(35.0, 0.0)];
        let once = smooth(&control, 1);
        for q in &once {
            assert!(control.iter().any(|c| close(*c, *q)));
        }
        for c in &control {
            assert!(once.iter().any(|q| close(*c, *q)));
        }
    }

    #[test]
    fn test_zero_segments_treated_as_one() {
        let control = vec![p(0.0, 0.0), p(10.0, 0.0)];
        assert_eq!(smooth(&control, 0).len(), smooth(&control, 1).len());
    }

    proptest! {
        #[test]
        fn prop_output_length(
            pts in prop::collection::vec((-300.0f32..300.0, -300.0f32..300.0), 2..30),
            segments in 1usize..12,
        ) {
            let control: Vec<Point> = pts.into_iter().map(|(x, y)| p(x, y)).collect();
            let out = smooth(&control, segments);
            prop_assert_eq!(out.len(), 1 + (control.len() - 1) * (segments + 1));
            prop_assert_eq!(out[0], control[0]);
            prop_assert_eq!(out[out.len() - 1], control[control.len() - 1]);
        }
    }
}
