//! Vertex-loop helpers
//!
//! Loops are implicitly closed: the last vertex connects back to the first.

use super::Point;

/// Signed area (shoelace). Positive for counter-clockwise loops in a +y-up frame.
pub fn polygon_area(loop_: &[Point]) -> f32 {
    if loop_.len() < 3 {
        return 0.0;
    }
    // Relative to the first vertex: raw world coordinates cancel in f32
    let origin = loop_[0];
    let mut sum = 0.0;
    for (i, &a) in loop_.iter().enumerate() {
        let b = loop_[(i + 1) % loop_.len()];
        sum += (a - origin).perp_dot(b - origin);
    }
    sum * 0.5
}

/// Area-weighted centroid of a loop.
///
/// Degenerate (zero-area) loops fall back to the vertex mean.
pub fn polygon_centroid(loop_: &[Point]) -> Point {
    if loop_.is_empty() {
        return Point::ZERO;
    }

    let origin = loop_[0];
    let area = polygon_area(loop_);
    if area.abs() < 1e-6 {
        return origin + loop_.iter().map(|&v| v - origin).sum::<Point>() / loop_.len() as f32;
    }

    let mut c = Point::ZERO;
    for (i, &a) in loop_.iter().enumerate() {
        let (a, b) = (a - origin, loop_[(i + 1) % loop_.len()] - origin);
        c += (a + b) * a.perp_dot(b);
    }
    origin + c / (6.0 * area)
}

/// Closest point to `p` on segment `a -> b`
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> Point {
    let d = b - a;
    let len_sq = d.length_squared();
    if len_sq < 1e-12 {
        return a;
    }
    let t = ((p - a).dot(d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Even-odd point containment
pub fn point_in_polygon(p: Point, loop_: &[Point]) -> bool {
    let n = loop_.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (loop_[i], loop_[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// True when no two non-adjacent edges of the loop touch or cross and no
/// edge has zero length.
pub fn is_simple_polygon(loop_: &[Point]) -> bool {
    let n = loop_.len();
    if n < 3 {
        return false;
    }

    let edge = |i: usize| (loop_[i], loop_[(i + 1) % n]);
    for i in 0..n {
        let (a, b) = edge(i);
        if a.distance_squared(b) < 1e-12 {
            return false;
        }
        for j in i + 1..n {
            // Neighbouring edges share a vertex by construction
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (c, d) = edge(j);
            if segments_intersect(a, b, c, d) {
                return false;
            }
        }
    }
    true
}

fn orient(a: Point, b: Point, c: Point) -> f32 {
    (b - a).perp_dot(c - a)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let eps = 1e-9;
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);

    if ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
        && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
    {
        return true;
    }

    (d1.abs() <= eps && on_segment(c, d, a))
        || (d2.abs() <= eps && on_segment(c, d, b))
        || (d3.abs() <= eps && on_segment(a, b, c))
        || (d4.abs() <= eps && on_segment(a, b, d))
}

/// Drop consecutive points closer than `eps` to the previously kept one
pub fn dedup_consecutive(points: &[Point], eps: f32) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        match out.last() {
            Some(&last) if last.distance_squared(p) <= eps * eps => {}
            _ => out.push(p),
        }
    }
    out
}
