//! Collision detection between rider circles and static track polygons
//!
//! Track outlines are arbitrary simple loops (synthesized capsules or
//! whatever a loaded file contained), so detection works on the polygon
//! boundary directly instead of assuming a capsule shape.

use glam::Vec2;

use crate::geom::{Point, closest_point_on_segment, point_in_polygon};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the polygon boundary
    pub point: Vec2,
    /// Surface normal pointing from the polygon toward the circle centre
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Closest boundary point of `loop_` to `p`, with the edge it lies on
fn closest_boundary_point(p: Point, loop_: &[Point]) -> (Point, Point, Point) {
    let n = loop_.len();
    let mut best = (loop_[0], loop_[0], loop_[0]);
    let mut best_dist = f32::MAX;
    for i in 0..n {
        let (a, b) = (loop_[i], loop_[(i + 1) % n]);
        let c = closest_point_on_segment(p, a, b);
        let d = c.distance_squared(p);
        if d < best_dist {
            best_dist = d;
            best = (c, a, b);
        }
    }
    best
}

/// Check a circle against a closed polygon.
///
/// Handles both the usual case (centre outside, boundary within `radius`)
/// and tunnelling (centre already inside the polygon).
pub fn circle_polygon_collision(center: Point, radius: f32, loop_: &[Point]) -> CollisionResult {
    if loop_.len() < 3 {
        return CollisionResult::miss();
    }

    let (closest, a, b) = closest_boundary_point(center, loop_);
    let inside = point_in_polygon(center, loop_);
    let offset = center - closest;
    let dist = offset.length();

    if !inside && dist >= radius {
        return CollisionResult::miss();
    }

    let mut normal = if inside { -offset } else { offset }.normalize_or_zero();
    if normal == Vec2::ZERO {
        // Centre exactly on the boundary: use the edge normal facing away
        // from the polygon interior
        let edge_normal = (b - a).perp().normalize_or_zero();
        let probe = closest + edge_normal * 1e-3;
        normal = if point_in_polygon(probe, loop_) {
            -edge_normal
        } else {
            edge_normal
        };
    }

    let penetration = if inside { radius + dist } else { radius - dist };
    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration,
    }
}

/// Check a circle against an axis-aligned box given as (min, max)
#[inline]
pub fn circle_overlaps_aabb(center: Point, radius: f32, (min, max): (Vec2, Vec2)) -> bool {
    let clamped = center.clamp(min, max);
    clamped.distance_squared(center) <= radius * radius
}
