//! Rigid bodies
//!
//! A body stores its vertex loops in local space around its centroid plus a
//! pose. World-space geometry is derived on demand.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom::{Point, polygon_area, polygon_centroid};
use crate::track::{Material, TrackSegment};

/// Stable body handle, unique within a world
pub type BodyId = u32;

/// Collision group reserved for the player. Bodies sharing a negative group
/// never collide with each other.
pub const PLAYER_GROUP: i32 = -1;

/// Body role in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Static track piece
    Track,
    /// The rider
    Player,
}

/// Pose plus velocities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

impl Pose {
    /// At rest at `position` with zero rotation
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }
}

/// Circle used for contact detection on dynamic bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Centre relative to the body position, unrotated
    pub offset: Vec2,
    pub radius: f32,
}

/// Construction options for `Body::from_vertices`
#[derive(Debug, Clone)]
pub struct BodyOptions {
    pub kind: BodyKind,
    pub is_static: bool,
    pub angle: f32,
    pub group: i32,
    pub material: Material,
    /// Ignored for static bodies
    pub mass: f32,
    /// Ignored for static bodies
    pub inertia: f32,
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            kind: BodyKind::Track,
            is_static: true,
            angle: 0.0,
            group: 0,
            material: Material::track(),
            mass: 1.0,
            inertia: 1.0,
        }
    }
}

/// A simulated body
#[derive(Debug, Clone)]
pub struct Body {
    /// Assigned by `World::add`
    pub id: BodyId,
    pub kind: BodyKind,
    pub group: i32,
    pub is_static: bool,
    pub position: Vec2,
    pub angle: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    /// Local vertex loops (one per part)
    pub parts: Vec<Vec<Point>>,
    /// Contact circles (dynamic bodies only)
    pub colliders: Vec<Collider>,
    pub material: Material,
    pub inv_mass: f32,
    pub inv_inertia: f32,
}

impl Body {
    /// Build a body whose loops are recentred on their combined centroid and
    /// placed at `position`, rotated by `options.angle`.
    ///
    /// Returns `None` when no loop has at least three vertices.
    pub fn from_vertices(
        position: Vec2,
        loops: Vec<Vec<Point>>,
        options: BodyOptions,
    ) -> Option<Self> {
        let loops: Vec<Vec<Point>> = loops.into_iter().filter(|l| l.len() >= 3).collect();
        if loops.is_empty() {
            return None;
        }

        let centre = compound_centroid(&loops);
        let parts = loops
            .into_iter()
            .map(|l| l.into_iter().map(|v| v - centre).collect())
            .collect();

        let (inv_mass, inv_inertia) = if options.is_static {
            (0.0, 0.0)
        } else {
            (1.0 / options.mass.max(1e-6), 1.0 / options.inertia.max(1e-6))
        };

        Some(Self {
            id: 0,
            kind: options.kind,
            group: options.group,
            is_static: options.is_static,
            position,
            angle: options.angle,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            parts,
            colliders: Vec::new(),
            material: options.material,
            inv_mass,
            inv_inertia,
        })
    }

    /// Static track body for a synthesized segment
    pub fn from_segment(segment: &TrackSegment) -> Option<Self> {
        Self::from_vertices(
            segment.position,
            vec![segment.outline.clone()],
            BodyOptions {
                angle: segment.angle,
                material: segment.material.clone(),
                ..Default::default()
            },
        )
    }

    pub fn is_player(&self) -> bool {
        self.kind == BodyKind::Player
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            angle: self.angle,
            velocity: self.velocity,
            angular_velocity: self.angular_velocity,
        }
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.position;
        self.angle = pose.angle;
        self.velocity = pose.velocity;
        self.angular_velocity = pose.angular_velocity;
    }

    /// Map a local point to world space
    #[inline]
    pub fn to_world(&self, local: Point) -> Point {
        self.position + Vec2::from_angle(self.angle).rotate(local)
    }

    /// Every part in world space
    pub fn world_loops(&self) -> Vec<Vec<Point>> {
        let rot = Vec2::from_angle(self.angle);
        self.parts
            .iter()
            .map(|l| l.iter().map(|&v| self.position + rot.rotate(v)).collect())
            .collect()
    }

    /// First part in world space. Track bodies have exactly one part.
    pub fn world_vertices(&self) -> Vec<Point> {
        let rot = Vec2::from_angle(self.angle);
        self.parts
            .first()
            .map(|l| l.iter().map(|&v| self.position + rot.rotate(v)).collect())
            .unwrap_or_default()
    }

    /// World-space collider circles as (centre, radius)
    pub fn world_colliders(&self) -> impl Iterator<Item = (Point, f32)> + '_ {
        self.colliders
            .iter()
            .map(|c| (self.to_world(c.offset), c.radius))
    }

    /// Axis-aligned bounds of all parts and colliders as (min, max)
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for l in self.world_loops() {
            for v in l {
                min = min.min(v);
                max = max.max(v);
            }
        }
        for (c, r) in self.world_colliders() {
            min = min.min(c - Vec2::splat(r));
            max = max.max(c + Vec2::splat(r));
        }
        (min, max)
    }

    /// Apply an impulse at `r` (world offset from the body position)
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += r.perp_dot(impulse) * self.inv_inertia;
    }

    /// Velocity of the material point at world offset `r`
    #[inline]
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity + r.perp() * self.angular_velocity
    }
}

/// Area-weighted centroid across several loops
fn compound_centroid(loops: &[Vec<Point>]) -> Point {
    let origin = loops
        .iter()
        .find_map(|l| l.first().copied())
        .unwrap_or(Point::ZERO);

    let mut weighted = Vec2::ZERO;
    let mut total = 0.0;
    for l in loops {
        let area = polygon_area(l).abs();
        weighted += (polygon_centroid(l) - origin) * area;
        total += area;
    }
    if total < 1e-6 {
        let count: usize = loops.iter().map(Vec::len).sum();
        let offset: Point = loops.iter().flatten().map(|&v| v - origin).sum();
        return origin + offset / count.max(1) as f32;
    }
    origin + weighted / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::build_capsule;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_from_vertices_recentres_on_position() {
        let square = vec![p(100.0, 100.0), p(110.0, 100.0), p(110.0, 110.0), p(100.0, 110.0)];
        let body =
            Body::from_vertices(p(105.0, 105.0), vec![square.clone()], BodyOptions::default())
                .unwrap();

        let world = body.world_vertices();
        for (a, b) in world.iter().zip(&square) {
            assert!(a.distance(*b) < 1e-4);
        }
        assert!(body.is_static);
        assert_eq!(body.inv_mass, 0.0);
    }

    #[test]
    fn test_from_vertices_rejects_degenerate_loops() {
        let sliver = vec![vec![p(0.0, 0.0), p(1.0, 1.0)]];
        let body = Body::from_vertices(Vec2::ZERO, sliver, BodyOptions::default());
        assert!(body.is_none());
    }

    #[test]
    fn test_from_segment_matches_segment_geometry() {
        let seg = build_capsule(p(0.0, 0.0), p(30.0, 40.0), Material::boost());
        let body = Body::from_segment(&seg).unwrap();
        assert_eq!(body.material, Material::boost());

        for (a, b) in body.world_vertices().iter().zip(seg.world_vertices()) {
            assert!(a.distance(b) < 1e-3);
        }
    }

    #[test]
    fn test_impulse_at_offset_spins() {
        let square = vec![p(-1.0, -1.0), p(1.0, -1.0), p(1.0, 1.0), p(-1.0, 1.0)];
        let mut body = Body::from_vertices(
            Vec2::ZERO,
            vec![square],
            BodyOptions {
                is_static: false,
                mass: 2.0,
                inertia: 4.0,
                ..Default::default()
            },
        )
        .unwrap();

        body.apply_impulse(Vec2::new(0.0, 4.0), Vec2::new(1.0, 0.0));
        assert!((body.velocity.y - 2.0).abs() < 1e-6);
        assert!((body.angular_velocity - 1.0).abs() < 1e-6);
    }
}
