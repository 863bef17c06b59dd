//! Capsule geometry for track segments
//!
//! A capsule is a rectangle of length `|b - a|` with semicircular caps of
//! radius `thickness / 2`, built around the origin along +x and then rotated
//! and translated onto the segment.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::material::Material;
use crate::consts::{TRACK_CAP_SEGMENTS, TRACK_THICKNESS};
use crate::geom::{Point, dedup_consecutive};

/// Shape parameters for capsule synthesis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleParams {
    /// Full track thickness
    pub thickness: f32,
    /// Arc subdivisions per cap (each cap samples `cap_segments + 1` points)
    pub cap_segments: u32,
}

impl Default for CapsuleParams {
    fn default() -> Self {
        Self {
            thickness: TRACK_THICKNESS,
            cap_segments: TRACK_CAP_SEGMENTS,
        }
    }
}

/// One static piece of track
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSegment {
    /// Segment midpoint (also the outline centroid)
    pub position: Point,
    /// Rotation of the outline, radians
    pub angle: f32,
    /// Unrotated outline around the origin
    pub outline: Vec<Point>,
    pub material: Material,
}

impl TrackSegment {
    /// Outline in world space
    pub fn world_vertices(&self) -> Vec<Point> {
        let rot = Vec2::from_angle(self.angle);
        self.outline
            .iter()
            .map(|&v| self.position + rot.rotate(v))
            .collect()
    }

    /// Length of the straight part between the cap centres
    #[cfg(test)]
    pub fn length(&self, params: &CapsuleParams) -> f32 {
        let half = params.thickness / 2.0;
        let max_x = self.outline.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        ((max_x - half) * 2.0).max(0.0)
    }
}

/// Capsule outline of the given length, centred on the origin along +x.
///
/// The first cap sweeps the -x end from top to bottom, the second sweeps the
/// +x end from bottom to top. Coincident vertices (zero length) are merged
/// so the loop stays simple.
pub fn capsule_outline(length: f32, params: &CapsuleParams) -> Vec<Point> {
    let half_len = length / 2.0;
    let half_thick = params.thickness / 2.0;
    let n = params.cap_segments.max(1);

    let mut outline = Vec::with_capacity(2 * (n as usize + 1));
    for i in 0..=n {
        let theta = FRAC_PI_2 + PI * i as f32 / n as f32;
        outline.push(Point::new(
            -half_len + half_thick * theta.cos(),
            half_thick * theta.sin(),
        ));
    }
    for i in 0..=n {
        let theta = -FRAC_PI_2 + PI * i as f32 / n as f32;
        outline.push(Point::new(
            half_len + half_thick * theta.cos(),
            half_thick * theta.sin(),
        ));
    }

    let eps = half_thick * 1e-4;
    let mut outline = dedup_consecutive(&outline, eps);
    if outline.len() > 2 && outline[0].distance(outline[outline.len() - 1]) <= eps {
        outline.pop();
    }
    outline
}

/// Capsule covering segment `a -> b`
pub fn build_capsule(a: Point, b: Point, material: Material) -> TrackSegment {
    build_capsule_with(a, b, material, &CapsuleParams::default())
}

fn build_capsule_with(
    a: Point,
    b: Point,
    material: Material,
    params: &CapsuleParams,
) -> TrackSegment {
    TrackSegment {
        position: (a + b) / 2.0,
        angle: crate::heading(a, b),
        outline: capsule_outline(a.distance(b), params),
        material,
    }
}

/// One capsule per consecutive point pair. Fewer than two points yield nothing.
pub fn build_track(points: &[Point], material: Material) -> Vec<TrackSegment> {
    build_track_with(points, material, &CapsuleParams::default())
}

/// `build_track` with explicit capsule parameters
pub fn build_track_with(
    points: &[Point],
    material: Material,
    params: &CapsuleParams,
) -> Vec<TrackSegment> {
    if points.len() < 2 {
        return Vec::new();
    }

    points
        .windows(2)
        .map(|w| build_capsule_with(w[0], w[1], material.clone(), params))
        .collect()
}

/// Rocket track: `build_track` with the boost material
pub fn build_boost_track(points: &[Point]) -> Vec<TrackSegment> {
    build_track(points, Material::boost())
}
