//! Sketch Rider - draw a track, then ride it
//!
//! Core modules:
//! - `geom`: Path simplification, spline smoothing, polygon helpers
//! - `track`: Capsule track segments and materials
//! - `capture`: Pointer gesture capture and stroke commit
//! - `sim`: Rigid-body world, physics tick, fixed-step runner
//! - `editor`: Edit/Play mode state machine owning the world
//! - `persistence`: Track save/load codec
//! - `platform`: Key/value storage backends

pub mod capture;
pub mod editor;
pub mod geom;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod track;

pub use capture::{CaptureOutcome, DrawingMode, GestureCapture, PointerEvent, PointerKind};
pub use editor::{Editor, Mode};
pub use geom::Point;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Editor configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame fed to the runner (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Gravity while playing, pixels/s² (+y is down)
    pub const DEFAULT_GRAVITY: f32 = 1000.0;
    /// Speed cap for dynamic bodies
    pub const MAX_BODY_SPEED: f32 = 2000.0;
    /// Contact substeps per tick for fast bodies
    pub const MAX_CONTACT_SUBSTEPS: u32 = 8;
    /// Fraction of penetration removed per contact
    pub const POSITION_CORRECTION: f32 = 0.8;
    /// Track is not bouncy
    pub const RESTITUTION: f32 = 0.0;

    /// Track capsule defaults
    pub const TRACK_THICKNESS: f32 = 4.0;
    pub const TRACK_CAP_SEGMENTS: u32 = 8;

    /// Pointer samples closer than this to the last buffered one are dropped
    pub const MIN_SAMPLE_DISTANCE: f32 = 5.0;
    /// Committed stroke pipeline
    pub const SIMPLIFY_TOLERANCE: f32 = 6.0;
    pub const SMOOTH_SEGMENTS: usize = 8;
    /// Live preview pipeline (coarser)
    pub const PREVIEW_SIMPLIFY_TOLERANCE: f32 = 3.0;
    pub const PREVIEW_SMOOTH_SEGMENTS: usize = 4;
    /// Smoothed points closer than this are merged before synthesis
    pub const JOINT_EPSILON: f32 = 1e-3;

    /// Canonical player pose
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(400.0, 100.0);
    pub const PLAYER_MASS: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Direction of travel from `a` to `b`, radians
#[inline]
pub fn heading(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-0.5) - (-0.5)).abs() < 1e-6);
        assert!((normalize_angle(2.0 * PI + 0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_heading() {
        assert_eq!(heading(Vec2::ZERO, Vec2::new(1.0, 0.0)), 0.0);
        assert!((heading(Vec2::ZERO, Vec2::new(0.0, 2.0)) - PI / 2.0).abs() < 1e-6);
    }
}
