//! The rider: a deck with a front wheel and a small top bar, welded into
//! one rigid compound.

use std::f32::consts::TAU;

use glam::Vec2;

use super::body::{Body, BodyKind, Collider, PLAYER_GROUP, Pose};
use crate::consts::*;
use crate::geom::Point;
use crate::track::Material;

/// Deck size
pub const DECK_WIDTH: f32 = 80.0;
pub const DECK_HEIGHT: f32 = 20.0;
/// Wheel sits on the deck's top-right corner
pub const WHEEL_RADIUS: f32 = 20.0;
/// Top bar above the wheel
pub const BAR_LENGTH: f32 = 30.0;
pub const BAR_THICKNESS: f32 = 0.5;

/// Sample count for the wheel outline
const WHEEL_SEGMENTS: usize = 16;

fn rect(center: Vec2, w: f32, h: f32) -> Vec<Point> {
    let (hw, hh) = (w / 2.0, h / 2.0);
    vec![
        center + Vec2::new(-hw, -hh),
        center + Vec2::new(hw, -hh),
        center + Vec2::new(hw, hh),
        center + Vec2::new(-hw, hh),
    ]
}

fn circle(center: Vec2, radius: f32) -> Vec<Point> {
    (0..WHEEL_SEGMENTS)
        .map(|i| center + Vec2::from_angle(TAU * i as f32 / WHEEL_SEGMENTS as f32) * radius)
        .collect()
}

/// Build the player body at `pose`.
///
/// Parts are laid out around the deck centre, which is the body position.
/// The wheel and bar are treated as weightless, so the deck alone sets
/// the mass and inertia.
pub fn build_player(pose: Pose) -> Body {
    let wheel_center = Vec2::new(DECK_WIDTH / 2.0, -DECK_HEIGHT / 2.0);
    let bar_center = Vec2::new(DECK_WIDTH - 56.0, -DECK_HEIGHT / 2.0 - WHEEL_RADIUS);

    let deck = rect(Vec2::ZERO, DECK_WIDTH, DECK_HEIGHT);
    let wheel = circle(wheel_center, WHEEL_RADIUS);
    let bar = rect(bar_center, BAR_LENGTH, BAR_THICKNESS);

    let inertia = PLAYER_MASS * (DECK_WIDTH * DECK_WIDTH + DECK_HEIGHT * DECK_HEIGHT) / 12.0;

    // Deck approximated by three circles spanning its width, plus the wheel
    let deck_r = DECK_HEIGHT / 2.0;
    let colliders = vec![
        Collider {
            offset: Vec2::new(-DECK_WIDTH / 2.0 + deck_r, 0.0),
            radius: deck_r,
        },
        Collider {
            offset: Vec2::ZERO,
            radius: deck_r,
        },
        Collider {
            offset: Vec2::new(DECK_WIDTH / 2.0 - deck_r, 0.0),
            radius: deck_r,
        },
        Collider {
            offset: wheel_center,
            radius: WHEEL_RADIUS,
        },
    ];

    Body {
        id: 0,
        kind: BodyKind::Player,
        group: PLAYER_GROUP,
        is_static: false,
        position: pose.position,
        angle: pose.angle,
        velocity: pose.velocity,
        angular_velocity: pose.angular_velocity,
        // Parts are already centred on the deck, no recentring needed
        parts: vec![deck, wheel, bar],
        colliders,
        material: Material {
            friction: 0.0,
            fill_color: "transparent".to_string(),
            stroke_color: "#000000".to_string(),
        },
        inv_mass: 1.0 / PLAYER_MASS,
        inv_inertia: 1.0 / inertia,
    }
}
