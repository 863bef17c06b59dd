//! Track surface materials

use serde::{Deserialize, Serialize};

/// Friction applied to boost track. Outside the physical range on purpose:
/// the contact solver turns it into a push along the direction of travel.
pub const BOOST_FRICTION: f32 = -0.5;

/// Surface properties carried by every track segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Contact friction (negative = accelerating surface)
    pub friction: f32,
    /// Render fill, CSS hex
    pub fill_color: String,
    /// Render outline, CSS hex
    pub stroke_color: String,
}

impl Default for Material {
    fn default() -> Self {
        Self::track()
    }
}

impl Material {
    /// Ordinary frictionless black track
    pub fn track() -> Self {
        Self {
            friction: 0.0,
            fill_color: "#000000".to_string(),
            stroke_color: "#000000".to_string(),
        }
    }

    /// Blue rocket track
    pub fn boost() -> Self {
        Self {
            friction: BOOST_FRICTION,
            fill_color: "#4287f5".to_string(),
            stroke_color: "#2563eb".to_string(),
        }
    }

    /// Whether this surface accelerates riders
    pub fn is_boost(&self) -> bool {
        self.friction < 0.0
    }
}
