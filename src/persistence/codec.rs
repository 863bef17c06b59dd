//! Track codec
//!
//! The format is versionless. Decoding accepts missing optional fields and
//! ignores unknown ones, so files written by other versions load as far as
//! their records make sense.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Body, BodyOptions, World};
use crate::track::Material;

/// Decoding failures that abort the whole load
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("track data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("track data is not an array of bodies")]
    NotAnArray,
    #[error("none of the {0} saved bodies could be rebuilt")]
    NoValidRecords(usize),
}

/// A point as written to disk: `{ "x": .., "y": .. }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerializedPoint {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for SerializedPoint {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<SerializedPoint> for Vec2 {
    fn from(p: SerializedPoint) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// One persisted track body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedBody {
    /// Centroid in world space
    pub position: SerializedPoint,
    /// Full world-space vertex loop
    pub vertices: Vec<SerializedPoint>,
    /// Surface material, absent in older saves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
}

impl SerializedBody {
    fn from_body(body: &Body) -> Self {
        Self {
            position: body.position.into(),
            vertices: body.world_vertices().into_iter().map(Into::into).collect(),
            material: Some(body.material.clone()),
        }
    }

    /// Rebuild a static body. `None` for records that cannot form a polygon.
    fn into_body(self) -> Option<Body> {
        let position = Vec2::from(self.position);
        let vertices: Vec<Vec2> = self.vertices.into_iter().map(Vec2::from).collect();
        let finite = position.is_finite() && vertices.iter().all(|v| v.is_finite());
        if !finite || vertices.len() < 3 {
            return None;
        }

        Body::from_vertices(
            position,
            vec![vertices],
            BodyOptions {
                material: self.material.unwrap_or_default(),
                ..Default::default()
            },
        )
    }
}

/// Serialize every non-player body in the world
pub fn encode_track(world: &World) -> Result<String, TrackError> {
    let records: Vec<SerializedBody> =
        world.track_bodies().map(SerializedBody::from_body).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse saved track text into static bodies ready for insertion.
///
/// Individual records that are malformed are skipped with a warning. The
/// whole load fails only if the text is not a JSON array, or if it has
/// records but none of them are usable.
pub fn decode_track(text: &str) -> Result<Vec<Body>, TrackError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(records) = value else {
        return Err(TrackError::NotAnArray);
    };

    let total = records.len();
    let bodies: Vec<Body> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| {
            match serde_json::from_value::<SerializedBody>(record) {
                Ok(record) => {
                    let body = record.into_body();
                    if body.is_none() {
                        log::warn!("Skipping saved body {i}: degenerate vertex loop");
                    }
                    body
                }
                Err(e) => {
                    log::warn!("Skipping saved body {i}: {e}");
                    None
                }
            }
        })
        .collect();

    if total > 0 && bodies.is_empty() {
        return Err(TrackError::NoValidRecords(total));
    }
    Ok(bodies)
}
