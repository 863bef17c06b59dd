//! Rigid-body simulation
//!
//! A small 2D engine behind the operations the editor needs: create bodies
//! from vertex loops, add/remove them, set gravity and poses, and advance in
//! fixed ticks.
//! - Fixed timestep only
//! - Stable iteration order (by body ID)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod player;
pub mod runner;
pub mod tick;
pub mod world;

pub use body::{Body, BodyId, BodyKind, BodyOptions, Collider, PLAYER_GROUP, Pose};
pub use collision::{CollisionResult, circle_polygon_collision};
pub use player::build_player;
pub use runner::Runner;
pub use tick::tick;
pub use world::World;
