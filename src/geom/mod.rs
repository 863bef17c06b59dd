//! Geometry kernel
//!
//! Pure functions only: no state, no I/O, no simulation types.
//! - `simplify`: Ramer-Douglas-Peucker point reduction
//! - `spline`: Catmull-Rom smoothing through control points
//! - `polygon`: vertex-loop helpers shared by the synthesizer, codec and physics

pub mod polygon;
pub mod simplify;
pub mod spline;

pub use polygon::{
    closest_point_on_segment, dedup_consecutive, is_simple_polygon, point_in_polygon,
    polygon_area, polygon_centroid,
};
pub use simplify::{perpendicular_distance, simplify};
pub use spline::{catmull_rom_point, smooth};

/// A 2D point in viewport pixels (+y down)
pub type Point = glam::Vec2;
