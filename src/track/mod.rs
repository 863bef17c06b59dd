//! Segment synthesizer
//!
//! Turns an ordered polyline into capsule-shaped static track pieces.
//! Adjacent capsules overlap at their round caps instead of being mitered;
//! the overlap is what keeps the track continuous.

pub mod capsule;
pub mod material;

pub use capsule::{
    CapsuleParams, TrackSegment, build_boost_track, build_capsule, build_track, build_track_with,
    capsule_outline,
};
pub use material::Material;
