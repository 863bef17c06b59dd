//! Track save/load
//!
//! Features:
//! - Flat JSON array of `{ position: {x, y}, vertices: [{x, y}], material? }` records
//! - One fixed storage key
//! - Per-record tolerance: a bad record is skipped, not fatal
//! - Player body never written or restored

pub mod codec;

pub use codec::{SerializedBody, SerializedPoint, TrackError, decode_track, encode_track};

/// Storage key for the saved track
pub const TRACK_KEY: &str = "track";
