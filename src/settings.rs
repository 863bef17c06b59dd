//! Editor settings and tuning
//!
//! Persisted separately from tracks, under its own storage key.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::platform::KeyValueStore;
use crate::track::CapsuleParams;

/// Geometry quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Arc subdivisions per capsule cap
    pub fn cap_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => TRACK_CAP_SEGMENTS,
            QualityPreset::High => 16,
        }
    }

    /// Spline samples per span for the live preview
    pub fn preview_segments(&self) -> usize {
        match self {
            QualityPreset::Low => 2,
            QualityPreset::Medium => PREVIEW_SMOOTH_SEGMENTS,
            QualityPreset::High => 6,
        }
    }
}

/// Editor settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Geometry quality preset
    pub quality: QualityPreset,

    // === Capture ===
    /// Minimum distance between buffered pointer samples
    pub min_sample_distance: f32,
    /// Simplification tolerance for committed strokes
    pub simplify_tolerance: f32,
    /// Spline samples per span for committed strokes
    pub smooth_segments: usize,
    /// Simplification tolerance for the live preview
    pub preview_simplify_tolerance: f32,

    // === Track ===
    /// Full capsule thickness
    pub track_thickness: f32,

    // === Physics ===
    /// Gravity while playing (+y is down)
    pub gravity: Vec2,
    /// Where the rider is reset to whenever the editor is not playing
    pub player_spawn: Vec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            // Capture
            min_sample_distance: MIN_SAMPLE_DISTANCE,
            simplify_tolerance: SIMPLIFY_TOLERANCE,
            smooth_segments: SMOOTH_SEGMENTS,
            preview_simplify_tolerance: PREVIEW_SIMPLIFY_TOLERANCE,

            // Track
            track_thickness: TRACK_THICKNESS,

            // Physics
            gravity: Vec2::new(0.0, DEFAULT_GRAVITY),
            player_spawn: PLAYER_SPAWN,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Capsule shape for committed track
    pub fn capsule_params(&self) -> CapsuleParams {
        CapsuleParams {
            thickness: self.track_thickness,
            cap_segments: self.quality.cap_segments(),
        }
    }

    /// Spline samples per span for the live preview
    pub fn preview_segments(&self) -> usize {
        self.quality.preview_segments()
    }

    /// Replace values that would break the pipeline with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.min_sample_distance.is_finite() && self.min_sample_distance >= 0.0) {
            self.min_sample_distance = defaults.min_sample_distance;
        }
        if !(self.simplify_tolerance.is_finite() && self.simplify_tolerance >= 0.0) {
            self.simplify_tolerance = defaults.simplify_tolerance;
        }
        let preview_tol = self.preview_simplify_tolerance;
        if !(preview_tol.is_finite() && preview_tol >= 0.0) {
            self.preview_simplify_tolerance = defaults.preview_simplify_tolerance;
        }
        if self.smooth_segments == 0 {
            self.smooth_segments = defaults.smooth_segments;
        }
        if !(self.track_thickness.is_finite() && self.track_thickness > 0.0) {
            self.track_thickness = defaults.track_thickness;
        }
        if !self.gravity.is_finite() {
            self.gravity = defaults.gravity;
        }
        if !self.player_spawn.is_finite() {
            self.player_spawn = defaults.player_spawn;
        }
        self
    }

    /// Storage key
    pub const STORAGE_KEY: &'static str = "sketch_rider_settings";

    /// Load settings from `store`, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings storage unavailable: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to `store`
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize settings: {e}");
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("high"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_preset_drives_cap_resolution() {
        assert_eq!(Settings::default().capsule_params().cap_segments, TRACK_CAP_SEGMENTS);
        let high = Settings::from_preset(QualityPreset::High);
        assert!(high.capsule_params().cap_segments > TRACK_CAP_SEGMENTS);
        assert_eq!(high.capsule_params().thickness, TRACK_THICKNESS);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::from_preset(QualityPreset::Low);
        settings.gravity = Vec2::new(0.0, 500.0);
        settings.save(&mut store);

        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_and_broken_settings() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"track_thickness": -3.0, "smooth_segments": 12}"#)
            .unwrap();
        let loaded = Settings::load(&store);
        assert_eq!(loaded.smooth_segments, 12);
        assert_eq!(loaded.track_thickness, TRACK_THICKNESS);
        assert_eq!(loaded.quality, QualityPreset::Medium);

        store.set(Settings::STORAGE_KEY, "{{{").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
