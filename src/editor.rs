//! Editor state container
//!
//! Owns the simulation world, the player, the stroke capture and the
//! storage backend, and exposes the mutation entry points used by the UI.
//!
//! Modes:
//! - `Edit`: gravity off, runner stopped, rider parked at the spawn pose.
//!   Pointer strokes add track.
//! - `Play`: gravity on, runner stepping at a fixed rate. Pointer input is
//!   ignored.
//!
//! Every entry point is a no-op until `init()` has built the world.
//! Multi-threaded hosts must put the whole `Editor` behind one mutex so
//! world mutations never interleave with a tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::capture::{CaptureOutcome, DrawingMode, GestureCapture, PointerEvent};
use crate::persistence::{TRACK_KEY, decode_track, encode_track};
use crate::platform::{KeyValueStore, MemoryStore};
use crate::settings::Settings;
use crate::sim::{Body, BodyKind, Pose, Runner, World, build_player};
use crate::track::TrackSegment;

/// Editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mode {
    #[default]
    Edit,
    Play,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Edit => "Edit",
            Mode::Play => "Play",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Mode::Edit => Mode::Play,
            Mode::Play => Mode::Edit,
        }
    }
}

/// World plus the stepper driving it
#[derive(Debug, Clone)]
pub struct Simulation {
    pub world: World,
    pub runner: Runner,
}

impl Simulation {
    /// Fresh world holding only the player at `spawn`
    pub fn new(spawn: Vec2) -> Self {
        let mut world = World::new();
        world.add(build_player(Pose::at_rest(spawn)));
        Self {
            world,
            runner: Runner::new(),
        }
    }

    /// Put the player back at `spawn`, at rest. Re-creates it if missing.
    fn reset_player(&mut self, spawn: Vec2) {
        let pose = Pose::at_rest(spawn);
        match self.world.player_mut() {
            Some(player) => player.set_pose(pose),
            None => {
                log::warn!("Player body missing, re-creating it");
                self.world.add(build_player(pose));
            }
        }
    }

    fn enter(&mut self, mode: Mode, settings: &Settings) {
        match mode {
            Mode::Play => {
                self.reset_player(settings.player_spawn);
                self.world.set_gravity(settings.gravity);
                self.runner.start();
            }
            Mode::Edit => {
                self.runner.stop();
                self.world.set_gravity(Vec2::ZERO);
                self.reset_player(settings.player_spawn);
            }
        }
    }
}

/// The editor: one explicit owner for all mutable state
pub struct Editor<S: KeyValueStore = MemoryStore> {
    settings: Settings,
    store: S,
    mode: Mode,
    drawing_mode: DrawingMode,
    capture: GestureCapture,
    sim: Option<Simulation>,
}

impl Default for Editor<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KeyValueStore> Editor<S> {
    /// Editor using settings previously saved in `store`
    pub fn new(store: S) -> Self {
        let settings = Settings::load(&store);
        Self::with_settings(store, settings)
    }

    pub fn with_settings(store: S, settings: Settings) -> Self {
        Self {
            settings: settings.sanitized(),
            store,
            mode: Mode::Edit,
            drawing_mode: DrawingMode::default(),
            capture: GestureCapture::new(),
            sim: None,
        }
    }

    /// Build the world and the player, then enter the current mode
    pub fn init(&mut self) {
        if self.sim.is_some() {
            log::debug!("Editor already initialized");
            return;
        }

        let mut sim = Simulation::new(self.settings.player_spawn);
        sim.enter(self.mode, &self.settings);
        self.sim = Some(sim);
        log::info!("Editor initialized in {} mode", self.mode.as_str());
    }

    pub fn is_initialized(&self) -> bool {
        self.sim.is_some()
    }

    /// Switch modes. Before `init()` the choice is only remembered.
    pub fn set_mode(&mut self, mode: Mode) {
        let previous = self.mode;
        self.mode = mode;

        let Some(sim) = self.sim.as_mut() else {
            log::debug!("Mode set to {} before init", mode.as_str());
            return;
        };

        // Play -> Play leaves the ride running
        if previous == Mode::Play && mode == Mode::Play {
            return;
        }

        self.capture.cancel();
        sim.enter(mode, &self.settings);
        log::info!("Mode: {} -> {}", previous.as_str(), mode.as_str());
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    /// Takes effect from the next pointer-down
    pub fn set_drawing_mode(&mut self, mode: DrawingMode) {
        if mode != self.drawing_mode {
            log::info!("Drawing mode: {}", mode.as_str());
        }
        self.drawing_mode = mode;
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.drawing_mode
    }

    /// Feed one pointer event. Committed strokes go straight into the world.
    pub fn pointer(&mut self, event: PointerEvent) -> CaptureOutcome {
        if self.sim.is_none() || self.mode != Mode::Edit {
            return CaptureOutcome::Ignored;
        }

        let outcome = self.capture.handle(event, self.drawing_mode, &self.settings);
        if let CaptureOutcome::Committed(segments) = &outcome {
            self.add_bodies(segments);
        }
        outcome
    }

    /// The stroke buffer, for drawing live feedback
    pub fn capture(&self) -> &GestureCapture {
        &self.capture
    }

    /// Insert static bodies for `segments`. Returns how many were added.
    pub fn add_bodies(&mut self, segments: &[TrackSegment]) -> usize {
        let Some(sim) = self.sim.as_mut() else {
            return 0;
        };
        let ids = sim.world.add_all(segments.iter().filter_map(Body::from_segment));
        if ids.len() < segments.len() {
            log::warn!("Dropped {} degenerate segment(s)", segments.len() - ids.len());
        }
        ids.len()
    }

    /// Remove every non-player body. Returns how many were removed.
    pub fn clear_track_bodies(&mut self) -> usize {
        let Some(sim) = self.sim.as_mut() else {
            return 0;
        };
        let removed = sim.world.remove_all(|b| b.kind == BodyKind::Player);
        log::debug!("Removed {removed} track bodies");
        removed
    }

    /// Clear all track and any stroke in progress. The player keeps its pose.
    pub fn clear_all(&mut self) {
        if self.sim.is_none() {
            return;
        }
        self.capture.cancel();
        let removed = self.clear_track_bodies();
        log::info!("Cleared {removed} track bodies");
    }

    /// Write the current track to the store under the track key
    pub fn save_level(&mut self) {
        let Some(sim) = self.sim.as_ref() else {
            return;
        };

        let text = match encode_track(&sim.world) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Could not encode track: {e}");
                return;
            }
        };
        match self.store.set(TRACK_KEY, &text) {
            Ok(()) => log::info!("Saved {} track bodies", sim.world.track_bodies().count()),
            Err(e) => log::warn!("Could not save track: {e}"),
        }
    }

    /// Replace the current track with the saved one. Missing or unreadable
    /// data leaves the world untouched.
    pub fn load_level(&mut self) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };

        let text = match self.store.get(TRACK_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::debug!("No saved track");
                return;
            }
            Err(e) => {
                log::warn!("Could not read saved track: {e}");
                return;
            }
        };

        let bodies = match decode_track(&text) {
            Ok(bodies) => bodies,
            Err(e) => {
                log::warn!("Ignoring saved track: {e}");
                return;
            }
        };

        sim.world.remove_all(|b| b.kind == BodyKind::Player);
        let added = sim.world.add_all(bodies).len();
        log::info!("Loaded {added} track bodies");
    }

    /// Advance the simulation by one host frame. Returns ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        match self.sim.as_mut() {
            Some(sim) => sim.runner.advance(&mut sim.world, dt),
            None => 0,
        }
    }

    pub fn world(&self) -> Option<&World> {
        self.sim.as_ref().map(|s| &s.world)
    }

    pub fn player_pose(&self) -> Option<Pose> {
        self.world().and_then(World::player).map(Body::pose)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings and persist them. Applies to the next stroke and mode change.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
        self.settings.save(&mut self.store);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
