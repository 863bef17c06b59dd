//! Simulation world: the one collection of bodies shared by authoring,
//! persistence and the stepper.

use glam::Vec2;

use super::body::{Body, BodyId, BodyKind, Pose};

/// All bodies plus global gravity
#[derive(Debug, Clone)]
pub struct World {
    /// Sorted by id for deterministic iteration
    bodies: Vec<Body>,
    gravity: Vec2,
    next_id: BodyId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Empty world with zero gravity
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            gravity: Vec2::ZERO,
            next_id: 1,
        }
    }

    /// Insert a body and return its new id.
    ///
    /// A second player body is refused so the world never holds more than one.
    pub fn add(&mut self, mut body: Body) -> Option<BodyId> {
        if body.is_player() && self.player().is_some() {
            log::warn!("Refusing to add a second player body");
            return None;
        }

        body.id = self.next_id;
        self.next_id += 1;
        let id = body.id;
        self.bodies.push(body);
        Some(id)
    }

    /// Insert several bodies, returning the ids that were accepted
    pub fn add_all(&mut self, bodies: impl IntoIterator<Item = Body>) -> Vec<BodyId> {
        bodies.into_iter().filter_map(|b| self.add(b)).collect()
    }

    /// Remove every body for which `keep` is false. Returns the number removed.
    pub fn remove_all(&mut self, keep: impl Fn(&Body) -> bool) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|b| keep(b));
        before - self.bodies.len()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Every non-player body
    pub fn track_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.kind == BodyKind::Track)
    }

    pub fn player(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.is_player())
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Overwrite a body's pose and velocities. Returns false for unknown ids.
    pub fn set_pose(&mut self, id: BodyId, pose: Pose) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                body.set_pose(pose);
                true
            }
            None => false,
        }
    }
}
