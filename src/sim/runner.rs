//! Fixed-step runner
//!
//! Turns variable host frame deltas into whole fixed ticks. While stopped it
//! never ticks and drops any accumulated time, so a restart does not replay
//! time spent in the editor.

use super::tick::tick;
use super::world::World;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Start/stop stepper with a time accumulator
#[derive(Debug, Clone, Default)]
pub struct Runner {
    running: bool,
    accumulator: f32,
    /// Total ticks run since creation
    ticks: u64,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("Runner started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!("Runner stopped after {} ticks", self.ticks);
        }
        self.running = false;
        self.accumulator = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed one host frame. Returns how many ticks ran.
    pub fn advance(&mut self, world: &mut World, frame_dt: f32) -> u32 {
        if !self.running {
            return 0;
        }

        if !frame_dt.is_finite() {
            log::debug!("Ignoring non-finite frame delta {frame_dt}");
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(world, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Spiral-of-death guard: drop what could not be simulated this frame
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.ticks += u64::from(substeps);
        substeps
    }
}
