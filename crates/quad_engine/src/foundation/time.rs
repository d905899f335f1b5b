//! Frame timing utilities

use std::time::{Duration, Instant};

/// Fixed-timestep frame clock
///
/// The collision pass is frame-synchronous, so simulation time advances in
/// whole frames of `timestep` seconds regardless of wall-clock jitter. Wall
/// time is still tracked for reporting.
#[derive(Debug, Clone)]
pub struct FrameClock {
    timestep: f32,
    frame_count: u64,
    started: Instant,
}

impl FrameClock {
    /// Create a clock advancing `timestep` seconds per frame
    pub fn new(timestep: f32) -> Self {
        Self {
            timestep,
            frame_count: 0,
            started: Instant::now(),
        }
    }

    /// Advance one frame and return the simulation delta
    pub fn tick(&mut self) -> f32 {
        self.frame_count += 1;
        self.timestep
    }

    /// Seconds of simulation time per frame
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulation time elapsed
    #[allow(clippy::cast_precision_loss)]
    pub fn simulated_time(&self) -> f32 {
        self.frame_count as f32 * self.timestep
    }

    /// Wall-clock time since the clock was created
    pub fn wall_time(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
