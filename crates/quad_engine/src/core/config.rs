//! # Engine Configuration
//!
//! Configuration structures for the engine and its collision subsystem.
//! Every structure is serde-derived and implements [`Config`], so it can be
//! loaded from TOML or RON files. Missing fields fall back to defaults.

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Collision Configuration
///
/// Controls how the collision registry guards and filters its frame step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Strict reentrancy guard. When set, mutating the registry from inside a
    /// collision callback is an error; when cleared, such mutations are
    /// postponed until the step finishes.
    pub safe_mode: bool,
    /// Frame step reports overlaps against trigger colliders only
    pub triggers_only: bool,
    /// Projected sweep velocities at or below this magnitude count as zero
    pub velocity_epsilon: f32,
}

impl CollisionConfig {
    /// Create a collision configuration with defaults
    pub fn new() -> Self {
        Self {
            safe_mode: true,
            triggers_only: false,
            velocity_epsilon: 1e-6,
        }
    }

    /// Enable or disable the strict reentrancy guard
    pub fn with_safe_mode(mut self, enabled: bool) -> Self {
        self.safe_mode = enabled;
        self
    }

    /// Restrict the frame step to trigger colliders
    pub fn with_triggers_only(mut self, enabled: bool) -> Self {
        self.triggers_only = enabled;
        self
    }

    /// Set the zero-velocity threshold used by sweeps
    pub fn with_velocity_epsilon(mut self, epsilon: f32) -> Self {
        self.velocity_epsilon = epsilon;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.velocity_epsilon.is_finite() || self.velocity_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "velocity_epsilon must be a finite non-negative number, got {}",
                self.velocity_epsilon
            )));
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for CollisionConfig {}

/// # Engine Configuration
///
/// Core engine behavior: logging, frame timing and the collision subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Simulation seconds per frame
    pub fixed_timestep: f32,
    /// Stop the main loop after this many frames (unlimited when `None`)
    pub max_frames: Option<u64>,
    /// Collision subsystem configuration
    pub collision: CollisionConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: 1.0 / 60.0,
            max_frames: None,
            collision: CollisionConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the fixed timestep
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = seconds;
        self
    }

    /// Bound the number of frames the main loop runs
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Set the collision configuration
    pub fn with_collision(mut self, collision: CollisionConfig) -> Self {
        self.collision = collision;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be positive, got {}",
                self.fixed_timestep
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level cannot be empty".to_string()));
        }
        self.collision.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
