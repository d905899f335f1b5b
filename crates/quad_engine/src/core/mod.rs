//! # Core Engine Module
//!
//! Shared configuration used by every engine subsystem.
//!
//! ## Organization
//!
//! - **Config**: Engine and collision configuration, loadable from TOML/RON

pub mod config;

// Re-export commonly used config types
pub use config::{
    CollisionConfig,
    EngineConfig,
    Config,
    ConfigError,
};
