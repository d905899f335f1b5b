//! Collision registry diagnostics
//!
//! Plain-text summary for logs and debug overlays. The format is meant for
//! people and may change; do not parse it.

use std::fmt;

/// Snapshot of registry counts and flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryDiagnostics {
    /// Registered colliders
    pub colliders: usize,
    /// Registered collision handlers
    pub handlers: usize,
    /// Whether a safe-mode step is iterating
    pub loop_active: bool,
    /// Strict reentrancy handling
    pub safe_mode: bool,
    /// Step reports trigger colliders only
    pub triggers_only: bool,
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

impl fmt::Display for RegistryDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CollisionRegistry: {}, {} ({} mode, {}",
            plural(self.colliders, "collider"),
            plural(self.handlers, "handler"),
            if self.safe_mode { "safe" } else { "permissive" },
            if self.loop_active { "stepping" } else { "idle" },
        )?;
        if self.triggers_only {
            write!(f, ", triggers only")?;
        }
        write!(f, ")")
    }
}
