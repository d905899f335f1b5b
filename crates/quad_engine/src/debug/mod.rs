//! Debugging aids

pub mod diagnostics;

pub use diagnostics::RegistryDiagnostics;
