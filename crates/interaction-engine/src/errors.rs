//! Error taxonomy for the engine boundary.
//!
//! In-run actuator and perception failures are local and recoverable: they
//! become failed action results or unavailable snapshots, never errors. The
//! only hard failure the engine surfaces is a configuration/contract
//! violation.

use thiserror::Error;

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A capability port is missing or the engine was driven outside its
    /// contract (for example cycling before a catalog was built).
    #[error("engine configuration error: {0}")]
    Configuration(String),
}

/// Typed failure from an actuator implementation. Converted to a failed
/// `ActionResult` at the engine boundary.
#[derive(Debug, Error)]
pub enum ActuatorError {
    /// The action exceeded the actuator's per-action timeout.
    #[error("action timed out after {0}ms")]
    Timeout(u64),

    /// The action's target could not be located.
    #[error("target not found: {0}")]
    TargetNotFound(String),

    /// The underlying transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The actuator does not implement this action kind.
    #[error("unsupported action: {0}")]
    Unsupported(String),
}

/// Typed failure from a perception source. Degrades to an unavailable
/// snapshot (or an empty discovery) at the engine boundary.
#[derive(Debug, Error)]
pub enum PerceptionError {
    /// Snapshot capture failed.
    #[error("capture failed: {0}")]
    CaptureFailed(String),

    /// Action discovery failed.
    #[error("discovery failed: {0}")]
    DiscoveryFailed(String),

    /// The underlying transport failed.
    #[error("transport error: {0}")]
    Transport(String),
}
