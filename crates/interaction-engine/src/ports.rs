//! Capability ports the engine consumes.
//!
//! Both ports are explicit typed interfaces: an implementation reports
//! failure through its `Result`, and the engine converts that failure into
//! data (a failed action result, an unavailable snapshot). Nothing an
//! implementation returns can abort a run.

use async_trait::async_trait;
use gameprobe_core_types::{Action, ActionResult, PerceptionSnapshot};

use crate::errors::{ActuatorError, PerceptionError};

/// Executes primitive actions against the page under test.
///
/// Implementations are expected to enforce their own per-action timeout
/// (3–20 s depending on action kind) and to prefer returning a failed
/// `ActionResult` over an `Err`; the engine treats both identically.
#[async_trait]
pub trait Actuator: Send + Sync {
    async fn execute(&self, action: &Action) -> Result<ActionResult, ActuatorError>;
}

/// Produces perception snapshots of the page under test.
#[async_trait]
pub trait PerceptionSource: Send + Sync {
    /// Capture a snapshot, best-effort.
    async fn snapshot(&self) -> Result<PerceptionSnapshot, PerceptionError>;

    /// Discover currently visible candidate actions (DOM or vision based).
    /// Used by the observe-first cycle variant; the default implementation
    /// discovers nothing.
    async fn discover(&self) -> Result<Vec<Action>, PerceptionError> {
        Ok(Vec::new())
    }
}
