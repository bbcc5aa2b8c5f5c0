//! A deterministic stand-in for a real browser page.
//!
//! The simulated game advances an internal frame counter when it receives
//! an input it is configured to respond to, and exposes snapshots whose
//! fingerprint tracks that counter. The CLI and the integration tests use
//! it in place of the excluded browser transport.

use std::collections::HashSet;

use action_catalog::keys::{CANVAS_CENTER, FIRST_BUTTON};
use async_trait::async_trait;
use gameprobe_core_types::{
    Action, ActionKind, ActionResult, GameDescriptor, PerceptionSnapshot,
};
use interaction_engine::{Actuator, ActuatorError, PerceptionError, PerceptionSource};
use tokio::sync::Mutex;
use tracing::trace;

#[derive(Debug, Default)]
struct SimState {
    frame: u64,
    started: bool,
}

/// Deterministic game double implementing both capability ports.
pub struct SimulatedGame {
    responsive_keys: HashSet<String>,
    state: Mutex<SimState>,
}

impl SimulatedGame {
    /// A game responding to exactly the given keys.
    pub fn new(responsive_keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responsive_keys: responsive_keys.into_iter().map(Into::into).collect(),
            state: Mutex::new(SimState::default()),
        }
    }

    /// A game that honors the descriptor's candidate keys, i.e. one where
    /// the upstream analysis guessed right.
    pub fn from_descriptor(descriptor: &GameDescriptor) -> Self {
        Self::new(descriptor.candidate_keys.iter().cloned())
    }

    /// Current frame counter.
    pub async fn frame(&self) -> u64 {
        self.state.lock().await.frame
    }
}

#[async_trait]
impl Actuator for SimulatedGame {
    async fn execute(&self, action: &Action) -> Result<ActionResult, ActuatorError> {
        let mut state = self.state.lock().await;
        match action.kind {
            ActionKind::Key => {
                let key = action.value.as_deref().unwrap_or_default();
                if self.responsive_keys.contains(key) {
                    state.frame += 1;
                    state.started = true;
                    trace!(key, frame = state.frame, "simulated game reacted");
                }
                // An unresponsive key still lands: the press succeeds, the
                // page just ignores it.
                Ok(ActionResult::success(1))
            }
            ActionKind::Click => match action.target.as_deref() {
                Some(FIRST_BUTTON) => {
                    if !state.started {
                        state.started = true;
                        state.frame += 1;
                    }
                    Ok(ActionResult::success(1))
                }
                Some(CANVAS_CENTER) => Ok(ActionResult::success(1)),
                Some(other) => Ok(ActionResult::failure(
                    format!("no element matches {other}"),
                    1,
                )),
                None => Err(ActuatorError::TargetNotFound("click without target".into())),
            },
            ActionKind::Type => Ok(ActionResult::success(1)),
            // The simulated page reacts instantly; waits are not slept.
            ActionKind::Wait => Ok(ActionResult::success(action.duration_ms.unwrap_or(0))),
        }
    }
}

#[async_trait]
impl PerceptionSource for SimulatedGame {
    async fn snapshot(&self) -> Result<PerceptionSnapshot, PerceptionError> {
        let state = self.state.lock().await;
        let element_count = 24 + if state.started { 1 } else { 0 };
        let mut snapshot = PerceptionSnapshot::structural(
            format!("frame-{}", state.frame),
            element_count,
            Some(format!("<canvas data-frame=\"{}\">", state.frame)),
            Some(format!("Score: {}", state.frame * 10)),
        );
        // Synthetic capture bytes so the artifact strategy works too.
        snapshot.artifact = Some(format!("frame:{}", state.frame).into_bytes());
        Ok(snapshot)
    }

    async fn discover(&self) -> Result<Vec<Action>, PerceptionError> {
        let state = self.state.lock().await;
        if state.started {
            Ok(Vec::new())
        } else {
            // A start button is visible until the game is running.
            Ok(vec![Action::click(FIRST_BUTTON)])
        }
    }
}
