//! Shared value types for the gameprobe interaction core.
//!
//! Everything here is a plain, serializable value: actions and their
//! execution results, the control descriptor delivered by the upstream
//! game-analysis step, and the perception snapshots the change detectors
//! compare. No component logic lives in this crate.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier attached to every issued action, for tracing and
/// evidence correlation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Primitive instruction kinds the engine can issue.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Click,
    Type,
    Key,
    Wait,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Click => "click",
            ActionKind::Type => "type",
            ActionKind::Key => "key",
            ActionKind::Wait => "wait",
        };
        write!(f, "{name}")
    }
}

/// Identity used for failure tracking and retry bookkeeping.
///
/// Two actions share an identity when they have the same kind and the same
/// value (falling back to the target when no value is set). Catalog entries
/// and their reissued copies therefore map onto one ledger entry.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionIdentity {
    pub kind: ActionKind,
    pub token: Option<String>,
}

impl fmt::Display for ActionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "{}:{}", self.kind, token),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Outcome of executing a single action.
///
/// Always produced, even on failure: a failed execution is represented as
/// data, never surfaced as an error past the engine boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the actuator reported success.
    pub success: bool,

    /// Failure detail (if failed).
    pub error: Option<String>,

    /// When execution finished.
    pub executed_at: DateTime<Utc>,

    /// Wall-clock execution time in milliseconds.
    pub duration_ms: u64,
}

impl ActionResult {
    /// Create a successful result.
    pub fn success(duration_ms: u64) -> Self {
        Self {
            success: true,
            error: None,
            executed_at: Utc::now(),
            duration_ms,
        }
    }

    /// Create a failed result carrying the failure reason.
    pub fn failure(error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            executed_at: Utc::now(),
            duration_ms,
        }
    }
}

/// One primitive instruction the engine can issue against a page.
///
/// Immutable once created, except for `result`, which is attached exactly
/// once after execution via [`Action::complete`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Action {
    /// Unique id of this issued instance.
    pub id: ActionId,

    /// Instruction kind.
    pub kind: ActionKind,

    /// Element or region the action addresses (clicks, typing).
    pub target: Option<String>,

    /// Key name or text payload.
    pub value: Option<String>,

    /// Duration for wait actions, in milliseconds.
    pub duration_ms: Option<u64>,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Execution outcome, attached exactly once.
    pub result: Option<ActionResult>,
}

impl Action {
    fn new(kind: ActionKind) -> Self {
        Self {
            id: ActionId::new(),
            kind,
            target: None,
            value: None,
            duration_ms: None,
            created_at: Utc::now(),
            result: None,
        }
    }

    /// A key press.
    pub fn key(key: impl Into<String>) -> Self {
        let mut action = Self::new(ActionKind::Key);
        action.value = Some(key.into());
        action
    }

    /// A click on the given target.
    pub fn click(target: impl Into<String>) -> Self {
        let mut action = Self::new(ActionKind::Click);
        action.target = Some(target.into());
        action
    }

    /// Typing text into the given target.
    pub fn type_text(target: impl Into<String>, text: impl Into<String>) -> Self {
        let mut action = Self::new(ActionKind::Type);
        action.target = Some(target.into());
        action.value = Some(text.into());
        action
    }

    /// A neutral wait.
    pub fn wait(duration_ms: u64) -> Self {
        let mut action = Self::new(ActionKind::Wait);
        action.duration_ms = Some(duration_ms);
        action
    }

    /// Identity for failure tracking: kind plus value-or-target.
    pub fn identity(&self) -> ActionIdentity {
        ActionIdentity {
            kind: self.kind,
            token: self.value.clone().or_else(|| self.target.clone()),
        }
    }

    /// Attach the execution result. Must be called at most once.
    pub fn complete(mut self, result: ActionResult) -> Self {
        debug_assert!(self.result.is_none(), "result attached twice");
        self.result = Some(result);
        self
    }

    /// A fresh copy of this action template with a new id, creation time,
    /// and no result. Catalog entries are reissued per execution so every
    /// committed action carries exactly one result.
    pub fn reissue(&self) -> Self {
        Self {
            id: ActionId::new(),
            created_at: Utc::now(),
            result: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Wait => write!(f, "wait({}ms)", self.duration_ms.unwrap_or(0)),
            _ => write!(f, "{}", self.identity()),
        }
    }
}

/// How the page under test renders its play area.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderingKind {
    Canvas,
    Dom,
    WebGl,
    Mixed,
    Unknown,
}

impl Default for RenderingKind {
    fn default() -> Self {
        RenderingKind::Unknown
    }
}

/// Pointer gestures the analysis step believes the game responds to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Click,
    Drag,
    Scroll,
    Hover,
}

/// Hint for how the game is likely started.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartHint {
    Button,
    Key,
    Auto,
}

impl Default for StartHint {
    fn default() -> Self {
        StartHint::Auto
    }
}

/// Heuristic description of a game's likely controls, produced by the
/// upstream analysis collaborator. Read-only to the core; never mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameDescriptor {
    /// Display name of the game under test.
    pub name: String,

    /// Rendering classification.
    #[serde(default)]
    pub rendering: RenderingKind,

    /// Ordered candidate keys, most promising first.
    #[serde(default)]
    pub candidate_keys: Vec<String>,

    /// Pointer gestures the game plausibly supports.
    #[serde(default)]
    pub candidate_gestures: Vec<Gesture>,

    /// How the game is likely started.
    #[serde(default)]
    pub start_hint: StartHint,

    /// Label of the start control, when the analysis found one.
    #[serde(default)]
    pub start_label: Option<String>,

    /// Analysis confidence, 0..=100.
    #[serde(default)]
    pub confidence: u8,
}

impl GameDescriptor {
    /// A descriptor with nothing but a name: unknown rendering, no known
    /// keys or gestures, auto start. The catalog builder still produces a
    /// usable catalog from this.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rendering: RenderingKind::Unknown,
            candidate_keys: Vec::new(),
            candidate_gestures: Vec::new(),
            start_hint: StartHint::Auto,
            start_label: None,
            confidence: 0,
        }
    }

    pub fn has_gesture(&self, gesture: Gesture) -> bool {
        self.candidate_gestures.contains(&gesture)
    }
}

/// A comparable fingerprint of observed page state at one instant.
///
/// Depending on which perception strategy produced it, the snapshot carries
/// page-derived comparison material (markup and text prefixes) or an opaque
/// byte artifact such as a screenshot. Snapshots from different strategies
/// are not comparable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerceptionSnapshot {
    /// Structural hash of the observed state.
    pub fingerprint: String,

    /// Coarse element count metric.
    pub element_count: u32,

    /// Capture time.
    pub captured_at: DateTime<Utc>,

    /// Truncated serialized markup (structural strategy).
    pub markup_prefix: Option<String>,

    /// Truncated visible text (structural strategy).
    pub text_prefix: Option<String>,

    /// Opaque capture bytes (artifact strategy).
    pub artifact: Option<Vec<u8>>,

    /// Capture failure reason; set when the snapshot is unavailable.
    pub failure: Option<String>,
}

impl PerceptionSnapshot {
    /// A page-derived snapshot.
    pub fn structural(
        fingerprint: impl Into<String>,
        element_count: u32,
        markup_prefix: Option<String>,
        text_prefix: Option<String>,
    ) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            element_count,
            captured_at: Utc::now(),
            markup_prefix,
            text_prefix,
            artifact: None,
            failure: None,
        }
    }

    /// A snapshot built from an opaque byte artifact. The fingerprint is a
    /// content hash of the bytes.
    pub fn from_artifact(bytes: Vec<u8>) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Self {
            fingerprint: format!("{:016x}", hasher.finish()),
            element_count: 0,
            captured_at: Utc::now(),
            markup_prefix: None,
            text_prefix: None,
            artifact: Some(bytes),
            failure: None,
        }
    }

    /// A placeholder for a failed capture. Never treated as evidence of
    /// change by the detectors.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            fingerprint: String::new(),
            element_count: 0,
            captured_at: Utc::now(),
            markup_prefix: None,
            text_prefix: None,
            artifact: None,
            failure: Some(reason.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.failure.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_actions_share_identity_across_reissue() {
        let template = Action::key("ArrowUp");
        let reissued = template.reissue();
        assert_eq!(template.identity(), reissued.identity());
        assert_ne!(template.id, reissued.id);
        assert!(reissued.result.is_none());
    }

    #[test]
    fn identity_falls_back_to_target() {
        let click = Action::click("first-button");
        assert_eq!(click.identity().token.as_deref(), Some("first-button"));

        let typed = Action::type_text("input", "hello");
        assert_eq!(typed.identity().token.as_deref(), Some("hello"));
    }

    #[test]
    fn complete_attaches_result() {
        let action = Action::key("Space").complete(ActionResult::success(12));
        let result = action.result.expect("result attached");
        assert!(result.success);
        assert_eq!(result.duration_ms, 12);
    }

    #[test]
    fn artifact_snapshots_hash_content() {
        let a = PerceptionSnapshot::from_artifact(vec![1, 2, 3]);
        let b = PerceptionSnapshot::from_artifact(vec![1, 2, 3]);
        let c = PerceptionSnapshot::from_artifact(vec![9, 9, 9]);
        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.fingerprint, c.fingerprint);
    }

    #[test]
    fn unavailable_snapshot_is_flagged() {
        let snap = PerceptionSnapshot::unavailable("capture timed out");
        assert!(!snap.is_available());
        assert!(snap.fingerprint.is_empty());
    }

    #[test]
    fn descriptor_deserializes_with_sparse_fields() {
        let descriptor: GameDescriptor =
            serde_json::from_str(r#"{"name": "mystery"}"#).expect("sparse descriptor");
        assert_eq!(descriptor.rendering, RenderingKind::Unknown);
        assert_eq!(descriptor.start_hint, StartHint::Auto);
        assert!(descriptor.candidate_keys.is_empty());
    }
}
