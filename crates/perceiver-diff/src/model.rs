use serde::{Deserialize, Serialize};

/// Judgment on whether an action caused a real state change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChangeVerdict {
    /// Whether the page state changed between the snapshots.
    pub changed: bool,

    /// Confidence in the judgment, 0..=100.
    pub confidence: u8,

    /// Human-readable evidence summary.
    pub description: String,
}

impl ChangeVerdict {
    pub fn changed(confidence: u8, description: impl Into<String>) -> Self {
        Self {
            changed: true,
            confidence,
            description: description.into(),
        }
    }

    pub fn unchanged(confidence: u8, description: impl Into<String>) -> Self {
        Self {
            changed: false,
            confidence,
            description: description.into(),
        }
    }

    /// Zero-confidence no-change verdict for when comparison material is
    /// missing. A failed capture must never be read as a change.
    pub fn no_evidence(description: impl Into<String>) -> Self {
        Self::unchanged(0, description)
    }
}
