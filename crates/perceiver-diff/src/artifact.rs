//! Byte-artifact comparison strategy.
//!
//! Works from opaque capture bytes (typically screenshots), which makes it
//! the strategy of choice for canvas and WebGL games where the DOM barely
//! moves. Identical bytes are strong evidence of no change; differing bytes
//! are weighted by how much the artifact size moved, since a tiny delta is
//! often just encoder noise.

use gameprobe_core_types::PerceptionSnapshot;
use tracing::trace;

use crate::model::ChangeVerdict;
use crate::{relative_delta, unavailable_verdict, ChangeDetector, RELATIVE_DELTA_THRESHOLD};

#[derive(Debug, Default)]
pub struct ArtifactDetector;

impl ArtifactDetector {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeDetector for ArtifactDetector {
    fn compare(&self, before: &PerceptionSnapshot, after: &PerceptionSnapshot) -> ChangeVerdict {
        if let Some(verdict) = unavailable_verdict(before, after) {
            return verdict;
        }

        let (Some(before_bytes), Some(after_bytes)) = (&before.artifact, &after.artifact) else {
            return ChangeVerdict::no_evidence("artifact bytes missing on one side");
        };

        if before_bytes == after_bytes {
            return ChangeVerdict::unchanged(95, "identical artifact bytes");
        }

        let delta = relative_delta(before_bytes.len() as u64, after_bytes.len() as u64);
        trace!(delta, "artifact bytes differ");
        if delta > RELATIVE_DELTA_THRESHOLD {
            ChangeVerdict::changed(
                85,
                format!("artifact size moved {:.1}%", delta * 100.0),
            )
        } else {
            ChangeVerdict::changed(
                60,
                "artifact bytes differ with near-identical size".to_string(),
            )
        }
    }

    fn name(&self) -> &'static str {
        "artifact"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(bytes: &[u8]) -> PerceptionSnapshot {
        PerceptionSnapshot::from_artifact(bytes.to_vec())
    }

    #[test]
    fn identical_snapshot_is_unchanged() {
        let detector = ArtifactDetector::new();
        let snap = snapshot(&[1, 2, 3, 4]);

        let verdict = detector.compare(&snap, &snap);
        assert!(!verdict.changed);
        assert_eq!(verdict.confidence, 95);
    }

    #[test]
    fn large_size_delta_is_high_confidence_change() {
        let detector = ArtifactDetector::new();
        let before = snapshot(&vec![0u8; 100]);
        let after = snapshot(&vec![1u8; 120]);

        let verdict = detector.compare(&before, &after);
        assert!(verdict.changed);
        assert_eq!(verdict.confidence, 85);
    }

    #[test]
    fn small_size_delta_is_weak_change() {
        let detector = ArtifactDetector::new();
        let before = snapshot(&vec![0u8; 100]);
        // Same length, different content: 0% size delta.
        let after = snapshot(&vec![1u8; 100]);

        let verdict = detector.compare(&before, &after);
        assert!(verdict.changed);
        assert_eq!(verdict.confidence, 60);
    }

    #[test]
    fn unavailable_snapshot_is_no_evidence() {
        let detector = ArtifactDetector::new();
        let ok = snapshot(&[1, 2, 3]);
        let failed = PerceptionSnapshot::unavailable("capture timed out");

        for (a, b) in [(&failed, &ok), (&ok, &failed)] {
            let verdict = detector.compare(a, b);
            assert!(!verdict.changed);
            assert_eq!(verdict.confidence, 0);
        }
    }

    #[test]
    fn missing_bytes_is_no_evidence() {
        let detector = ArtifactDetector::new();
        let with_bytes = snapshot(&[1, 2, 3]);
        let structural = PerceptionSnapshot::structural("fp", 10, None, None);

        let verdict = detector.compare(&with_bytes, &structural);
        assert!(!verdict.changed);
        assert_eq!(verdict.confidence, 0);
    }
}
