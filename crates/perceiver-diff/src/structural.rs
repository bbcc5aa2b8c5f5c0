//! Page-derived comparison strategy.
//!
//! Works from structural fingerprints: hash, truncated markup, truncated
//! visible text, element count. Any textual difference is a high-confidence
//! change; when all three texts agree, the element count still catches
//! bulk DOM growth (spawned sprites, score list rows).

use gameprobe_core_types::PerceptionSnapshot;
use tracing::trace;

use crate::model::ChangeVerdict;
use crate::{relative_delta, unavailable_verdict, ChangeDetector, RELATIVE_DELTA_THRESHOLD};

#[derive(Debug, Default)]
pub struct StructuralDetector;

impl StructuralDetector {
    pub fn new() -> Self {
        Self
    }
}

impl ChangeDetector for StructuralDetector {
    fn compare(&self, before: &PerceptionSnapshot, after: &PerceptionSnapshot) -> ChangeVerdict {
        if let Some(verdict) = unavailable_verdict(before, after) {
            return verdict;
        }

        if before.fingerprint != after.fingerprint {
            return ChangeVerdict::changed(90, "fingerprint differs");
        }
        if before.markup_prefix != after.markup_prefix {
            return ChangeVerdict::changed(90, "markup prefix differs");
        }
        if before.text_prefix != after.text_prefix {
            return ChangeVerdict::changed(90, "visible text differs");
        }

        let delta = relative_delta(before.element_count as u64, after.element_count as u64);
        trace!(delta, "structural texts identical");
        if delta > RELATIVE_DELTA_THRESHOLD {
            return ChangeVerdict::changed(
                90,
                format!(
                    "element count moved {} -> {}",
                    before.element_count, after.element_count
                ),
            );
        }

        ChangeVerdict::unchanged(85, "structure unchanged")
    }

    fn name(&self) -> &'static str {
        "structural"
    }
}
