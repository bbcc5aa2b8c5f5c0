//! State-change detection over perception snapshots.
//!
//! Two interchangeable strategies are provided: [`ArtifactDetector`]
//! compares opaque capture bytes (screenshots), [`StructuralDetector`]
//! compares page-derived fingerprints. A caller selects one strategy per
//! run and must not mix them — snapshots are only comparable within the
//! strategy that produced them.

pub mod artifact;
pub mod model;
pub mod structural;

use gameprobe_core_types::PerceptionSnapshot;

pub use artifact::ArtifactDetector;
pub use model::ChangeVerdict;
pub use structural::StructuralDetector;

/// Relative delta (size or element count) above which a difference counts
/// as strong evidence of a meaningful change rather than encoder noise.
pub const RELATIVE_DELTA_THRESHOLD: f64 = 0.05;

/// Compares two snapshots of the same strategy and judges whether the page
/// state changed between them.
pub trait ChangeDetector: Send + Sync {
    fn compare(&self, before: &PerceptionSnapshot, after: &PerceptionSnapshot) -> ChangeVerdict;

    /// Strategy name, for logs and reports.
    fn name(&self) -> &'static str;
}

/// Relative delta between two magnitudes, against the `before` baseline.
pub(crate) fn relative_delta(before: u64, after: u64) -> f64 {
    let base = before.max(1) as f64;
    (before.abs_diff(after)) as f64 / base
}

/// Shared degradation check: a missing snapshot is never evidence of
/// change.
pub(crate) fn unavailable_verdict(
    before: &PerceptionSnapshot,
    after: &PerceptionSnapshot,
) -> Option<ChangeVerdict> {
    if !before.is_available() {
        return Some(ChangeVerdict::no_evidence(format!(
            "before snapshot unavailable: {}",
            before.failure.as_deref().unwrap_or("unknown")
        )));
    }
    if !after.is_available() {
        return Some(ChangeVerdict::no_evidence(format!(
            "after snapshot unavailable: {}",
            after.failure.as_deref().unwrap_or("unknown")
        )));
    }
    None
}
