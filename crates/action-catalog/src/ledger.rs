//! Per-identity consecutive-failure bookkeeping with an escalation policy.

use std::collections::HashMap;

use gameprobe_core_types::ActionIdentity;
use tracing::debug;

/// Failures beyond this count escalate the identity.
const ESCALATION_THRESHOLD: u32 = 2;

/// Tracks consecutive failures per action identity.
///
/// Entries are cleared on success and evicted on escalation, so the ledger
/// never holds more entries than the catalog has identities — memory is
/// bounded by catalog size, not run length. Escalation is the engine's only
/// backpressure mechanism: there is no exponential backoff, since each
/// action already costs a fixed, small time budget.
#[derive(Debug, Default)]
pub struct RetryLedger {
    failures: HashMap<ActionIdentity, u32>,
}

impl RetryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more consecutive failure and return the new count.
    pub fn record_failure(&mut self, identity: &ActionIdentity) -> u32 {
        let count = self.failures.entry(identity.clone()).or_insert(0);
        *count += 1;
        debug!(identity = %identity, count = *count, "action failure recorded");
        *count
    }

    /// Clear the entry: one success resets the counter to zero.
    pub fn record_success(&mut self, identity: &ActionIdentity) {
        self.failures.remove(identity);
    }

    /// Whether the identity has failed often enough to be abandoned for the
    /// remainder of the run.
    pub fn should_escalate(&self, identity: &ActionIdentity) -> bool {
        self.failures(identity) > ESCALATION_THRESHOLD
    }

    /// Drop the entry entirely; the caller is moving past this action.
    pub fn evict(&mut self, identity: &ActionIdentity) {
        self.failures.remove(identity);
    }

    /// Current consecutive-failure count for the identity.
    pub fn failures(&self, identity: &ActionIdentity) -> u32 {
        self.failures.get(identity).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}
