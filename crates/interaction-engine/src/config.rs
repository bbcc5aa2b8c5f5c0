//! Configuration for interaction-cycle runs.

use serde::{Deserialize, Serialize};

/// Configuration for the interaction-cycle engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hard ceiling on executed actions per run.
    /// Default: 50
    pub max_actions_per_run: u32,

    /// Consecutive observed no-change cycles before the run is considered
    /// exhausted.
    /// Default: 3
    pub max_consecutive_no_change: u32,

    /// Fixed pause after a successful action, letting asynchronous page
    /// reactions land before re-observing.
    /// Default: 800 ms
    pub settle_delay_ms: u64,

    /// Pause before the single discovery retry in the observe-first
    /// variant.
    /// Default: 2000 ms
    pub discovery_retry_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_actions_per_run: 50,
            max_consecutive_no_change: 3,
            settle_delay_ms: 800,
            discovery_retry_delay_ms: 2_000,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a minimal config for testing: tiny delays, small budget.
    pub fn minimal() -> Self {
        Self {
            max_actions_per_run: 10,
            max_consecutive_no_change: 3,
            settle_delay_ms: 5,
            discovery_retry_delay_ms: 10,
        }
    }

    /// Builder: set the action ceiling.
    pub fn max_actions(mut self, count: u32) -> Self {
        self.max_actions_per_run = count;
        self
    }

    /// Builder: set the no-change exhaustion limit.
    pub fn no_change_limit(mut self, count: u32) -> Self {
        self.max_consecutive_no_change = count;
        self
    }

    /// Builder: set the settle delay.
    pub fn settle_delay(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Builder: set the discovery retry delay.
    pub fn discovery_retry_delay(mut self, ms: u64) -> Self {
        self.discovery_retry_delay_ms = ms;
        self
    }
}
