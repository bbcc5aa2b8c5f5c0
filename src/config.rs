//! Probe run settings, loadable from a YAML file.

use std::path::Path;

use anyhow::{Context, Result};
use interaction_engine::{EngineConfig, RunBudget};
use serde::{Deserialize, Serialize};

/// Settings for one probe run. Every field has a default, so a settings
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Hard ceiling on executed actions per run.
    #[serde(default = "defaults::max_actions_per_run")]
    pub max_actions_per_run: u32,

    /// Consecutive no-change cycles before giving up.
    #[serde(default = "defaults::max_consecutive_no_change")]
    pub max_consecutive_no_change: u32,

    /// Settle delay after a successful action, milliseconds.
    #[serde(default = "defaults::settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Delay before the single discovery retry, milliseconds.
    #[serde(default = "defaults::discovery_retry_delay_ms")]
    pub discovery_retry_delay_ms: u64,

    /// Wall-clock budget for a run, milliseconds.
    #[serde(default = "defaults::time_budget_ms")]
    pub time_budget_ms: u64,
}

mod defaults {
    pub fn max_actions_per_run() -> u32 {
        50
    }
    pub fn max_consecutive_no_change() -> u32 {
        3
    }
    pub fn settle_delay_ms() -> u64 {
        800
    }
    pub fn discovery_retry_delay_ms() -> u64 {
        2_000
    }
    pub fn time_budget_ms() -> u64 {
        30_000
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_actions_per_run: defaults::max_actions_per_run(),
            max_consecutive_no_change: defaults::max_consecutive_no_change(),
            settle_delay_ms: defaults::settle_delay_ms(),
            discovery_retry_delay_ms: defaults::discovery_retry_delay_ms(),
            time_budget_ms: defaults::time_budget_ms(),
        }
    }
}

impl ProbeSettings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing settings file {}", path.display()))
    }

    /// Engine configuration derived from these settings.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .max_actions(self.max_actions_per_run)
            .no_change_limit(self.max_consecutive_no_change)
            .settle_delay(self.settle_delay_ms)
            .discovery_retry_delay(self.discovery_retry_delay_ms)
    }

    /// Run budget derived from these settings.
    pub fn budget(&self) -> RunBudget {
        RunBudget::time(self.time_budget_ms)
    }
}
