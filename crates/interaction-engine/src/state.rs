//! Engine state machine types, run budgets, and reports.

use chrono::{DateTime, Utc};
use gameprobe_core_types::Action;
use perceiver_diff::ChangeVerdict;
use serde::{Deserialize, Serialize};

/// Lifecycle of an engine instance.
///
/// `Idle → Running → {Exhausted, Completed, Aborted}`. Terminal states are
/// never left except through [`reset`](crate::InteractionCycleEngine::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    /// Catalog built, cursor at zero, ledger empty.
    Idle,
    /// Cycles in progress.
    Running,
    /// A budget limit was hit or the catalog drained. Normal termination.
    Exhausted,
    /// The caller-requested cycle count finished.
    Completed,
    /// Contract violation (no catalog built when cycling was requested).
    Aborted,
}

impl EngineStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EngineStatus::Exhausted | EngineStatus::Completed | EngineStatus::Aborted
        )
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The elapsed-time budget ran out.
    TimeBudget,
    /// The action-count ceiling was hit.
    ActionBudget,
    /// Too many consecutive cycles observed no change.
    NoChangeStreak,
    /// Every catalog identity was escalated away.
    CatalogDrained,
    /// The requested cycle count finished.
    CyclesCompleted,
}

/// Budget for a multi-cycle run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunBudget {
    /// Wall-clock ceiling in milliseconds, checked before each cycle.
    pub time_budget_ms: u64,

    /// Optional requested cycle count; reaching it completes the run.
    pub cycles: Option<u32>,
}

impl RunBudget {
    /// A time-bounded budget.
    pub fn time(time_budget_ms: u64) -> Self {
        Self {
            time_budget_ms,
            cycles: None,
        }
    }

    /// Builder: also stop after `count` cycles.
    pub fn with_cycles(mut self, count: u32) -> Self {
        self.cycles = Some(count);
        self
    }
}

/// Running counters, monotone within a run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunCounters {
    /// Actions executed, including failed ones.
    pub total_executed: u32,

    /// Actions the actuator reported successful.
    pub succeeded: u32,

    /// Actions judged to have changed page state.
    pub state_changes: u32,

    /// Current streak of observed cycles without a state change.
    pub consecutive_no_change: u32,
}

/// Outcome of a single cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleOutcome {
    /// The executed action with its result attached; `None` when the cycle
    /// was skipped because the engine is exhausted.
    pub action: Option<Action>,

    /// Whether a state change was observed this cycle.
    pub changed: bool,

    /// The detector's judgment; absent on the fast-fail path and on
    /// skipped cycles.
    pub verdict: Option<ChangeVerdict>,
}

impl CycleOutcome {
    pub(crate) fn skipped() -> Self {
        Self {
            action: None,
            changed: false,
            verdict: None,
        }
    }

    pub(crate) fn failed(action: Action) -> Self {
        Self {
            action: Some(action),
            changed: false,
            verdict: None,
        }
    }

    pub(crate) fn observed(action: Action, verdict: ChangeVerdict) -> Self {
        Self {
            changed: verdict.changed,
            action: Some(action),
            verdict: Some(verdict),
        }
    }

    /// Whether an action was actually executed this cycle.
    pub fn executed(&self) -> bool {
        self.action.is_some()
    }
}

/// Summary of a finished multi-cycle run.
///
/// Hitting a budget or exhausting the catalog is a successful run from the
/// engine's point of view: the report says what happened, the playability
/// judgment belongs to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Final engine status.
    pub status: EngineStatus,

    /// What ended the run.
    pub stop_reason: StopReason,

    /// Cycles attempted.
    pub cycles: u32,

    /// Actions executed, including failed ones.
    pub actions_executed: u32,

    /// Actions the actuator reported successful.
    pub actions_succeeded: u32,

    /// Actions judged to have changed page state.
    pub state_changes: u32,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run finished.
    pub finished_at: DateTime<Utc>,

    /// Total run time in milliseconds.
    pub elapsed_ms: u64,
}
