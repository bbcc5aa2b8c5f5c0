//! The interaction-cycle engine: catalog-driven observe→act→wait→observe
//! loops with failure escalation and budget-bounded termination.
//!
//! One engine instance drives one page under test; cycles are strictly
//! sequential (`&mut self`), so a run is a deterministic trace given
//! deterministic actuator and perception responses.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use action_catalog::variations::VARIATION_WAIT_MS;
use action_catalog::{variations_for, CatalogBuilder, RetryLedger};
use gameprobe_core_types::{
    Action, ActionIdentity, ActionKind, ActionResult, GameDescriptor, PerceptionSnapshot,
};
use perceiver_diff::{ChangeDetector, StructuralDetector};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::ports::{Actuator, PerceptionSource};
use crate::state::{CycleOutcome, EngineStatus, RunBudget, RunCounters, RunReport, StopReason};

/// Builder for [`InteractionCycleEngine`].
///
/// A missing actuator or perception source is the one hard failure the
/// engine surfaces, and it surfaces here, at construction time.
pub struct EngineBuilder {
    config: EngineConfig,
    actuator: Option<Arc<dyn Actuator>>,
    perception: Option<Arc<dyn PerceptionSource>>,
    detector: Option<Arc<dyn ChangeDetector>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            actuator: None,
            perception: None,
            detector: None,
        }
    }

    /// Set the engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the actuator capability.
    pub fn actuator(mut self, actuator: Arc<dyn Actuator>) -> Self {
        self.actuator = Some(actuator);
        self
    }

    /// Set the perception capability.
    pub fn perception(mut self, perception: Arc<dyn PerceptionSource>) -> Self {
        self.perception = Some(perception);
        self
    }

    /// Set the change-detection strategy. Defaults to the structural
    /// strategy when not set.
    pub fn detector(mut self, detector: Arc<dyn ChangeDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn build(self) -> Result<InteractionCycleEngine, EngineError> {
        let actuator = self
            .actuator
            .ok_or_else(|| EngineError::Configuration("actuator not set".to_string()))?;
        let perception = self
            .perception
            .ok_or_else(|| EngineError::Configuration("perception source not set".to_string()))?;
        let detector = self
            .detector
            .unwrap_or_else(|| Arc::new(StructuralDetector::new()));

        Ok(InteractionCycleEngine {
            config: self.config,
            actuator,
            perception,
            detector,
            catalog: Vec::new(),
            descriptor: None,
            cursor: 0,
            pending: VecDeque::new(),
            escalated: HashSet::new(),
            ledger: RetryLedger::new(),
            status: EngineStatus::Idle,
            action_history: Vec::new(),
            state_history: Vec::new(),
            counters: RunCounters::default(),
            started_at: None,
            exhaustion_reason: None,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives bounded interaction cycles against one page under test.
///
/// Create one instance per run via [`InteractionCycleEngine::builder`],
/// call [`build_catalog`](Self::build_catalog) with the game descriptor,
/// then either drive cycles individually with
/// [`run_cycle`](Self::run_cycle) or hand over a budget with
/// [`run_until`](Self::run_until).
pub struct InteractionCycleEngine {
    config: EngineConfig,
    actuator: Arc<dyn Actuator>,
    perception: Arc<dyn PerceptionSource>,
    detector: Arc<dyn ChangeDetector>,

    catalog: Vec<Action>,
    descriptor: Option<GameDescriptor>,
    cursor: usize,
    pending: VecDeque<Action>,
    escalated: HashSet<ActionIdentity>,
    ledger: RetryLedger,

    status: EngineStatus,
    action_history: Vec<Action>,
    state_history: Vec<PerceptionSnapshot>,
    counters: RunCounters,
    started_at: Option<Instant>,
    exhaustion_reason: Option<StopReason>,
}

impl std::fmt::Debug for InteractionCycleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionCycleEngine")
            .field("config", &self.config)
            .field("catalog", &self.catalog.len())
            .field("descriptor", &self.descriptor)
            .field("cursor", &self.cursor)
            .field("pending", &self.pending.len())
            .field("escalated", &self.escalated.len())
            .field("status", &self.status)
            .field("counters", &self.counters)
            .field("exhaustion_reason", &self.exhaustion_reason)
            .finish_non_exhaustive()
    }
}

impl InteractionCycleEngine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Build the action catalog for `descriptor`. Must be called before
    /// cycling; only valid while the engine is idle.
    pub fn build_catalog(&mut self, descriptor: &GameDescriptor) -> Result<(), EngineError> {
        if self.status != EngineStatus::Idle {
            return Err(EngineError::Configuration(
                "catalog can only be built while the engine is idle".to_string(),
            ));
        }
        self.catalog = CatalogBuilder::build(descriptor);
        self.descriptor = Some(descriptor.clone());
        self.cursor = 0;
        debug!(
            game = %descriptor.name,
            catalog = self.catalog.len(),
            "catalog installed"
        );
        Ok(())
    }

    /// Run one interaction cycle with the next catalog action.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, EngineError> {
        if let Some(skipped) = self.cycle_prelude()? {
            return Ok(skipped);
        }
        let Some(action) = self.select_action() else {
            info!("catalog drained, no effective actions remain");
            self.exhaust(StopReason::CatalogDrained);
            return Ok(CycleOutcome::skipped());
        };
        self.execute_cycle_action(action).await
    }

    /// Observe-first cycle variant: currently discoverable actions run
    /// ahead of the static catalog for this cycle only. An empty or failed
    /// discovery is retried exactly once, after a fixed delay, before the
    /// engine concedes and uses the catalog.
    pub async fn run_cycle_observing(&mut self) -> Result<CycleOutcome, EngineError> {
        if let Some(skipped) = self.cycle_prelude()? {
            return Ok(skipped);
        }
        if let Some(discovered) = self.discover_action().await {
            debug!(action = %discovered, "running discovered action ahead of catalog");
            return self.execute_cycle_action(discovered).await;
        }
        let Some(action) = self.select_action() else {
            info!("catalog drained, no effective actions remain");
            self.exhaust(StopReason::CatalogDrained);
            return Ok(CycleOutcome::skipped());
        };
        self.execute_cycle_action(action).await
    }

    /// Run cycles until the budget is spent, the requested cycle count
    /// completes, or the engine exhausts itself.
    pub async fn run_until(&mut self, budget: RunBudget) -> Result<RunReport, EngineError> {
        self.drive(budget, false).await
    }

    /// Budget driver using the observe-first cycle variant.
    pub async fn run_until_observing(
        &mut self,
        budget: RunBudget,
    ) -> Result<RunReport, EngineError> {
        self.drive(budget, true).await
    }

    /// Executed actions, oldest first. Every entry carries its result.
    pub fn action_history(&self) -> &[Action] {
        &self.action_history
    }

    /// Observation log, oldest first.
    pub fn state_history(&self) -> &[PerceptionSnapshot] {
        &self.state_history
    }

    /// Whether the two most recent observations carry different
    /// fingerprints.
    pub fn has_state_changed(&self) -> bool {
        let n = self.state_history.len();
        if n < 2 {
            return false;
        }
        let previous = &self.state_history[n - 2];
        let latest = &self.state_history[n - 1];
        previous.is_available()
            && latest.is_available()
            && previous.fingerprint != latest.fingerprint
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Failure ledger, for observability.
    pub fn ledger(&self) -> &RetryLedger {
        &self.ledger
    }

    /// Elapsed run time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at
            .map(|s| s.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    /// Clear all mutable run state and return to `Idle`. The installed
    /// catalog and descriptor survive.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.pending.clear();
        self.escalated.clear();
        self.ledger = RetryLedger::new();
        self.status = EngineStatus::Idle;
        self.action_history.clear();
        self.state_history.clear();
        self.counters = RunCounters::default();
        self.started_at = None;
        self.exhaustion_reason = None;
    }

    async fn drive(
        &mut self,
        budget: RunBudget,
        observe_first: bool,
    ) -> Result<RunReport, EngineError> {
        self.ensure_ready()?;
        let run_started = Instant::now();
        let started_at = chrono::Utc::now();
        if !self.status.is_terminal() {
            self.status = EngineStatus::Running;
            self.started_at.get_or_insert(run_started);
        }

        // Seed a baseline observation so the first successful action has a
        // real "before" to compare against.
        if self.state_history.is_empty() {
            let baseline = self.capture_snapshot().await;
            if baseline.is_available() {
                self.state_history.push(baseline);
            }
        }

        let mut cycles: u32 = 0;
        let stop_reason = loop {
            if self.status.is_terminal() {
                // A cycle already exhausted the engine; not a failure.
                break self.exhaustion_reason.unwrap_or(StopReason::ActionBudget);
            }
            if let Some(target) = budget.cycles {
                if cycles >= target {
                    self.status = EngineStatus::Completed;
                    break StopReason::CyclesCompleted;
                }
            }
            if run_started.elapsed().as_millis() as u64 >= budget.time_budget_ms {
                self.exhaust(StopReason::TimeBudget);
                break StopReason::TimeBudget;
            }
            if self.counters.total_executed >= self.config.max_actions_per_run {
                self.exhaust(StopReason::ActionBudget);
                break StopReason::ActionBudget;
            }

            if observe_first {
                self.run_cycle_observing().await?;
            } else {
                self.run_cycle().await?;
            }
            cycles += 1;
        };

        let report = RunReport {
            status: self.status,
            stop_reason,
            cycles,
            actions_executed: self.counters.total_executed,
            actions_succeeded: self.counters.succeeded,
            state_changes: self.counters.state_changes,
            started_at,
            finished_at: chrono::Utc::now(),
            elapsed_ms: run_started.elapsed().as_millis() as u64,
        };
        info!(
            status = ?report.status,
            stop = ?report.stop_reason,
            executed = report.actions_executed,
            changes = report.state_changes,
            "run finished"
        );
        Ok(report)
    }

    /// Shared cycle entry: contract check, idle promotion, budget check.
    fn cycle_prelude(&mut self) -> Result<Option<CycleOutcome>, EngineError> {
        self.ensure_ready()?;
        if self.status == EngineStatus::Idle {
            self.status = EngineStatus::Running;
            self.started_at.get_or_insert(Instant::now());
        }
        if self.status.is_terminal() {
            return Ok(Some(CycleOutcome::skipped()));
        }
        if self.counters.total_executed >= self.config.max_actions_per_run {
            self.exhaust(StopReason::ActionBudget);
            return Ok(Some(CycleOutcome::skipped()));
        }
        Ok(None)
    }

    fn ensure_ready(&mut self) -> Result<(), EngineError> {
        if self.catalog.is_empty() {
            self.status = EngineStatus::Aborted;
            return Err(EngineError::Configuration(
                "no action catalog built; call build_catalog first".to_string(),
            ));
        }
        Ok(())
    }

    /// Next effective action: pending variations first, then the catalog
    /// at the cursor, skipping escalated identities. `None` when a full
    /// wrap finds nothing left.
    fn select_action(&mut self) -> Option<Action> {
        if let Some(variation) = self.pending.pop_front() {
            return Some(variation);
        }
        for _ in 0..self.catalog.len() {
            let candidate = &self.catalog[self.cursor];
            self.cursor = (self.cursor + 1) % self.catalog.len();
            if !self.escalated.contains(&candidate.identity()) {
                return Some(candidate.reissue());
            }
        }
        None
    }

    async fn execute_cycle_action(
        &mut self,
        action: Action,
    ) -> Result<CycleOutcome, EngineError> {
        let identity = action.identity();
        let exec_started = Instant::now();

        // An actuator error never propagates past this boundary.
        let result = match self.actuator.execute(&action).await {
            Ok(result) => result,
            Err(err) => {
                warn!(action = %action, error = %err, "actuator error, recording failed result");
                ActionResult::failure(err.to_string(), exec_started.elapsed().as_millis() as u64)
            }
        };
        self.counters.total_executed += 1;

        if !result.success {
            // Fast-fail path: no settle wait, no snapshot.
            let count = self.ledger.record_failure(&identity);
            debug!(action = %action, count, "action failed");
            if self.ledger.should_escalate(&identity) {
                self.ledger.evict(&identity);
                self.escalated.insert(identity.clone());
                info!(identity = %identity, "action escalated, abandoned for this run");
                self.enqueue_variations(&action);
            }
            let completed = action.complete(result);
            self.action_history.push(completed.clone());
            return Ok(CycleOutcome::failed(completed));
        }

        self.ledger.record_success(&identity);
        self.counters.succeeded += 1;

        sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        let before = self
            .state_history
            .last()
            .cloned()
            .unwrap_or_else(|| PerceptionSnapshot::unavailable("no prior observation"));
        let after = self.capture_snapshot().await;
        let verdict = self.detector.compare(&before, &after);

        if verdict.changed {
            self.counters.consecutive_no_change = 0;
            self.counters.state_changes += 1;
        } else {
            self.counters.consecutive_no_change += 1;
        }
        if self.counters.consecutive_no_change >= self.config.max_consecutive_no_change {
            info!(
                streak = self.counters.consecutive_no_change,
                "no-change streak limit reached"
            );
            self.exhaust(StopReason::NoChangeStreak);
        }

        self.state_history.push(after);
        let completed = action.complete(result);
        debug!(
            action = %completed,
            changed = verdict.changed,
            confidence = verdict.confidence,
            "cycle observed"
        );
        self.action_history.push(completed.clone());
        Ok(CycleOutcome::observed(completed, verdict))
    }

    async fn capture_snapshot(&self) -> PerceptionSnapshot {
        match self.perception.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!(error = %err, "snapshot capture failed");
                PerceptionSnapshot::unavailable(err.to_string())
            }
        }
    }

    /// First usable discovered action, retrying the discovery exactly once
    /// after a fixed delay.
    async fn discover_action(&self) -> Option<Action> {
        for attempt in 0..2u8 {
            match self.perception.discover().await {
                Ok(actions) => {
                    let usable = actions
                        .into_iter()
                        .find(|a| !self.escalated.contains(&a.identity()));
                    if let Some(action) = usable {
                        return Some(action);
                    }
                    debug!("discovery returned nothing usable");
                }
                Err(err) => debug!(error = %err, "discovery failed"),
            }
            if attempt == 0 {
                sleep(Duration::from_millis(self.config.discovery_retry_delay_ms)).await;
            }
        }
        None
    }

    /// Queue substitution actions for an escalated identity. Variations
    /// already escalated or already pending are not re-queued.
    fn enqueue_variations(&mut self, failed: &Action) {
        let Some(descriptor) = &self.descriptor else {
            return;
        };
        let substantive: Vec<Action> = variations_for(failed, descriptor)
            .into_iter()
            .filter(|v| v.kind != ActionKind::Wait)
            .filter(|v| !self.escalated.contains(&v.identity()))
            .filter(|v| self.pending.iter().all(|p| p.identity() != v.identity()))
            .collect();
        if substantive.is_empty() {
            return;
        }
        debug!(count = substantive.len(), failed = %failed, "queueing variations");
        self.pending.extend(substantive);
        self.pending.push_back(Action::wait(VARIATION_WAIT_MS));
    }

    fn exhaust(&mut self, reason: StopReason) {
        if !self.status.is_terminal() {
            self.status = EngineStatus::Exhausted;
        }
        self.exhaustion_reason.get_or_insert(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ActuatorError, PerceptionError};
    use async_trait::async_trait;
    use perceiver_diff::ChangeVerdict;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct SucceedingActuator;

    #[async_trait]
    impl Actuator for SucceedingActuator {
        async fn execute(&self, _action: &Action) -> Result<ActionResult, ActuatorError> {
            Ok(ActionResult::success(1))
        }
    }

    struct FailingActuator;

    #[async_trait]
    impl Actuator for FailingActuator {
        async fn execute(&self, _action: &Action) -> Result<ActionResult, ActuatorError> {
            Ok(ActionResult::failure("nothing focused", 1))
        }
    }

    /// Returns a hard error for clicks, succeeds otherwise.
    struct ClickErrActuator;

    #[async_trait]
    impl Actuator for ClickErrActuator {
        async fn execute(&self, action: &Action) -> Result<ActionResult, ActuatorError> {
            if action.kind == ActionKind::Click {
                Err(ActuatorError::Transport("session closed".to_string()))
            } else {
                Ok(ActionResult::success(1))
            }
        }
    }

    /// Counts snapshot calls; fingerprints either advance every capture or
    /// stay frozen.
    struct CountingPerception {
        snapshots: AtomicU32,
        frozen: bool,
    }

    impl CountingPerception {
        fn advancing() -> Self {
            Self {
                snapshots: AtomicU32::new(0),
                frozen: false,
            }
        }

        fn frozen() -> Self {
            Self {
                snapshots: AtomicU32::new(0),
                frozen: true,
            }
        }

        fn snapshot_calls(&self) -> u32 {
            self.snapshots.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PerceptionSource for CountingPerception {
        async fn snapshot(&self) -> Result<PerceptionSnapshot, PerceptionError> {
            let n = self.snapshots.fetch_add(1, Ordering::SeqCst);
            let fingerprint = if self.frozen {
                "fp-static".to_string()
            } else {
                format!("fp-{n}")
            };
            Ok(PerceptionSnapshot::structural(fingerprint, 20, None, None))
        }
    }

    /// Detector stub with a fixed judgment.
    struct StaticDetector {
        changed: bool,
    }

    impl ChangeDetector for StaticDetector {
        fn compare(
            &self,
            _before: &PerceptionSnapshot,
            _after: &PerceptionSnapshot,
        ) -> ChangeVerdict {
            if self.changed {
                ChangeVerdict::changed(90, "stub")
            } else {
                ChangeVerdict::unchanged(85, "stub")
            }
        }

        fn name(&self) -> &'static str {
            "static-stub"
        }
    }

    fn descriptor() -> GameDescriptor {
        let mut descriptor = GameDescriptor::named("test-game");
        descriptor.candidate_keys = vec!["ArrowUp".into(), "ArrowDown".into()];
        descriptor
    }

    fn engine_with(
        actuator: Arc<dyn Actuator>,
        perception: Arc<dyn PerceptionSource>,
        detector: Option<Arc<dyn ChangeDetector>>,
    ) -> InteractionCycleEngine {
        let mut builder = InteractionCycleEngine::builder()
            .config(EngineConfig::minimal().max_actions(100))
            .actuator(actuator)
            .perception(perception);
        if let Some(detector) = detector {
            builder = builder.detector(detector);
        }
        let mut engine = builder.build().expect("engine builds");
        engine.build_catalog(&descriptor()).expect("catalog builds");
        engine
    }

    #[test]
    fn builder_requires_both_ports() {
        let err = InteractionCycleEngine::builder().build().unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));

        let err = InteractionCycleEngine::builder()
            .actuator(Arc::new(SucceedingActuator))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("perception"));
    }

    #[test]
    fn cycling_without_catalog_aborts() {
        let mut engine = InteractionCycleEngine::builder()
            .actuator(Arc::new(SucceedingActuator))
            .perception(Arc::new(CountingPerception::advancing()))
            .build()
            .unwrap();

        let result = tokio_test::block_on(engine.run_cycle());
        assert!(result.is_err());
        assert_eq!(engine.status(), EngineStatus::Aborted);
    }

    #[tokio::test]
    async fn fast_fail_path_never_consults_perception() {
        let perception = Arc::new(CountingPerception::advancing());
        let mut engine = engine_with(Arc::new(FailingActuator), perception.clone(), None);

        for _ in 0..5 {
            let outcome = engine.run_cycle().await.unwrap();
            assert!(!outcome.changed);
        }

        assert_eq!(perception.snapshot_calls(), 0);
        assert_eq!(engine.action_history().len(), 5);
        assert!(engine
            .action_history()
            .iter()
            .all(|a| !a.result.as_ref().unwrap().success));
    }

    #[tokio::test]
    async fn actuator_error_becomes_failed_result() {
        let mut start_button = GameDescriptor::named("clicker");
        start_button.start_hint = gameprobe_core_types::StartHint::Button;
        start_button.start_label = Some("Play".into());

        let mut engine = InteractionCycleEngine::builder()
            .config(EngineConfig::minimal())
            .actuator(Arc::new(ClickErrActuator))
            .perception(Arc::new(CountingPerception::advancing()))
            .build()
            .unwrap();
        engine.build_catalog(&start_button).unwrap();

        // First catalog entry is the labeled click; the actuator errors on
        // it, which must surface as a recorded failure, not an Err.
        let outcome = engine.run_cycle().await.unwrap();
        let action = outcome.action.unwrap();
        assert_eq!(action.kind, ActionKind::Click);
        let result = action.result.as_ref().unwrap();
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("session closed"));
        assert_eq!(engine.action_history().len(), 1);
    }

    #[tokio::test]
    async fn persistent_failure_escalates_into_variations_then_drains() {
        let mut engine = engine_with(
            Arc::new(FailingActuator),
            Arc::new(CountingPerception::advancing()),
            None,
        );

        for _ in 0..200 {
            engine.run_cycle().await.unwrap();
            if engine.status().is_terminal() {
                break;
            }
        }

        assert_eq!(engine.status(), EngineStatus::Exhausted);
        // The WASD counterparts only enter the run via the variation table.
        assert!(engine
            .action_history()
            .iter()
            .any(|a| a.value.as_deref() == Some("w")));
        // Escalation evicts catalog identities; only the one-shot variation
        // tries (w/a/s/d) may remain, so the ledger stays bounded.
        assert!(engine.ledger().len() <= 4);
    }

    #[tokio::test]
    async fn no_change_streak_exhausts_after_exactly_three() {
        let mut engine = engine_with(
            Arc::new(SucceedingActuator),
            Arc::new(CountingPerception::frozen()),
            Some(Arc::new(StaticDetector { changed: false })),
        );

        for _ in 0..5 {
            engine.run_cycle().await.unwrap();
        }

        assert_eq!(engine.status(), EngineStatus::Exhausted);
        assert_eq!(engine.counters().total_executed, 3);
        assert_eq!(engine.action_history().len(), 3);
    }

    #[tokio::test]
    async fn observed_change_resets_the_streak() {
        let mut engine = engine_with(
            Arc::new(SucceedingActuator),
            Arc::new(CountingPerception::advancing()),
            Some(Arc::new(StaticDetector { changed: true })),
        );

        for _ in 0..4 {
            engine.run_cycle().await.unwrap();
        }

        assert_eq!(engine.status(), EngineStatus::Running);
        assert_eq!(engine.counters().state_changes, 4);
        assert_eq!(engine.counters().consecutive_no_change, 0);
    }

    #[tokio::test]
    async fn has_state_changed_tracks_latest_fingerprints() {
        let mut engine = engine_with(
            Arc::new(SucceedingActuator),
            Arc::new(CountingPerception::advancing()),
            None,
        );

        assert!(!engine.has_state_changed());
        engine.run_cycle().await.unwrap();
        engine.run_cycle().await.unwrap();
        assert!(engine.has_state_changed());
    }

    #[tokio::test]
    async fn reset_returns_to_idle_and_clears_state() {
        let mut engine = engine_with(
            Arc::new(SucceedingActuator),
            Arc::new(CountingPerception::frozen()),
            Some(Arc::new(StaticDetector { changed: false })),
        );

        for _ in 0..3 {
            engine.run_cycle().await.unwrap();
        }
        assert_eq!(engine.status(), EngineStatus::Exhausted);

        engine.reset();
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert!(engine.action_history().is_empty());
        assert!(engine.state_history().is_empty());
        assert_eq!(engine.counters().total_executed, 0);

        // The catalog survives a reset; cycling works again immediately.
        let outcome = engine.run_cycle().await.unwrap();
        assert!(outcome.executed());
    }

    #[tokio::test]
    async fn action_budget_skips_once_spent() {
        let mut engine = InteractionCycleEngine::builder()
            .config(EngineConfig::minimal().max_actions(2))
            .actuator(Arc::new(SucceedingActuator))
            .perception(Arc::new(CountingPerception::advancing()))
            .detector(Arc::new(StaticDetector { changed: true }))
            .build()
            .unwrap();
        engine.build_catalog(&descriptor()).unwrap();

        assert!(engine.run_cycle().await.unwrap().executed());
        assert!(engine.run_cycle().await.unwrap().executed());
        let skipped = engine.run_cycle().await.unwrap();
        assert!(!skipped.executed());
        assert_eq!(engine.status(), EngineStatus::Exhausted);
        assert_eq!(engine.counters().total_executed, 2);
    }
}
