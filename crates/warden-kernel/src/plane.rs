//! ControlPlane - the per-tick driver.

use warden_arbiter::{AuthorityManager, ModeChange, ProductionRequest};
use warden_core::{RequesterId, TickContext};
use warden_sched::{SchedulerError, Task, TaskConfig, TaskScheduler, TickReport};
use warden_trace::{SharedTraceLog, TraceEvent, TraceKind, TraceLog, TraceSink};

use crate::{ControlConfig, ControlState, ControlStatus, Observation};

/// Context object constructed once per run and threaded through every task
/// invocation.
pub struct ControlPlane {
    config: ControlConfig,
    state: ControlState,
    scheduler: TaskScheduler<ControlState>,
    last_report: TickReport,
    trace: Option<SharedTraceLog>,
}

impl ControlPlane {
    pub fn new(config: ControlConfig) -> Self {
        let authority = AuthorityManager::with_registry(config.requester_registry());
        let state = ControlState::new(
            authority,
            config.cache.default_ttl_seconds,
            config.reservations.default_duration_seconds,
        );
        let trace = config
            .trace_capacity
            .map(|cap| SharedTraceLog::new(TraceLog::with_capacity(cap)));
        let mut scheduler = TaskScheduler::new();
        if let Some(log) = &trace {
            scheduler.set_trace_sink(Some(Box::new(log.clone())));
        }
        Self {
            config,
            state,
            scheduler,
            last_report: TickReport::default(),
            trace,
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Mutable access between ticks (executor feedback, tests).
    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &TaskScheduler<ControlState> {
        &self.scheduler
    }

    /// Registers a behavior module. A task override from the config with the
    /// same name replaces its priority, phases and interval.
    pub fn register_task(
        &mut self,
        config: TaskConfig<ControlState>,
        task: Box<dyn Task<ControlState>>,
    ) -> Result<(), SchedulerError> {
        let config = self.config.apply_overrides(config);
        tracing::debug!(task = config.name(), settings = ?config.settings(), "registering task");
        self.scheduler.register(config, task)
    }

    /// Gate check for modules driven outside the scheduler loop. A predicate
    /// fault is attributed to the current tick's report.
    pub fn should_execute(&mut self, task: &str) -> bool {
        let tick = self.state.store.tick();
        let run = self.scheduler.should_execute(task, tick, &self.state);
        self.last_report
            .faults
            .extend(self.scheduler.take_gate_faults());
        run
    }

    /// Runs one tick: ingest `observation`, settle the authority mode, then
    /// invoke the eligible tasks.
    pub fn tick(&mut self, observation: &Observation) -> &TickReport {
        let tick = self.state.store.advance_tick();
        observation.apply(&mut self.state.store);

        if let Some(change) = self.state.authority.update(&mut self.state.store) {
            self.trace_mode_change(&change);
        }

        let ctx = TickContext::new(tick, self.state.store.time());
        self.last_report = self.scheduler.run_tick(&ctx, &mut self.state);
        &self.last_report
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// Next request for the executor, highest priority first.
    pub fn dequeue_next(&mut self) -> Option<ProductionRequest> {
        self.state.arbiter.dequeue_next()
    }

    pub fn drain_requests(&mut self) -> Vec<ProductionRequest> {
        self.state.arbiter.drain().collect()
    }

    pub fn clear_requests(&mut self, requester: Option<&RequesterId>) -> usize {
        self.state.arbiter.clear(requester)
    }

    /// Executor feedback: the request was turned into engine commands.
    pub fn report_submitted(&mut self, request: &ProductionRequest) {
        self.state
            .store
            .add_pending(request.resource.clone(), request.count);
    }

    pub fn status(&self) -> ControlStatus {
        let store = &self.state.store;
        ControlStatus {
            tick: store.tick(),
            time: store.time(),
            phase: store.phase(),
            mode: store.authority_mode(),
            mode_changed_at: store.mode_changed_at(),
            threat: store.threat().level,
            active_tasks: self.last_report.active,
            disabled_tasks: self.last_report.disabled,
            queue_depths: self.state.arbiter.depths(),
            queued_total: self.state.arbiter.len(),
            reservations: self.state.reservations.len(),
            faults: self.last_report.faults.clone(),
        }
    }

    pub fn mode_history(&self) -> impl Iterator<Item = &ModeChange> {
        self.state.authority.history()
    }

    /// Recorded decisions, when `trace_capacity` is configured.
    pub fn trace(&self) -> Option<&SharedTraceLog> {
        self.trace.as_ref()
    }

    fn trace_mode_change(&mut self, change: &ModeChange) {
        if let Some(log) = self.trace.as_mut() {
            log.emit(
                TraceEvent::new(change.tick, TraceKind::ModeChanged, change.to.name())
                    .with_value(change.from.index() as u64),
            );
        }
    }
}
