use std::collections::BTreeMap;

use thiserror::Error;
use warden_core::{GamePhase, TickContext};
use warden_trace::{TraceEvent, TraceKind, TraceSink};

use crate::{
    ControlView, FaultKind, SkipReason, SkippedTask, Task, TaskConfig, TaskFault,
    TaskFaultRecord, TickReport,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("task `{0}` is already registered")]
    DuplicateTask(String),
}

enum Decision {
    Run,
    /// Predicate faulted; runs anyway.
    RunAfterFault(TaskFault),
    Skip(SkipReason),
}

struct Entry<S> {
    config: TaskConfig<S>,
    task: Option<Box<dyn Task<S>>>,
}

impl<S> Entry<S> {
    /// Applies the gating checks in order and stamps `last_invoked` when the
    /// task is cleared to run.
    fn evaluate(&mut self, phase: GamePhase, tick: u64, state: &S) -> Decision {
        let settings = self.config.settings;
        if !settings.enabled_phases.contains(phase) {
            return Decision::Skip(SkipReason::Phase);
        }

        if let Some(last) = self.config.last_invoked {
            if tick.saturating_sub(last) < settings.min_interval_ticks {
                return Decision::Skip(SkipReason::Interval);
            }
        }

        let decision = match self.config.predicate.as_mut().map(|p| p(state)) {
            None | Some(Ok(true)) => Decision::Run,
            Some(Ok(false)) => return Decision::Skip(SkipReason::Predicate),
            Some(Err(fault)) => Decision::RunAfterFault(fault),
        };

        self.config.last_invoked = Some(tick);
        decision
    }
}

/// Tick-driven driver for registered behavior modules.
///
/// Tasks run in `(priority, registration order)`. Eligibility is recomputed
/// from scratch every tick; nothing stays disabled beyond the tick that
/// evaluated it.
pub struct TaskScheduler<S> {
    entries: Vec<Entry<S>>,
    by_name: BTreeMap<String, usize>,
    order: Vec<usize>,
    faults: Vec<TaskFaultRecord>,
    /// Predicate faults raised by `should_execute`, kept out of tick reports.
    gate_faults: Vec<TaskFaultRecord>,
    trace: Option<Box<dyn TraceSink>>,
}

impl<S> Default for TaskScheduler<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_name: BTreeMap::new(),
            order: Vec::new(),
            faults: Vec::new(),
            gate_faults: Vec::new(),
            trace: None,
        }
    }
}

impl<S> TaskScheduler<S>
where
    S: ControlView + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.trace = sink;
    }

    pub fn take_trace_sink(&mut self) -> Option<Box<dyn TraceSink>> {
        self.trace.take()
    }

    /// Registers a task with its scheduling declaration.
    pub fn register(
        &mut self,
        config: TaskConfig<S>,
        task: Box<dyn Task<S>>,
    ) -> Result<(), SchedulerError> {
        self.insert(config, Some(task))
    }

    /// Registers a declaration without a body, for callers that drive
    /// [`TaskScheduler::should_execute`] themselves.
    pub fn register_gate(&mut self, config: TaskConfig<S>) -> Result<(), SchedulerError> {
        self.insert(config, None)
    }

    fn insert(
        &mut self,
        config: TaskConfig<S>,
        task: Option<Box<dyn Task<S>>>,
    ) -> Result<(), SchedulerError> {
        let name = config.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(SchedulerError::DuplicateTask(name));
        }

        let idx = self.entries.len();
        self.entries.push(Entry { config, task });
        self.by_name.insert(name, idx);

        // Stable sort keeps registration order within a class.
        self.order.push(idx);
        let entries = &self.entries;
        self.order
            .sort_by_key(|&i| entries[i].config.settings.priority);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self, name: &str) -> Option<&TaskConfig<S>> {
        self.by_name.get(name).map(|&i| &self.entries[i].config)
    }

    /// Task names in invocation order.
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|&i| self.entries[i].config.name())
    }

    /// Gate check for a single task. Unregistered names always pass.
    ///
    /// A predicate fault fails open and is parked for
    /// [`TaskScheduler::take_gate_faults`] rather than the next tick report.
    pub fn should_execute(&mut self, name: &str, tick: u64, state: &S) -> bool {
        let Some(&idx) = self.by_name.get(name) else {
            return true;
        };

        let phase = state.store().phase();
        match self.entries[idx].evaluate(phase, tick, state) {
            Decision::Run => true,
            Decision::RunAfterFault(fault) => {
                let record = self.record_fault(tick, idx, FaultKind::Predicate, &fault);
                self.gate_faults.push(record);
                true
            }
            Decision::Skip(_) => false,
        }
    }

    /// Runs one tick: every registered task body is gated and, when eligible,
    /// invoked. A faulting task never prevents later tasks from running.
    pub fn run_tick(&mut self, ctx: &TickContext, state: &mut S) -> TickReport {
        let phase = state.store().phase();
        let mut report = TickReport {
            tick: ctx.tick,
            phase,
            ..TickReport::default()
        };

        for pos in 0..self.order.len() {
            let idx = self.order[pos];
            if self.entries[idx].task.is_none() {
                continue;
            }

            let decision = self.entries[idx].evaluate(phase, ctx.tick, state);
            let name = self.entries[idx].config.name().to_string();
            match decision {
                Decision::Skip(reason) => {
                    report.disabled += 1;
                    self.emit(TraceEvent::new(ctx.tick, TraceKind::TaskSkipped, name.clone()));
                    report.skipped.push(SkippedTask { task: name, reason });
                    continue;
                }
                Decision::RunAfterFault(fault) => {
                    let record = self.record_fault(ctx.tick, idx, FaultKind::Predicate, &fault);
                    self.faults.push(record);
                }
                Decision::Run => {}
            }

            report.active += 1;
            let priority = self.entries[idx].config.settings.priority.ordinal();
            self.emit(
                TraceEvent::new(ctx.tick, TraceKind::TaskInvoked, name.clone())
                    .with_value(priority as u64),
            );
            report.invoked.push(name);

            let result = match self.entries[idx].task.as_mut() {
                Some(task) => task.tick(ctx, state),
                None => Ok(()),
            };
            if let Err(fault) = result {
                let record = self.record_fault(ctx.tick, idx, FaultKind::Task, &fault);
                self.faults.push(record);
            }
        }

        report.faults = std::mem::take(&mut self.faults);
        report
    }

    /// Drains the faults raised by [`TaskScheduler::should_execute`].
    pub fn take_gate_faults(&mut self) -> Vec<TaskFaultRecord> {
        std::mem::take(&mut self.gate_faults)
    }

    fn record_fault(
        &mut self,
        tick: u64,
        idx: usize,
        kind: FaultKind,
        fault: &TaskFault,
    ) -> TaskFaultRecord {
        let task = self.entries[idx].config.name().to_string();
        tracing::warn!(task = %task, tick, ?kind, reason = fault.reason(), "task fault");

        let trace_kind = match kind {
            FaultKind::Predicate => TraceKind::PredicateFault,
            FaultKind::Task => TraceKind::TaskFault,
        };
        self.emit(TraceEvent::new(tick, trace_kind, task.clone()));

        TaskFaultRecord {
            tick,
            task,
            kind,
            reason: fault.reason().to_string(),
        }
    }

    fn emit(&mut self, event: TraceEvent) {
        if let Some(sink) = self.trace.as_mut() {
            sink.emit(event);
        }
    }
}
