#[cfg(feature = "serde")]
use serde::Serialize;
use warden_core::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum FaultKind {
    /// The predicate failed; the task still ran.
    Predicate,
    /// The task body returned an error.
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TaskFaultRecord {
    pub tick: u64,
    pub task: String,
    pub kind: FaultKind,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum SkipReason {
    Phase,
    Interval,
    Predicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SkippedTask {
    pub task: String,
    pub reason: SkipReason,
}

/// What the scheduler did on one tick. Purely observational.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TickReport {
    pub tick: u64,
    pub phase: GamePhase,
    /// Tasks invoked this tick.
    pub active: usize,
    /// Tasks evaluated and not invoked this tick.
    pub disabled: usize,
    /// Invocation order.
    pub invoked: Vec<String>,
    pub skipped: Vec<SkippedTask>,
    pub faults: Vec<TaskFaultRecord>,
}

impl TickReport {
    pub fn was_invoked(&self, task: &str) -> bool {
        self.invoked.iter().any(|t| t == task)
    }

    pub fn summary(&self) -> String {
        format!(
            "tick {} [{}]: active {}, disabled {}, faults {}",
            self.tick,
            self.phase,
            self.active,
            self.disabled,
            self.faults.len()
        )
    }
}
