//! Read-only status snapshot for observability consumers.

use std::collections::BTreeMap;

use serde::Serialize;
use warden_core::{AuthorityMode, GamePhase, ThreatLevel};
use warden_sched::TaskFaultRecord;

/// Control plane status after the most recent tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlStatus {
    pub tick: u64,
    pub time: f64,
    pub phase: GamePhase,
    pub mode: AuthorityMode,
    pub mode_changed_at: f64,
    pub threat: ThreatLevel,
    pub active_tasks: usize,
    pub disabled_tasks: usize,
    /// Pending requests per non-empty priority bucket.
    pub queue_depths: BTreeMap<u8, usize>,
    pub queued_total: usize,
    pub reservations: usize,
    /// Faults recorded during the last tick.
    pub faults: Vec<TaskFaultRecord>,
}

impl ControlStatus {
    pub fn summary(&self) -> String {
        format!(
            "tick {} t={:.1}s phase={} mode={} threat={} tasks={}/{} queued={} faults={}",
            self.tick,
            self.time,
            self.phase,
            self.mode,
            self.threat,
            self.active_tasks,
            self.active_tasks + self.disabled_tasks,
            self.queued_total,
            self.faults.len()
        )
    }

    /// Single-line JSON rendering for log shippers.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
