use crate::GamePhase;

/// Per-tick data handed to every invoked task.
///
/// Built once per tick after the store has ingested the new observation and the
/// authority mode has been decided, so it is stable for the whole tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    /// Simulation time in seconds.
    pub time: f64,
    pub phase: GamePhase,
}

impl TickContext {
    pub fn new(tick: u64, time: f64) -> Self {
        Self {
            tick,
            time,
            phase: GamePhase::from_time(time),
        }
    }
}
