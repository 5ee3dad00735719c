use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{GamePhase, ResourceType, ThreatAssessment, ThreatLevel, ThreatUpdate, Value};

/// Supply is capped by the engine; anything above is perception noise.
pub const MAX_SUPPLY: u32 = 200;

/// Arbitration policy currently in force.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum AuthorityMode {
    Emergency,
    Combat,
    Strategy,
    Economy,
    #[default]
    Balanced,
}

impl AuthorityMode {
    pub const ALL: [AuthorityMode; 5] = [
        AuthorityMode::Emergency,
        AuthorityMode::Combat,
        AuthorityMode::Strategy,
        AuthorityMode::Economy,
        AuthorityMode::Balanced,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AuthorityMode::Emergency => "emergency",
            AuthorityMode::Combat => "combat",
            AuthorityMode::Strategy => "strategy",
            AuthorityMode::Economy => "economy",
            AuthorityMode::Balanced => "balanced",
        }
    }
}

impl fmt::Display for AuthorityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resources {
    pub minerals: u32,
    pub vespene: u32,
    pub supply_used: u32,
    pub supply_cap: u32,
}

impl Resources {
    pub fn supply_left(&self) -> u32 {
        self.supply_cap.saturating_sub(self.supply_used)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitCount {
    pub current: u32,
    pub pending: u32,
}

impl UnitCount {
    pub fn total(&self) -> u32 {
        self.current.saturating_add(self.pending)
    }
}

/// Active top-level strategy as reported by perception.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrategyState {
    pub id: String,
    pub complete: bool,
}

/// Known strategy flags. Ad-hoc flags that do not fit here go to the extension
/// bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum StrategyFlag {
    ProxyDetected,
    CloakDetected,
    AllIn,
    ExpansionBlocked,
    TechSwitch,
}

impl StrategyFlag {
    pub const ALL: [StrategyFlag; 5] = [
        StrategyFlag::ProxyDetected,
        StrategyFlag::CloakDetected,
        StrategyFlag::AllIn,
        StrategyFlag::ExpansionBlocked,
        StrategyFlag::TechSwitch,
    ];
}

/// Keys answered by [`StateStore::flat`]. The extension bag refuses them.
pub const RESERVED_KEYS: &[&str] = &[
    "time",
    "tick",
    "phase",
    "minerals",
    "vespene",
    "supply_used",
    "supply_cap",
    "supply_left",
    "threat_level",
    "enemy_strength",
    "rushing",
    "air_threat",
    "authority_mode",
    "strategy",
];

/// The blackboard: current-tick world summary.
///
/// All fields are private; every write goes through a setter that clamps its
/// input, so the store never holds an out-of-range value and never reports an
/// error.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    time: f64,
    tick: u64,
    phase: GamePhase,
    resources: Resources,
    units: BTreeMap<ResourceType, UnitCount>,
    threat: ThreatAssessment,
    authority_mode: AuthorityMode,
    mode_changed_at: f64,
    strategy: Option<StrategyState>,
    flags: BTreeSet<StrategyFlag>,
    extensions: BTreeMap<String, Value>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn threat(&self) -> &ThreatAssessment {
        &self.threat
    }

    pub fn authority_mode(&self) -> AuthorityMode {
        self.authority_mode
    }

    pub fn mode_changed_at(&self) -> f64 {
        self.mode_changed_at
    }

    pub fn strategy(&self) -> Option<&StrategyState> {
        self.strategy.as_ref()
    }

    pub fn has_active_strategy(&self) -> bool {
        self.strategy.as_ref().is_some_and(|s| !s.complete)
    }

    /// Moves simulation time forward and recomputes the phase.
    ///
    /// NaN and negative input clamp to zero, `+inf` is ignored, and time
    /// never moves backwards.
    pub fn update_time(&mut self, seconds: f64) {
        let seconds = if seconds.is_nan() { 0.0 } else { seconds.max(0.0) };
        if seconds == f64::INFINITY {
            tracing::debug!(current = self.time, "ignoring non-finite time");
        } else if seconds < self.time {
            tracing::debug!(current = self.time, requested = seconds, "ignoring time regression");
        } else {
            self.time = seconds;
        }
        self.phase = GamePhase::from_time(self.time);
    }

    pub fn advance_tick(&mut self) -> u64 {
        self.tick = self.tick.saturating_add(1);
        self.tick
    }

    /// Only moves the counter forward.
    pub fn set_tick(&mut self, tick: u64) {
        self.tick = self.tick.max(tick);
    }

    /// Replaces all four resource counters at once.
    pub fn update_resources(&mut self, minerals: i64, vespene: i64, supply_used: i64, supply_cap: i64) {
        self.resources = Resources {
            minerals: clamp_u32(minerals, u32::MAX),
            vespene: clamp_u32(vespene, u32::MAX),
            supply_used: clamp_u32(supply_used, MAX_SUPPLY),
            supply_cap: clamp_u32(supply_cap, MAX_SUPPLY),
        };
    }

    pub fn unit_count(&self, kind: &ResourceType) -> UnitCount {
        self.units.get(kind).copied().unwrap_or_default()
    }

    pub fn unit_counts(&self) -> impl Iterator<Item = (&ResourceType, &UnitCount)> {
        self.units.iter()
    }

    /// Negative counts clamp to zero.
    pub fn update_unit_count(&mut self, kind: ResourceType, current: i64, pending: i64) {
        let count = UnitCount {
            current: clamp_u32(current, u32::MAX),
            pending: clamp_u32(pending, u32::MAX),
        };
        self.units.insert(kind, count);
    }

    /// Executor feedback: `n` more of `kind` have been submitted to the engine.
    pub fn add_pending(&mut self, kind: ResourceType, n: u32) {
        let entry = self.units.entry(kind).or_default();
        entry.pending = entry.pending.saturating_add(n);
    }

    /// Executor feedback: up to `n` pending `kind` finished.
    pub fn complete_pending(&mut self, kind: ResourceType, n: u32) {
        let entry = self.units.entry(kind).or_default();
        let moved = n.min(entry.pending);
        entry.pending -= moved;
        entry.current = entry.current.saturating_add(moved);
    }

    /// Updates the threat picture.
    ///
    /// `detected_at` latches on the first crossing into `Medium`+ and is only
    /// released once the level falls back to `None`.
    pub fn update_threat(&mut self, update: ThreatUpdate) {
        let detected_at = match (update.level, self.threat.detected_at) {
            (ThreatLevel::None, _) => None,
            (level, None) if level.is_elevated() => Some(self.time),
            (_, latched) => latched,
        };

        let enemy_strength = if update.enemy_strength.is_nan() {
            0.0
        } else {
            update.enemy_strength.clamp(0.0, f32::MAX)
        };

        self.threat = ThreatAssessment {
            level: update.level,
            enemy_strength,
            rushing: update.rushing,
            air_threat: update.air_threat,
            detected_at,
        };
    }

    /// Returns `false` when the mode is unchanged; the timestamp is only
    /// stamped on an actual change.
    pub fn set_authority_mode(&mut self, mode: AuthorityMode) -> bool {
        if self.authority_mode == mode {
            return false;
        }
        self.authority_mode = mode;
        self.mode_changed_at = self.time;
        true
    }

    pub fn set_strategy(&mut self, id: Option<String>, complete: bool) {
        self.strategy = id.map(|id| StrategyState { id, complete });
    }

    pub fn flag(&self, flag: StrategyFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn flags(&self) -> impl Iterator<Item = StrategyFlag> + '_ {
        self.flags.iter().copied()
    }

    pub fn set_flag(&mut self, flag: StrategyFlag, on: bool) {
        if on {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
    }

    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Stores a forward-compatible ad-hoc value. Keys owned by the typed
    /// fields are refused and `false` is returned.
    pub fn set_extension(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            tracing::debug!(key = %key, "refusing extension write to reserved key");
            return false;
        }
        self.extensions.insert(key, value.into());
        true
    }

    pub fn remove_extension(&mut self, key: &str) -> Option<Value> {
        self.extensions.remove(key)
    }

    /// Flat string-keyed view.
    ///
    /// Reserved keys are computed from the typed fields on every read, so the
    /// flat and structured views cannot drift apart. Other keys fall through
    /// to the extension bag.
    pub fn flat(&self, key: &str) -> Option<Value> {
        let value = match key {
            "time" => Value::Float(self.time),
            "tick" => Value::Int(self.tick as i64),
            "phase" => Value::from(self.phase.name()),
            "minerals" => Value::from(self.resources.minerals),
            "vespene" => Value::from(self.resources.vespene),
            "supply_used" => Value::from(self.resources.supply_used),
            "supply_cap" => Value::from(self.resources.supply_cap),
            "supply_left" => Value::from(self.resources.supply_left()),
            "threat_level" => Value::from(self.threat.level.name()),
            "enemy_strength" => Value::Float(self.threat.enemy_strength as f64),
            "rushing" => Value::Bool(self.threat.rushing),
            "air_threat" => Value::Bool(self.threat.air_threat),
            "authority_mode" => Value::from(self.authority_mode.name()),
            "strategy" => Value::from(self.strategy.as_ref()?.id.as_str()),
            other => return self.extensions.get(other).cloned(),
        };
        Some(value)
    }
}

fn clamp_u32(value: i64, max: u32) -> u32 {
    value.clamp(0, max as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_u32_bounds() {
        assert_eq!(clamp_u32(-5, 10), 0);
        assert_eq!(clamp_u32(7, 10), 7);
        assert_eq!(clamp_u32(i64::MAX, 10), 10);
    }
}
