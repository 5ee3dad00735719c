//! Observation - the per-tick snapshot pushed in by perception.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warden_core::{ResourceType, StateStore, StrategyFlag, ThreatUpdate, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitObservation {
    pub current: i64,
    pub pending: i64,
}

/// World summary for one tick.
///
/// Numeric fields are taken as reported; the store clamps whatever is out of
/// range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    /// Simulation time in seconds.
    pub time: f64,
    pub minerals: i64,
    pub vespene: i64,
    pub supply_used: i64,
    pub supply_cap: i64,
    pub units: BTreeMap<String, UnitObservation>,
    pub threat: ThreatUpdate,
    pub strategy: Option<String>,
    pub strategy_complete: bool,
    /// Flags currently raised; everything not listed is lowered.
    pub flags: Vec<StrategyFlag>,
    pub extensions: BTreeMap<String, Value>,
}

impl Observation {
    pub fn at(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    /// Pushes the snapshot into the store through its setters.
    pub fn apply(&self, store: &mut StateStore) {
        store.update_time(self.time);
        store.update_resources(self.minerals, self.vespene, self.supply_used, self.supply_cap);
        for (name, seen) in &self.units {
            store.update_unit_count(ResourceType::new(name.clone()), seen.current, seen.pending);
        }
        store.update_threat(self.threat);
        store.set_strategy(self.strategy.clone(), self.strategy_complete);
        for flag in StrategyFlag::ALL {
            store.set_flag(flag, self.flags.contains(&flag));
        }
        for (key, value) in &self.extensions {
            store.set_extension(key.clone(), value.clone());
        }
    }
}
