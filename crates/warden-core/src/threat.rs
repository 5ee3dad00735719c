use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum ThreatLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl ThreatLevel {
    /// Levels at or above this one count as "detected" for the latch.
    pub const DETECTION: ThreatLevel = ThreatLevel::Medium;

    pub fn is_elevated(self) -> bool {
        self >= Self::DETECTION
    }

    pub fn name(self) -> &'static str {
        match self {
            ThreatLevel::None => "none",
            ThreatLevel::Low => "low",
            ThreatLevel::Medium => "medium",
            ThreatLevel::High => "high",
            ThreatLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current threat picture held by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThreatAssessment {
    pub level: ThreatLevel,
    pub enemy_strength: f32,
    pub rushing: bool,
    pub air_threat: bool,
    /// Simulation time of the first crossing into `Medium`+; cleared only when
    /// the level returns to `None`.
    pub detected_at: Option<f64>,
}

/// Input for [`crate::StateStore::update_threat`]. `detected_at` is owned by the
/// store and is absent here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ThreatUpdate {
    pub level: ThreatLevel,
    pub enemy_strength: f32,
    pub rushing: bool,
    pub air_threat: bool,
}

impl ThreatUpdate {
    pub fn new(level: ThreatLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_strength(mut self, enemy_strength: f32) -> Self {
        self.enemy_strength = enemy_strength;
        self
    }

    pub fn with_rushing(mut self, rushing: bool) -> Self {
        self.rushing = rushing;
        self
    }

    pub fn with_air_threat(mut self, air_threat: bool) -> Self {
        self.air_threat = air_threat;
        self
    }
}
