use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse stage of a run, derived purely from elapsed simulation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum GamePhase {
    #[default]
    Opening,
    Early,
    Mid,
    Late,
}

impl GamePhase {
    pub const ALL: [GamePhase; 4] = [
        GamePhase::Opening,
        GamePhase::Early,
        GamePhase::Mid,
        GamePhase::Late,
    ];

    /// Seconds at which `Early` begins.
    pub const EARLY_AT: f64 = 180.0;
    /// Seconds at which `Mid` begins.
    pub const MID_AT: f64 = 360.0;
    /// Seconds at which `Late` begins.
    pub const LATE_AT: f64 = 720.0;

    /// Step function over the fixed breakpoints. NaN and negative input map
    /// to `Opening`.
    pub fn from_time(seconds: f64) -> Self {
        if !(seconds >= Self::EARLY_AT) {
            GamePhase::Opening
        } else if seconds < Self::MID_AT {
            GamePhase::Early
        } else if seconds < Self::LATE_AT {
            GamePhase::Mid
        } else {
            GamePhase::Late
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            GamePhase::Opening => "opening",
            GamePhase::Early => "early",
            GamePhase::Mid => "mid",
            GamePhase::Late => "late",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
