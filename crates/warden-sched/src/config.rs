use std::borrow::Cow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use warden_core::GamePhase;

use crate::TaskFault;

/// Scheduling class. Tasks run in this order within a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum TaskPriority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    Minimal,
}

impl TaskPriority {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            TaskPriority::Critical => "critical",
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
            TaskPriority::Minimal => "minimal",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Subset of [`GamePhase`]s a task is enabled in.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<GamePhase>", into = "Vec<GamePhase>")
)]
pub struct PhaseSet(u8);

impl PhaseSet {
    pub const EMPTY: PhaseSet = PhaseSet(0);
    pub const ALL: PhaseSet = PhaseSet(0b1111);

    pub const fn only(phase: GamePhase) -> Self {
        PhaseSet(1 << phase as u8)
    }

    pub const fn with(self, phase: GamePhase) -> Self {
        PhaseSet(self.0 | (1 << phase as u8))
    }

    /// Every phase from `phase` onwards.
    pub fn from_phase(phase: GamePhase) -> Self {
        GamePhase::ALL
            .into_iter()
            .filter(|p| *p >= phase)
            .collect()
    }

    pub const fn contains(self, phase: GamePhase) -> bool {
        self.0 & (1 << phase as u8) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = GamePhase> {
        GamePhase::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl Default for PhaseSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Debug for PhaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<GamePhase> for PhaseSet {
    fn from_iter<I: IntoIterator<Item = GamePhase>>(iter: I) -> Self {
        iter.into_iter().fold(PhaseSet::EMPTY, PhaseSet::with)
    }
}

impl From<Vec<GamePhase>> for PhaseSet {
    fn from(value: Vec<GamePhase>) -> Self {
        value.into_iter().collect()
    }
}

impl From<PhaseSet> for Vec<GamePhase> {
    fn from(value: PhaseSet) -> Self {
        value.iter().collect()
    }
}

/// Runtime eligibility check. `Err` is a predicate fault, which the scheduler
/// treats as a pass.
pub type Predicate<S> = Box<dyn FnMut(&S) -> Result<bool, TaskFault>>;

/// The data-only part of a [`TaskConfig`], as found in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TaskSettings {
    pub priority: TaskPriority,
    pub enabled_phases: PhaseSet,
    pub min_interval_ticks: u64,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            priority: TaskPriority::default(),
            enabled_phases: PhaseSet::ALL,
            min_interval_ticks: 1,
        }
    }
}

/// Scheduling declaration for one task.
///
/// Registered once; afterwards only `last_invoked` changes.
pub struct TaskConfig<S> {
    pub(crate) name: Cow<'static, str>,
    pub(crate) settings: TaskSettings,
    pub(crate) predicate: Option<Predicate<S>>,
    pub(crate) last_invoked: Option<u64>,
}

impl<S> TaskConfig<S> {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            settings: TaskSettings::default(),
            predicate: None,
            last_invoked: None,
        }
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.settings.priority = priority;
        self
    }

    pub fn phases(mut self, phases: PhaseSet) -> Self {
        self.settings.enabled_phases = phases;
        self
    }

    /// Clamped to at least one tick.
    pub fn min_interval(mut self, ticks: u64) -> Self {
        self.settings.min_interval_ticks = ticks.max(1);
        self
    }

    pub fn predicate(mut self, predicate: impl FnMut(&S) -> Result<bool, TaskFault> + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Replaces priority, phases and interval; keeps the predicate.
    pub fn with_settings(mut self, settings: TaskSettings) -> Self {
        self.settings = TaskSettings {
            min_interval_ticks: settings.min_interval_ticks.max(1),
            ..settings
        };
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> TaskSettings {
        self.settings
    }

    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    pub fn last_invoked(&self) -> Option<u64> {
        self.last_invoked
    }
}

impl<S> fmt::Debug for TaskConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskConfig")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .field("predicate", &self.predicate.is_some())
            .field("last_invoked", &self.last_invoked)
            .finish()
    }
}
