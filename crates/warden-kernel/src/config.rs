//! Control plane configuration loading.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use warden_arbiter::{RequesterClass, RequesterRegistry};
use warden_core::{RequesterId, DEFAULT_RESERVATION_SECONDS, DEFAULT_TTL};
use warden_sched::{TaskConfig, TaskSettings};

/// Main control plane configuration, usually loaded from `warden.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub cache: CacheConfig,
    pub reservations: ReservationConfig,

    /// Extra requester names and the priority class they arbitrate as.
    pub requesters: Vec<RequesterBinding>,

    /// Scheduling overrides, matched by task name at registration.
    pub tasks: Vec<TaskOverride>,

    /// Keep the last N scheduler decisions in memory (off when absent).
    pub trace_capacity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub default_ttl_seconds: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: DEFAULT_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationConfig {
    pub default_duration_seconds: f64,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            default_duration_seconds: DEFAULT_RESERVATION_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterBinding {
    pub name: String,
    pub class: RequesterClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOverride {
    pub name: String,
    #[serde(flatten)]
    pub settings: TaskSettings,
}

impl ControlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load `path` when given and present, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ttl = self.cache.default_ttl_seconds;
        if !ttl.is_finite() || ttl < 0.0 {
            bail!("cache.default_ttl_seconds must be a non-negative number, got {ttl}");
        }

        let window = self.reservations.default_duration_seconds;
        if !window.is_finite() || window <= 0.0 {
            bail!("reservations.default_duration_seconds must be positive, got {window}");
        }

        let mut seen = BTreeSet::new();
        for task in &self.tasks {
            if !seen.insert(task.name.as_str()) {
                bail!("task `{}` is configured more than once", task.name);
            }
            if task.settings.enabled_phases.is_empty() {
                bail!("task `{}` has no enabled phases", task.name);
            }
        }
        Ok(())
    }

    pub fn requester_registry(&self) -> RequesterRegistry {
        let mut registry = RequesterRegistry::new();
        for binding in &self.requesters {
            registry.register(RequesterId::new(binding.name.clone()), binding.class);
        }
        registry
    }

    pub fn task_override(&self, name: &str) -> Option<&TaskOverride> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Applies the matching override, if any, keeping the predicate.
    pub fn apply_overrides<S>(&self, config: TaskConfig<S>) -> TaskConfig<S> {
        match self.task_override(config.name()) {
            Some(o) => config.with_settings(o.settings),
            None => config,
        }
    }
}
