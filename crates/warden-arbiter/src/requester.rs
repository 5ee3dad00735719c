use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use warden_core::RequesterId;

/// Column of the priority matrix a requester is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum RequesterClass {
    Defense,
    Combat,
    Strategy,
    Economy,
    Production,
    Tech,
    Scouting,
}

impl RequesterClass {
    pub const COUNT: usize = 7;

    pub const ALL: [RequesterClass; Self::COUNT] = [
        RequesterClass::Defense,
        RequesterClass::Combat,
        RequesterClass::Strategy,
        RequesterClass::Economy,
        RequesterClass::Production,
        RequesterClass::Tech,
        RequesterClass::Scouting,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical requester name for the class.
    pub fn name(self) -> &'static str {
        match self {
            RequesterClass::Defense => "defense",
            RequesterClass::Combat => "combat",
            RequesterClass::Strategy => "strategy",
            RequesterClass::Economy => "economy",
            RequesterClass::Production => "production",
            RequesterClass::Tech => "tech",
            RequesterClass::Scouting => "scouting",
        }
    }
}

impl fmt::Display for RequesterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps requester identities to classes.
///
/// Seeded with every canonical class name; modules with their own names are
/// added through [`RequesterRegistry::register`]. Unknown requesters have no
/// class and fall back to the mode's default priority.
#[derive(Debug, Clone)]
pub struct RequesterRegistry {
    classes: BTreeMap<RequesterId, RequesterClass>,
}

impl Default for RequesterRegistry {
    fn default() -> Self {
        let classes = RequesterClass::ALL
            .iter()
            .map(|c| (RequesterId::from_static(c.name()), *c))
            .collect();
        Self { classes }
    }
}

impl RequesterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the class previously bound to `requester`, if any.
    pub fn register(
        &mut self,
        requester: RequesterId,
        class: RequesterClass,
    ) -> Option<RequesterClass> {
        self.classes.insert(requester, class)
    }

    pub fn class_of(&self, requester: &RequesterId) -> Option<RequesterClass> {
        self.classes.get(requester).copied()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
