use std::collections::BTreeMap;

use crate::{RequesterId, ResourceType};

/// Default window a reservation blocks competitors, in simulation seconds.
pub const DEFAULT_RESERVATION_SECONDS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub reserved_at: f64,
    pub requester: RequesterId,
}

impl Reservation {
    fn is_live(&self, duration: f64, now: f64) -> bool {
        now - self.reserved_at < duration
    }
}

/// Time-boxed exclusive claims on construction/production slots.
///
/// Keeps independent modules from submitting the same build twice. A claim
/// blocks every requester, its owner included, until its window has passed.
#[derive(Debug, Clone, Default)]
pub struct ReservationManager {
    slots: BTreeMap<ResourceType, Reservation>,
}

impl ReservationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `kind` for `requester`. Returns `false` while an existing claim
    /// is younger than `duration`.
    pub fn reserve(
        &mut self,
        kind: ResourceType,
        requester: RequesterId,
        duration: f64,
        now: f64,
    ) -> bool {
        if let Some(existing) = self.slots.get(&kind) {
            if existing.is_live(duration, now) {
                tracing::debug!(
                    slot = %kind,
                    holder = %existing.requester,
                    contender = %requester,
                    "reservation conflict"
                );
                return false;
            }
        }

        self.slots.insert(
            kind,
            Reservation {
                reserved_at: now,
                requester,
            },
        );
        true
    }

    pub fn is_reserved(&self, kind: &ResourceType, duration: f64, now: f64) -> bool {
        self.slots
            .get(kind)
            .is_some_and(|r| r.is_live(duration, now))
    }

    pub fn holder(&self, kind: &ResourceType) -> Option<&Reservation> {
        self.slots.get(kind)
    }

    pub fn release(&mut self, kind: &ResourceType) -> Option<Reservation> {
        self.slots.remove(kind)
    }

    /// Drops every claim older than `duration`. Returns how many were dropped.
    pub fn prune(&mut self, duration: f64, now: f64) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, r| r.is_live(duration, now));
        before - self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
