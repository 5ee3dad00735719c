//! ControlState - everything a behavior module may touch during a tick.

use warden_arbiter::{AuthorityManager, Enqueued, Priority, RequestArbiter};
use warden_core::{
    RequesterId, ReservationManager, ResourceType, StateStore, TtlCache, Value,
};
use warden_sched::ControlView;

/// Single-owner bundle of the blackboard and its companions.
///
/// Handed by `&mut` to every invoked task. Time-dependent helpers read the
/// simulation clock from the store, never the wall clock.
#[derive(Debug, Clone)]
pub struct ControlState {
    pub(crate) store: StateStore,
    pub(crate) cache: TtlCache<Value>,
    pub(crate) reservations: ReservationManager,
    pub(crate) arbiter: RequestArbiter,
    pub(crate) authority: AuthorityManager,
    pub(crate) reservation_window: f64,
}

impl ControlView for ControlState {
    fn store(&self) -> &StateStore {
        &self.store
    }
}

impl ControlState {
    pub fn new(authority: AuthorityManager, cache_ttl: f64, reservation_window: f64) -> Self {
        Self {
            store: StateStore::new(),
            cache: TtlCache::new(cache_ttl),
            reservations: ReservationManager::new(),
            arbiter: RequestArbiter::new(),
            authority,
            reservation_window,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Narrow write access for modules that refine derived state (threat,
    /// flags, extensions). Every setter clamps.
    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    pub fn authority(&self) -> &AuthorityManager {
        &self.authority
    }

    pub fn arbiter(&self) -> &RequestArbiter {
        &self.arbiter
    }

    pub fn reservations(&self) -> &ReservationManager {
        &self.reservations
    }

    pub fn now(&self) -> f64 {
        self.store.time()
    }

    /// Submits a production request. Without an explicit priority the
    /// requester's authority priority applies.
    pub fn request(
        &mut self,
        resource: impl Into<ResourceType>,
        count: u32,
        requester: impl Into<RequesterId>,
        priority: Option<Priority>,
    ) -> Enqueued {
        self.arbiter.enqueue(
            &self.authority,
            resource.into(),
            count,
            requester.into(),
            priority,
        )
    }

    /// Withdraws every pending request of `requester`.
    pub fn withdraw(&mut self, requester: &RequesterId) -> usize {
        self.arbiter.clear(Some(requester))
    }

    /// Claims a production slot for `duration` seconds (the configured window
    /// when `None`).
    pub fn reserve(
        &mut self,
        resource: impl Into<ResourceType>,
        requester: impl Into<RequesterId>,
        duration: Option<f64>,
    ) -> bool {
        let now = self.store.time();
        let duration = duration.unwrap_or(self.reservation_window);
        self.reservations
            .reserve(resource.into(), requester.into(), duration, now)
    }

    pub fn is_reserved(&self, resource: &ResourceType, duration: Option<f64>) -> bool {
        let duration = duration.unwrap_or(self.reservation_window);
        self.reservations
            .is_reserved(resource, duration, self.store.time())
    }

    pub fn cache_set(&mut self, key: &str, value: impl Into<Value>, ttl: Option<f64>) {
        let now = self.store.time();
        self.cache.set(key, value.into(), ttl, now);
    }

    pub fn cached(&mut self, key: &str) -> Option<Value> {
        let now = self.store.time();
        self.cache.get(key, now).cloned()
    }

    /// Derived value memoized against simulation time.
    pub fn memo<F>(&mut self, key: &str, ttl: Option<f64>, derive: F) -> Value
    where
        F: FnOnce(&StateStore) -> Value,
    {
        let now = self.store.time();
        let store = &self.store;
        self.cache
            .get_or_insert_with(key, now, ttl, || derive(store))
            .clone()
    }
}
