//! Deterministic blackboard primitives for a tick-driven agent control plane.
//!
//! Everything here is plain single-owner data: the [`StateStore`] is the single
//! source of truth for derived world state, [`TtlCache`] memoizes values against
//! simulation time, and [`ReservationManager`] hands out time-boxed claims on
//! scarce production slots.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cache;
pub mod ids;
pub mod phase;
pub mod reservation;
pub mod store;
pub mod threat;
pub mod tick;
pub mod value;

pub use cache::{TtlCache, DEFAULT_TTL};
pub use ids::{RequesterId, ResourceType};
pub use phase::GamePhase;
pub use reservation::{Reservation, ReservationManager, DEFAULT_RESERVATION_SECONDS};
pub use store::{
    AuthorityMode, Resources, StateStore, StrategyFlag, StrategyState, UnitCount, MAX_SUPPLY,
    RESERVED_KEYS,
};
pub use threat::{ThreatAssessment, ThreatLevel, ThreatUpdate};
pub use tick::TickContext;
pub use value::Value;
