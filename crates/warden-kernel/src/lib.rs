//! Warden kernel - the control plane as an explicit context object.
//!
//! [`ControlPlane`] owns the blackboard, cache, reservations, request arbiter,
//! authority manager and task scheduler. Each call to [`ControlPlane::tick`]
//! ingests one perception [`Observation`], settles the authority mode, and
//! runs the eligible behavior modules against a [`ControlState`].

pub mod config;
pub mod observation;
pub mod plane;
pub mod state;
pub mod status;

pub use config::ControlConfig;
pub use observation::{Observation, UnitObservation};
pub use plane::ControlPlane;
pub use state::ControlState;
pub use status::ControlStatus;
