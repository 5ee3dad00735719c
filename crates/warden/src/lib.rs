//! Umbrella crate that re-exports the `warden-*` building blocks.
//!
//! Most users want [`kernel::ControlPlane`]; the primitives are exposed for
//! hosts that wire their own tick loop.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use warden_core as core;

#[cfg(feature = "arbiter")]
#[cfg_attr(docsrs, doc(cfg(feature = "arbiter")))]
pub use warden_arbiter as arbiter;

#[cfg(feature = "sched")]
#[cfg_attr(docsrs, doc(cfg(feature = "sched")))]
pub use warden_sched as sched;

#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub use warden_trace as trace;

#[cfg(feature = "kernel")]
#[cfg_attr(docsrs, doc(cfg(feature = "kernel")))]
pub use warden_kernel as kernel;
