//! Authority/priority arbitration.
//!
//! [`AuthorityManager`] decides once per tick which [`AuthorityMode`] is in
//! force and maps requesters to priority classes through a fixed
//! mode-by-class matrix. [`RequestArbiter`] holds pending production requests
//! in priority buckets and drains them in strict priority order.
//!
//! [`AuthorityMode`]: warden_core::AuthorityMode

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arbiter;
pub mod authority;
pub mod requester;

pub use arbiter::{Enqueued, ProductionRequest, RequestArbiter};
pub use authority::{AuthorityManager, ModeChange};
pub use requester::{RequesterClass, RequesterRegistry};

/// Arbitration priority. `0` is served first.
pub type Priority = u8;

pub const PRIORITY_HIGHEST: Priority = 0;
/// What an unmapped requester gets outside of emergencies.
pub const PRIORITY_DEFAULT: Priority = 2;
pub const PRIORITY_LOWEST: Priority = 3;
