//! Cooperative, single-threaded task scheduler.
//!
//! Once per tick the [`TaskScheduler`] walks its registered behavior modules
//! in priority-class order and invokes the ones whose phase set, minimum
//! interval and optional predicate allow it. Faults are values: a failing
//! predicate or task is recorded in the [`TickReport`] and never stops the
//! rest of the tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod report;
pub mod scheduler;
pub mod task;

pub use config::{PhaseSet, Predicate, TaskConfig, TaskPriority, TaskSettings};
pub use report::{FaultKind, SkipReason, SkippedTask, TaskFaultRecord, TickReport};
pub use scheduler::{SchedulerError, TaskScheduler};
pub use task::{ControlView, FnTask, Task, TaskFault, TaskResult};
