use std::borrow::Cow;
use std::marker::PhantomData;

use thiserror::Error;
use warden_core::{StateStore, TickContext};

/// Read access to the blackboard for whatever state the scheduler drives.
pub trait ControlView {
    fn store(&self) -> &StateStore;
}

impl ControlView for StateStore {
    fn store(&self) -> &StateStore {
        self
    }
}

/// A fault raised by a task or by its eligibility predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TaskFault {
    reason: Cow<'static, str>,
}

impl TaskFault {
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

pub type TaskResult = Result<(), TaskFault>;

/// A behavior module driven by the scheduler.
///
/// Tasks run to completion inside the tick and must not block; long work is
/// expressed as requests submitted through `state`.
pub trait Task<S>: 'static {
    fn tick(&mut self, ctx: &TickContext, state: &mut S) -> TaskResult;
}

/// Adapts a closure into a [`Task`].
pub struct FnTask<S, F> {
    f: F,
    _state: PhantomData<fn(&mut S)>,
}

impl<S, F> FnTask<S, F>
where
    F: FnMut(&TickContext, &mut S) -> TaskResult + 'static,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _state: PhantomData,
        }
    }
}

impl<S, F> Task<S> for FnTask<S, F>
where
    S: 'static,
    F: FnMut(&TickContext, &mut S) -> TaskResult + 'static,
{
    fn tick(&mut self, ctx: &TickContext, state: &mut S) -> TaskResult {
        (self.f)(ctx, state)
    }
}
