#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum TraceKind {
    TaskInvoked,
    TaskSkipped,
    TaskFault,
    PredicateFault,
    ModeChanged,
}

/// One recorded decision.
///
/// `subject` names what the decision was about (a task, a mode); `value` is a
/// kind-specific number (e.g. the priority class of an invoked task).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub kind: TraceKind,
    pub subject: Cow<'static, str>,
    pub value: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, kind: TraceKind, subject: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            kind,
            subject: subject.into(),
            value: 0,
        }
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Bounded in-memory log; drops the oldest events past `capacity`.
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
    pub capacity: Option<usize>,
}

impl TraceLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            capacity: Some(capacity),
        }
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
        if let Some(cap) = self.capacity {
            if self.events.len() > cap {
                let excess = self.events.len() - cap;
                self.events.drain(..excess);
            }
        }
    }

    pub fn of_kind(&self, kind: TraceKind) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// A [`TraceLog`] shared between the sink handed to a scheduler and the owner
/// that reads it back. Single-threaded by construction.
#[derive(Debug, Clone, Default)]
pub struct SharedTraceLog(Rc<RefCell<TraceLog>>);

impl SharedTraceLog {
    pub fn new(log: TraceLog) -> Self {
        Self(Rc::new(RefCell::new(log)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> Vec<TraceEvent> {
        self.0.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }
}

impl TraceSink for SharedTraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}
