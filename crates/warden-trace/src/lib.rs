//! Decision tracing for the control plane.
//!
//! Schedulers and the kernel emit small [`TraceEvent`]s ("task X ran on tick
//! N", "mode changed") into a [`TraceSink`]. Rendering and persistence are
//! left to whoever owns the sink.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    NullTraceSink, SharedTraceLog, TraceEvent, TraceKind, TraceLog, TraceSink, VecTraceSink,
};
