#![cfg(feature = "serde")]

use warden_trace::{TraceEvent, TraceKind, TraceLog};

#[test]
fn trace_log_serializes_with_snake_case_kinds() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(7, TraceKind::ModeChanged, "emergency").with_value(3));

    let json = serde_json::to_string(&log).unwrap();
    assert!(json.contains("\"mode_changed\""));

    let back: TraceLog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
}
