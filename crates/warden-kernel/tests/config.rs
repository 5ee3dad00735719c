use std::io::Write;

use warden_arbiter::RequesterClass;
use warden_core::GamePhase;
use warden_kernel::ControlConfig;
use warden_sched::TaskPriority;

#[test]
fn defaults_when_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let config = ControlConfig::load_or_default(Some(&dir.path().join("warden.yaml"))).unwrap();
    assert_eq!(config, ControlConfig::default());
    assert_eq!(config.reservations.default_duration_seconds, 10.0);
}

#[test]
fn loads_full_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
cache:
  default_ttl_seconds: 2.5
reservations:
  default_duration_seconds: 20
requesters:
  - name: zergling_defense
    class: defense
tasks:
  - name: scouting
    priority: minimal
    enabled_phases: [early, mid]
    min_interval_ticks: 22
trace_capacity: 128
"#
    )
    .unwrap();

    let config = ControlConfig::load(file.path()).unwrap();
    assert_eq!(config.cache.default_ttl_seconds, 2.5);
    assert_eq!(config.reservations.default_duration_seconds, 20.0);
    assert_eq!(config.requesters[0].class, RequesterClass::Defense);
    assert_eq!(config.trace_capacity, Some(128));

    let scouting = config.task_override("scouting").unwrap();
    assert_eq!(scouting.settings.priority, TaskPriority::Minimal);
    assert_eq!(scouting.settings.min_interval_ticks, 22);
    assert_eq!(
        scouting.settings.enabled_phases.iter().collect::<Vec<_>>(),
        [GamePhase::Early, GamePhase::Mid]
    );
}

#[test]
fn partial_task_override_keeps_defaults() {
    let config = ControlConfig::from_yaml("tasks:\n  - name: economy\n    priority: high\n").unwrap();
    let economy = config.task_override("economy").unwrap();
    assert_eq!(economy.settings.priority, TaskPriority::High);
    assert_eq!(economy.settings.min_interval_ticks, 1);
    assert!(economy.settings.enabled_phases.contains(GamePhase::Late));
}

#[test]
fn rejects_invalid_values() {
    assert!(ControlConfig::from_yaml("cache:\n  default_ttl_seconds: -1\n").is_err());
    assert!(ControlConfig::from_yaml("reservations:\n  default_duration_seconds: 0\n").is_err());
    assert!(ControlConfig::from_yaml(
        "tasks:\n  - name: a\n  - name: a\n"
    )
    .is_err());
    assert!(ControlConfig::from_yaml("tasks:\n  - name: a\n    enabled_phases: []\n").is_err());
}

#[test]
fn unreadable_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let err = ControlConfig::load(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.yaml"));
}
