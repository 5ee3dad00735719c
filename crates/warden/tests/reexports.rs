#![cfg(feature = "full")]

use warden::core::{StateStore, ThreatLevel, ThreatUpdate};
use warden::kernel::{ControlConfig, ControlPlane, Observation};

#[test]
fn umbrella_paths_resolve() {
    let mut store = StateStore::new();
    store.update_threat(ThreatUpdate::new(ThreatLevel::High));
    assert_eq!(store.threat().level, ThreatLevel::High);

    let mut plane = ControlPlane::new(ControlConfig::default());
    plane.tick(&Observation::at(1.0));
    assert_eq!(plane.status().tick, 1);
}

#[cfg(feature = "serde")]
#[test]
fn mode_serializes_snake_case() {
    let mode = warden::core::AuthorityMode::Emergency;
    assert_eq!(serde_json::to_string(&mode).unwrap(), "\"emergency\"");
}
