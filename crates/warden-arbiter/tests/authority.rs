use warden_arbiter::{AuthorityManager, RequesterClass, PRIORITY_DEFAULT, PRIORITY_LOWEST};
use warden_core::{AuthorityMode, RequesterId, StateStore, ThreatLevel, ThreatUpdate};

fn store_at(seconds: f64) -> StateStore {
    let mut store = StateStore::new();
    store.update_time(seconds);
    store
}

#[test]
fn quiet_opening_is_economy() {
    let mut store = store_at(30.0);
    let mut authority = AuthorityManager::new();
    let change = authority.update(&mut store).expect("balanced -> economy");
    assert_eq!(change.from, AuthorityMode::Balanced);
    assert_eq!(change.to, AuthorityMode::Economy);
    assert_eq!(store.authority_mode(), AuthorityMode::Economy);
}

#[test]
fn rules_are_ordered_first_match_wins() {
    let mut store = store_at(30.0);
    store.set_strategy(Some("proxy_hatch".to_string()), false);

    store.update_threat(ThreatUpdate::new(ThreatLevel::Low).with_rushing(true));
    assert_eq!(AuthorityManager::decide(&store).0, AuthorityMode::Emergency);

    store.update_threat(ThreatUpdate::new(ThreatLevel::Critical));
    assert_eq!(AuthorityManager::decide(&store).0, AuthorityMode::Emergency);

    store.update_threat(ThreatUpdate::new(ThreatLevel::High));
    assert_eq!(AuthorityManager::decide(&store).0, AuthorityMode::Combat);

    store.update_threat(ThreatUpdate::new(ThreatLevel::None));
    assert_eq!(AuthorityManager::decide(&store).0, AuthorityMode::Strategy);

    store.set_strategy(Some("proxy_hatch".to_string()), true);
    assert_eq!(AuthorityManager::decide(&store).0, AuthorityMode::Economy);

    store.update_threat(ThreatUpdate::new(ThreatLevel::Low));
    assert_eq!(AuthorityManager::decide(&store).0, AuthorityMode::Balanced);

    store.update_threat(ThreatUpdate::new(ThreatLevel::None));
    store.update_time(200.0);
    assert_eq!(AuthorityManager::decide(&store).0, AuthorityMode::Balanced);
}

#[test]
fn same_mode_is_a_no_op() {
    let mut store = store_at(10.0);
    let mut authority = AuthorityManager::new();
    assert!(authority.update(&mut store).is_some());
    let stamped = store.mode_changed_at();

    store.update_time(20.0);
    assert!(authority.update(&mut store).is_none());
    assert_eq!(store.mode_changed_at(), stamped);
    assert_eq!(authority.history().count(), 1);
}

#[test]
fn unmapped_requester_gets_default_in_balanced_without_side_effects() {
    let mut store = store_at(400.0);
    let mut authority = AuthorityManager::new();
    authority.update(&mut store);
    assert_eq!(authority.mode(), AuthorityMode::Balanced);

    let stranger = RequesterId::from("creep_spread");
    for _ in 0..5 {
        assert_eq!(authority.get_authority_priority(&stranger), PRIORITY_DEFAULT);
    }
    assert_eq!(authority.mode(), AuthorityMode::Balanced);
    assert_eq!(authority.history().count(), 0);
}

#[test]
fn emergency_favors_defense_and_demotes_strangers() {
    let mut store = store_at(100.0);
    store.update_threat(ThreatUpdate::new(ThreatLevel::Critical));
    let mut authority = AuthorityManager::new();
    authority.update(&mut store);
    assert_eq!(authority.mode(), AuthorityMode::Emergency);

    assert_eq!(authority.get_authority_priority(&RequesterId::from("defense")), 0);
    assert_eq!(authority.get_authority_priority(&RequesterId::from("economy")), PRIORITY_LOWEST);
    assert_eq!(authority.get_authority_priority(&RequesterId::from("creep_spread")), PRIORITY_LOWEST);
}

#[test]
fn registered_requester_uses_its_class_column() {
    let mut store = store_at(100.0);
    store.update_threat(ThreatUpdate::new(ThreatLevel::Critical));
    let mut authority = AuthorityManager::new();
    authority.register_requester(RequesterId::from("spine_crawlers"), RequesterClass::Defense);
    authority.update(&mut store);

    assert_eq!(authority.get_authority_priority(&RequesterId::from("spine_crawlers")), 0);
}

#[test]
fn history_is_bounded() {
    let mut store = store_at(400.0);
    let mut authority = AuthorityManager::new();
    for i in 0..100 {
        let level = if i % 2 == 0 { ThreatLevel::High } else { ThreatLevel::Low };
        store.update_threat(ThreatUpdate::new(level));
        authority.update(&mut store);
    }
    assert_eq!(authority.history().count(), 32);
}
