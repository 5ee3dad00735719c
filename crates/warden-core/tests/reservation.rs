use warden_core::{RequesterId, ReservationManager, ResourceType};

const POOL: ResourceType = ResourceType::from_static("Pool");

#[test]
fn reservation_blocks_until_window_expires() {
    let mut slots = ReservationManager::new();
    assert!(slots.reserve(POOL, RequesterId::from("A"), 10.0, 0.0));
    assert!(!slots.reserve(POOL, RequesterId::from("B"), 10.0, 5.0));
    assert!(slots.reserve(POOL, RequesterId::from("B"), 10.0, 11.0));
    assert_eq!(slots.holder(&POOL).map(|r| r.requester.as_str()), Some("B"));
}

#[test]
fn owner_must_wait_out_its_own_window() {
    let mut slots = ReservationManager::new();
    assert!(slots.reserve(POOL, RequesterId::from("A"), 10.0, 0.0));
    assert!(!slots.reserve(POOL, RequesterId::from("A"), 10.0, 9.99));
    assert!(slots.reserve(POOL, RequesterId::from("A"), 10.0, 10.0));
    assert_eq!(slots.holder(&POOL).map(|r| r.reserved_at), Some(10.0));
}

#[test]
fn different_slots_do_not_interfere() {
    let mut slots = ReservationManager::new();
    assert!(slots.reserve(POOL, RequesterId::from("A"), 10.0, 0.0));
    assert!(slots.reserve(ResourceType::from("Hatchery"), RequesterId::from("A"), 10.0, 0.0));
    assert_eq!(slots.len(), 2);
}

#[test]
fn is_reserved_is_a_pure_read() {
    let mut slots = ReservationManager::new();
    assert!(!slots.is_reserved(&POOL, 10.0, 0.0));
    slots.reserve(POOL, RequesterId::from("A"), 10.0, 0.0);

    assert!(slots.is_reserved(&POOL, 10.0, 5.0));
    assert!(!slots.is_reserved(&POOL, 10.0, 12.0));
    assert_eq!(slots.len(), 1);
}

#[test]
fn prune_and_release() {
    let mut slots = ReservationManager::new();
    slots.reserve(POOL, RequesterId::from("A"), 10.0, 0.0);
    slots.reserve(ResourceType::from("Spire"), RequesterId::from("B"), 10.0, 8.0);

    assert_eq!(slots.prune(10.0, 12.0), 1);
    assert!(slots.holder(&POOL).is_none());

    assert!(slots.release(&ResourceType::from("Spire")).is_some());
    assert!(slots.is_empty());
}
