use warden_arbiter::{AuthorityManager, Enqueued, RequestArbiter};
use warden_core::{RequesterId, ResourceType, StateStore};

fn rid(name: &'static str) -> RequesterId {
    RequesterId::from_static(name)
}

fn res(name: &'static str) -> ResourceType {
    ResourceType::from_static(name)
}

#[test]
fn duplicate_enqueue_overwrites_count_in_place() {
    let mut arbiter = RequestArbiter::new();
    assert_eq!(arbiter.enqueue_with_priority(res("X"), 3, rid("A"), 1), Enqueued::Appended);
    assert_eq!(arbiter.enqueue_with_priority(res("Y"), 1, rid("B"), 1), Enqueued::Appended);
    assert_eq!(
        arbiter.enqueue_with_priority(res("X"), 7, rid("A"), 1),
        Enqueued::Merged { previous: 3 }
    );

    assert_eq!(arbiter.len(), 2);
    let first = arbiter.dequeue_next().unwrap();
    assert_eq!(first.resource, res("X"));
    assert_eq!(first.count, 7);
    assert_eq!(arbiter.dequeue_next().unwrap().resource, res("Y"));
}

#[test]
fn same_pair_in_different_buckets_is_not_merged() {
    let mut arbiter = RequestArbiter::new();
    arbiter.enqueue_with_priority(res("X"), 3, rid("A"), 1);
    arbiter.enqueue_with_priority(res("X"), 4, rid("A"), 2);
    assert_eq!(arbiter.len(), 2);
}

#[test]
fn drains_in_priority_then_fifo_order() {
    let mut arbiter = RequestArbiter::new();
    arbiter.enqueue_with_priority(res("r2"), 1, rid("A"), 2);
    arbiter.enqueue_with_priority(res("r1"), 1, rid("A"), 1);
    arbiter.enqueue_with_priority(res("r1b"), 1, rid("B"), 1);

    let order: Vec<_> = arbiter.drain().map(|r| r.resource.to_string()).collect();
    assert_eq!(order, ["r1", "r1b", "r2"]);
    assert_eq!(arbiter.dequeue_next(), None);
}

#[test]
fn empty_arbiter_yields_none() {
    let mut arbiter = RequestArbiter::new();
    assert!(arbiter.is_empty());
    assert_eq!(arbiter.peek_next(), None);
    assert_eq!(arbiter.dequeue_next(), None);
}

#[test]
fn missing_priority_resolves_through_authority() {
    let mut store = StateStore::new();
    store.update_time(30.0);
    let mut authority = AuthorityManager::new();
    authority.update(&mut store);

    let mut arbiter = RequestArbiter::new();
    arbiter.enqueue(&authority, res("Drone"), 2, rid("economy"), None);
    arbiter.enqueue(&authority, res("Zergling"), 4, rid("combat"), None);
    arbiter.enqueue(&authority, res("Overlord"), 1, rid("combat"), Some(0));

    let depths = arbiter.depths();
    assert_eq!(depths.get(&0), Some(&2));
    assert_eq!(depths.get(&2), Some(&1));

    let first = arbiter.dequeue_next().unwrap();
    assert_eq!(first.resource, res("Drone"));
    assert_eq!(first.priority, 0);
}

#[test]
fn clear_by_requester_touches_every_bucket() {
    let mut arbiter = RequestArbiter::new();
    arbiter.enqueue_with_priority(res("X"), 1, rid("A"), 0);
    arbiter.enqueue_with_priority(res("Y"), 1, rid("A"), 3);
    arbiter.enqueue_with_priority(res("Z"), 1, rid("B"), 3);

    assert_eq!(arbiter.clear(Some(&rid("A"))), 2);
    assert_eq!(arbiter.len(), 1);
    assert_eq!(arbiter.peek_next().map(|r| r.requester.as_str()), Some("B"));

    assert_eq!(arbiter.clear(None), 1);
    assert!(arbiter.is_empty());
    assert!(arbiter.depths().is_empty());
}
