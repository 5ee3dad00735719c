use warden_core::TtlCache;

#[test]
fn stale_entry_is_evicted_not_masked() {
    let mut cache = TtlCache::new(2.0);
    cache.set("k", 1, None, 100.0);

    assert_eq!(cache.get("k", 102.0), Some(&1));
    assert_eq!(cache.get_or("k", 102.001, -1), -1);
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.get_or("k", 102.001, -1), -1);
}

#[test]
fn missing_key_returns_default() {
    let mut cache: TtlCache<i64> = TtlCache::default();
    assert_eq!(cache.get("nope", 0.0), None);
    assert_eq!(cache.get_or("nope", 0.0, 7), 7);
}

#[test]
fn ttl_is_per_entry() {
    let mut cache = TtlCache::new(10.0);
    cache.set("short", "a", Some(1.0), 0.0);
    cache.set("long", "b", None, 0.0);

    assert_eq!(cache.get("short", 1.5), None);
    assert_eq!(cache.get("long", 1.5), Some(&"b"));
    assert_eq!(cache.default_ttl(), 10.0);
}

#[test]
fn default_ttl_change_only_affects_later_writes() {
    let mut cache = TtlCache::new(10.0);
    cache.set("old", 1, None, 0.0);
    cache.set_default_ttl(1.0);
    cache.set("new", 2, None, 0.0);

    assert_eq!(cache.get("old", 5.0), Some(&1));
    assert_eq!(cache.get("new", 5.0), None);
}

#[test]
fn get_or_insert_with_memoizes_until_stale() {
    let mut cache = TtlCache::new(3.0);
    let mut computed = 0;

    for now in [0.0, 1.0, 2.0, 3.0] {
        cache.get_or_insert_with("army_value", now, None, || {
            computed += 1;
            42
        });
    }
    assert_eq!(computed, 1);

    let v = *cache.get_or_insert_with("army_value", 3.5, None, || {
        computed += 1;
        43
    });
    assert_eq!(v, 43);
    assert_eq!(computed, 2);
}
