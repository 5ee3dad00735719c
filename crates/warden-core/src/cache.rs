use std::collections::BTreeMap;

/// Default lifetime of a cache entry, in simulation seconds.
pub const DEFAULT_TTL: f64 = 5.0;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    written_at: f64,
    ttl: f64,
}

impl<V> CacheEntry<V> {
    fn is_stale(&self, now: f64) -> bool {
        now - self.written_at > self.ttl
    }
}

/// Memo table for derived values, aged against simulation time.
///
/// Each entry keeps the TTL it was written with. Expiry is lazy: the read
/// that discovers a stale entry evicts it.
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    entries: BTreeMap<String, CacheEntry<V>>,
    default_ttl: f64,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V> TtlCache<V> {
    pub fn new(default_ttl: f64) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_ttl: sanitize_ttl(default_ttl),
        }
    }

    pub fn default_ttl(&self) -> f64 {
        self.default_ttl
    }

    /// Only affects entries written afterwards.
    pub fn set_default_ttl(&mut self, ttl: f64) {
        self.default_ttl = sanitize_ttl(ttl);
    }

    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<f64>, now: f64) {
        let ttl = ttl.map(sanitize_ttl).unwrap_or(self.default_ttl);
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                written_at: now,
                ttl,
            },
        );
    }

    pub fn get(&mut self, key: &str, now: f64) -> Option<&V> {
        if self.entries.get(key)?.is_stale(now) {
            tracing::debug!(key, now, "evicting stale cache entry");
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    pub fn get_or(&mut self, key: &str, now: f64, default: V) -> V
    where
        V: Clone,
    {
        self.get(key, now).cloned().unwrap_or(default)
    }

    /// Returns the fresh cached value or computes, stores and returns a new one.
    pub fn get_or_insert_with<F>(&mut self, key: &str, now: f64, ttl: Option<f64>, make: F) -> &V
    where
        F: FnOnce() -> V,
    {
        let fresh = self.entries.get(key).is_some_and(|e| !e.is_stale(now));
        if !fresh {
            self.set(key, make(), ttl, now);
        }
        &self.entries[key].value
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, stale ones included until they are read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn sanitize_ttl(ttl: f64) -> f64 {
    if ttl.is_nan() {
        0.0
    } else {
        ttl.max(0.0)
    }
}
