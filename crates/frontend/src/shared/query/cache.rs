//! Query cache port and the in-memory implementation used by the app.
//!
//! Keys are segment paths (`["users", "admin", "list", "limit=10&page=1"]`).
//! Invalidation works on prefixes, so invalidating `["users", "admin"]`
//! drops every paginated and unpaginated user list of the admin portal.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// True when one key is a prefix of the other
    pub fn overlaps(&self, other: &QueryKey) -> bool {
        self.starts_with(other) || other.starts_with(self)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheEvent {
    /// An entry was written outside of a fetch (optimistic update, rollback)
    Updated,
    /// Entries under the key were dropped and must be fetched again
    Invalidated,
}

pub type CacheListener = Arc<dyn Fn(&QueryKey, CacheEvent) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait QueryCache: Send + Sync {
    fn get(&self, key: &QueryKey) -> Option<Value>;

    /// Invalidation generation covering `key`, read before a fetch starts
    fn generation(&self, key: &QueryKey) -> u64;

    /// Store a freshly fetched value unless `key` was invalidated after
    /// `generation` was read. Does not notify subscribers.
    fn fill(&self, key: QueryKey, value: Value, generation: u64) -> bool;

    /// Overwrite an entry and notify subscribers with [`CacheEvent::Updated`].
    fn set(&self, key: QueryKey, value: Value);

    /// Drop every entry under `prefix`; returns how many were dropped.
    fn invalidate(&self, prefix: &QueryKey) -> usize;

    /// Snapshot of every entry under `prefix`
    fn entries(&self, prefix: &QueryKey) -> Vec<(QueryKey, Value)>;

    /// Listen to events whose key overlaps `prefix`
    fn subscribe(&self, prefix: QueryKey, listener: CacheListener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

#[derive(Default)]
struct CacheState {
    entries: BTreeMap<QueryKey, Value>,
    // prefix -> clock value of its last invalidation
    invalidations: BTreeMap<QueryKey, u64>,
    clock: u64,
    listeners: Vec<(SubscriptionId, QueryKey, CacheListener)>,
    next_subscription: u64,
}

/// Process-wide cache living as long as the app
#[derive(Default, Clone)]
pub struct MemoryQueryCache {
    state: Arc<Mutex<CacheState>>,
}

impl MemoryQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generation_of(state: &CacheState, key: &QueryKey) -> u64 {
        state
            .invalidations
            .iter()
            .filter(|(prefix, _)| key.starts_with(prefix))
            .map(|(_, generation)| *generation)
            .max()
            .unwrap_or(0)
    }

    fn notify(&self, key: &QueryKey, event: CacheEvent) {
        // Listeners run after the lock is released: they may read the cache.
        let listeners: Vec<CacheListener> = self
            .lock()
            .listeners
            .iter()
            .filter(|(_, prefix, _)| prefix.overlaps(key))
            .map(|(_, _, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(key, event);
        }
    }
}

impl QueryCache for MemoryQueryCache {
    fn get(&self, key: &QueryKey) -> Option<Value> {
        self.lock().entries.get(key).cloned()
    }

    fn generation(&self, key: &QueryKey) -> u64 {
        Self::generation_of(&self.lock(), key)
    }

    fn fill(&self, key: QueryKey, value: Value, generation: u64) -> bool {
        let mut state = self.lock();
        if Self::generation_of(&state, &key) != generation {
            return false;
        }
        state.entries.insert(key, value);
        true
    }

    fn set(&self, key: QueryKey, value: Value) {
        self.lock().entries.insert(key.clone(), value);
        self.notify(&key, CacheEvent::Updated);
    }

    fn invalidate(&self, prefix: &QueryKey) -> usize {
        let dropped = {
            let mut state = self.lock();
            let before = state.entries.len();
            state.entries.retain(|key, _| !key.starts_with(prefix));
            state.clock += 1;
            let clock = state.clock;
            state.invalidations.insert(prefix.clone(), clock);
            before - state.entries.len()
        };
        self.notify(prefix, CacheEvent::Invalidated);
        dropped
    }

    fn entries(&self, prefix: &QueryKey) -> Vec<(QueryKey, Value)> {
        self.lock()
            .entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn subscribe(&self, prefix: QueryKey, listener: CacheListener) -> SubscriptionId {
        let mut state = self.lock();
        state.next_subscription += 1;
        let id = SubscriptionId(state.next_subscription);
        state.listeners.push((id, prefix, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().listeners.retain(|(sub, _, _)| *sub != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(parts: &[&str]) -> QueryKey {
        QueryKey::new(parts.iter().copied())
    }

    fn put(cache: &MemoryQueryCache, k: QueryKey, value: Value) {
        let generation = cache.generation(&k);
        assert!(cache.fill(k, value, generation));
    }

    #[test]
    fn test_invalidate_drops_only_the_prefix() {
        let cache = MemoryQueryCache::new();
        put(&cache, key(&["users", "admin", "list", "page=1"]), json!(1));
        put(&cache, key(&["users", "admin", "all"]), json!(2));
        put(&cache, key(&["users", "vendor", "all"]), json!(3));
        put(&cache, key(&["roles", "admin"]), json!(4));

        assert_eq!(cache.invalidate(&key(&["users", "admin"])), 2);
        assert!(cache.get(&key(&["users", "admin", "all"])).is_none());
        assert_eq!(cache.get(&key(&["users", "vendor", "all"])), Some(json!(3)));
        assert_eq!(cache.get(&key(&["roles", "admin"])), Some(json!(4)));
    }

    #[test]
    fn test_listeners_see_overlapping_events_only() {
        let cache = MemoryQueryCache::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let id = cache.subscribe(
            key(&["users", "admin"]),
            Arc::new(move |_: &QueryKey, _: CacheEvent| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        cache.set(key(&["users", "admin", "all"]), json!([]));
        cache.invalidate(&key(&["users"]));
        cache.set(key(&["vendors", "all"]), json!([]));
        put(&cache, key(&["users", "admin", "list", "page=2"]), json!([]));
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        cache.unsubscribe(id);
        cache.invalidate(&key(&["users"]));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fill_started_before_invalidation_is_rejected() {
        let cache = MemoryQueryCache::new();
        let page = key(&["users", "admin", "list", "page=1"]);
        let before = cache.generation(&page);

        cache.invalidate(&key(&["users", "admin"]));
        assert!(!cache.fill(page.clone(), json!("old"), before));
        assert!(cache.get(&page).is_none());

        // unrelated invalidations leave the generation alone
        let current = cache.generation(&page);
        cache.invalidate(&key(&["vendors"]));
        assert!(cache.fill(page.clone(), json!("new"), current));
        assert_eq!(cache.get(&page), Some(json!("new")));
    }

    #[test]
    fn test_listener_may_read_the_cache() {
        let cache = MemoryQueryCache::new();
        let reader = cache.clone();
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        cache.subscribe(
            key(&["roles"]),
            Arc::new(move |k: &QueryKey, _: CacheEvent| {
                *sink.lock().unwrap() = reader.get(k);
            }),
        );
        cache.set(key(&["roles", "tech"]), json!(["x"]));
        assert_eq!(*seen.lock().unwrap(), Some(json!(["x"])));
    }
}
