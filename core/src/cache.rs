//! TTL cache for read-mostly lookups.
//!
//! Memoizes idempotent fetches keyed by logical request identity (endpoint
//! plus normalized parameters), each entry with an independent expiry.
//! Entries are evicted lazily on access and wholesale by a periodic
//! [`sweep`](TtlCache::sweep); they are never mutated in place, only
//! replaced.
//!
//! The cache assumes a single-threaded host. Two near-simultaneous misses
//! for one key both fetch and both `set`; the last writer wins. That is an
//! accepted simplification, not a dedup guarantee.

use ahash::AHashMap;
use std::collections::BTreeMap;
use tracing::debug;

/// Time source, injectable so tests can drive expiry deterministically.
pub trait Clock {
    /// Milliseconds since some fixed epoch.
    fn now_ms(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Derive the cache key for a logical request.
///
/// `BTreeMap` iteration is sorted by key, so the same endpoint and
/// parameters always produce the same key regardless of the order the
/// caller inserted them.
pub fn make_key(endpoint: &str, params: &BTreeMap<String, String>) -> String {
    let serialized = serde_json::to_string(params).unwrap_or_else(|_| "{}".to_string());
    format!("{endpoint}:{serialized}")
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: u64,
}

/// Key/value store with per-entry expiry.
///
/// Generic over the clock so tests substitute a manual one; production code
/// uses the `SystemClock` default.
#[derive(Debug, Clone)]
pub struct TtlCache<V, C: Clock = SystemClock> {
    entries: AHashMap<String, Entry<V>>,
    clock: C,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, C: Clock> TtlCache<V, C> {
    /// Create an empty cache on an explicit clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: AHashMap::new(),
            clock,
        }
    }

    /// Look up a key. An expired entry is deleted and reported absent; a
    /// live one is never returned past its expiry.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        match self.entries.get(key) {
            Some(entry) if now <= entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                debug!(%key, "cache entry expired, evicting");
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value with the given TTL, unconditionally overwriting any
    /// prior entry for the key.
    pub fn set(&mut self, key: &str, value: V, ttl_ms: u64) {
        let expires_at = self.clock.now_ms().saturating_add(ttl_ms);
        self.entries.insert(key.to_string(), Entry { value, expires_at });
    }

    /// Explicitly evict one key. Returns true if it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Evict every key containing `pattern`. Returns the eviction count.
    pub fn delete_by_pattern(&mut self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        let deleted = before - self.entries.len();
        debug!(%pattern, deleted, "pattern eviction");
        deleted
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Evict every expired entry, bounding growth from keys that are never
    /// re-queried. Intended to run on a fixed interval (see
    /// `Config::sweep_interval_secs`) independent of access patterns.
    /// Returns the eviction count.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at >= now);
        let swept = before - self.entries.len();
        if swept > 0 {
            debug!(swept, remaining = self.entries.len(), "cache sweep");
        }
        swept
    }

    /// Number of stored entries, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored keys, for diagnostics.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Cache-through fetch for a logical request.
    ///
    /// `force_refresh` bypasses the lookup entirely (and drops the stale
    /// entry) so the caller can bust staleness after a mutation elsewhere.
    /// A fetch error propagates unchanged and never populates the cache; the
    /// next call retries fresh.
    pub fn fetch_with<F>(
        &mut self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
        ttl_ms: u64,
        force_refresh: bool,
        fetch: F,
    ) -> anyhow::Result<V>
    where
        F: FnOnce() -> anyhow::Result<V>,
    {
        let key = make_key(endpoint, params);

        if force_refresh {
            debug!(%endpoint, "force refresh, bypassing cache");
            self.delete(&key);
        } else if let Some(cached) = self.get(&key) {
            debug!(%endpoint, "cache hit");
            return Ok(cached);
        }

        let value = fetch()?;
        self.set(&key, value.clone(), ttl_ms);
        Ok(value)
    }
}
