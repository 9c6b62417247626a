//! Cached question-bank client.
//!
//! Wraps the public read endpoints of the question-bank API behind the TTL
//! cache: reference data (semesters, grades, subjects) is cached for five
//! minutes, categories for three (they vary with the subject), question
//! lists for two. The random-question endpoint is never cached, to keep it
//! random, and semester status is never cached, to keep it real time.
//!
//! Uses `reqwest`'s blocking client - the call sites are synchronous and an
//! async runtime would buy nothing here. The `Transport` seam keeps the
//! client testable without a network.

use annotate_core::TtlCache;
use anyhow::Context;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Cache lifetimes per endpoint class.
pub const REFERENCE_TTL_MS: u64 = 5 * 60 * 1000;
pub const CATEGORY_TTL_MS: u64 = 3 * 60 * 1000;
pub const QUESTION_TTL_MS: u64 = 2 * 60 * 1000;

/// HTTP seam: fetch a JSON document for a path plus query parameters.
pub trait Transport {
    fn get_json(&self, path: &str, params: &BTreeMap<String, String>) -> anyhow::Result<Value>;
}

/// Real transport over `reqwest::blocking`.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport rooted at `base_url` (e.g. `http://host/api/v1`).
    pub fn new<S: Into<String>>(base_url: S) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building http client")?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, path: &str, params: &BTreeMap<String, String>) -> anyhow::Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("requesting {url}"))?;
        response.json().with_context(|| format!("decoding {url}"))
    }
}

/// Public question-bank API with per-endpoint caching.
pub struct QuestionBankClient<T> {
    transport: T,
    cache: RefCell<TtlCache<Value>>,
}

impl<T: Transport> QuestionBankClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: RefCell::new(TtlCache::new()),
        }
    }

    fn cached(
        &self,
        path: &str,
        params: &BTreeMap<String, String>,
        ttl_ms: u64,
        force_refresh: bool,
    ) -> anyhow::Result<Value> {
        self.cache
            .borrow_mut()
            .fetch_with(path, params, ttl_ms, force_refresh, || {
                self.transport.get_json(path, params)
            })
    }

    /// Active semesters. Cached.
    pub fn semesters(&self, force_refresh: bool) -> anyhow::Result<Value> {
        let mut params = BTreeMap::new();
        params.insert("only_active_time".to_string(), "true".to_string());
        self.cached("/public/semesters/", &params, REFERENCE_TTL_MS, force_refresh)
    }

    /// Grade list. Cached.
    pub fn grades(&self, force_refresh: bool) -> anyhow::Result<Value> {
        self.cached(
            "/public/grades/",
            &BTreeMap::new(),
            REFERENCE_TTL_MS,
            force_refresh,
        )
    }

    /// Subject list. Cached.
    pub fn subjects(&self, force_refresh: bool) -> anyhow::Result<Value> {
        self.cached(
            "/public/subjects/",
            &BTreeMap::new(),
            REFERENCE_TTL_MS,
            force_refresh,
        )
    }

    /// Category list, keyed by the caller's filter parameters. Cached with a
    /// shorter TTL since categories change with the subject.
    pub fn categories(
        &self,
        params: &BTreeMap<String, String>,
        force_refresh: bool,
    ) -> anyhow::Result<Value> {
        self.cached("/public/categories/", params, CATEGORY_TTL_MS, force_refresh)
    }

    /// Question list for the given filters. Cached.
    pub fn questions(
        &self,
        params: &BTreeMap<String, String>,
        force_refresh: bool,
    ) -> anyhow::Result<Value> {
        self.cached("/public/questions/", params, QUESTION_TTL_MS, force_refresh)
    }

    /// One random question. Never cached, so every call is actually random.
    pub fn random_question(&self, params: &BTreeMap<String, String>) -> anyhow::Result<Value> {
        self.transport.get_json("/public/questions/random", params)
    }

    /// A single question by id. Never cached.
    pub fn question(&self, id: u64) -> anyhow::Result<Value> {
        self.transport
            .get_json(&format!("/questions/{id}"), &BTreeMap::new())
    }

    /// Live status of a semester. Never cached.
    pub fn semester_status(&self, semester_id: u64) -> anyhow::Result<Value> {
        self.transport.get_json(
            &format!("/public/semesters/{semester_id}/status"),
            &BTreeMap::new(),
        )
    }

    /// Evict every cached response whose key contains `pattern`. Used after
    /// a mutation elsewhere invalidates a list (e.g. category edits).
    pub fn invalidate(&self, pattern: &str) -> usize {
        self.cache.borrow_mut().delete_by_pattern(pattern)
    }

    /// Drop all cached responses.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Evict expired entries; run this on the configured sweep interval.
    pub fn sweep(&self) -> usize {
        self.cache.borrow_mut().sweep()
    }

    /// Number of cached responses (expired ones included until swept).
    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Transport stub counting calls per path, optionally failing.
    struct MockTransport {
        calls: RefCell<Vec<String>>,
        counter: Cell<u64>,
        fail: Cell<bool>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                counter: Cell::new(0),
                fail: Cell::new(false),
            }
        }
    }

    impl Transport for MockTransport {
        fn get_json(&self, path: &str, _params: &BTreeMap<String, String>) -> anyhow::Result<Value> {
            self.calls.borrow_mut().push(path.to_string());
            if self.fail.get() {
                anyhow::bail!("transport failure");
            }
            self.counter.set(self.counter.get() + 1);
            Ok(serde_json::json!({ "seq": self.counter.get() }))
        }
    }

    fn client() -> QuestionBankClient<MockTransport> {
        QuestionBankClient::new(MockTransport::new())
    }

    #[test]
    fn test_reference_lookups_hit_cache() {
        let c = client();
        let first = c.grades(false).unwrap();
        let second = c.grades(false).unwrap();
        assert_eq!(first, second);
        assert_eq!(c.transport.calls.borrow().len(), 1);
    }

    #[test]
    fn test_force_refresh_bypasses_fresh_entry() {
        let c = client();
        let first = c.subjects(false).unwrap();
        let refreshed = c.subjects(true).unwrap();
        // Two transport calls, and the refreshed payload is the newer one.
        assert_eq!(c.transport.calls.borrow().len(), 2);
        assert_ne!(first, refreshed);
        // The overwrite sticks for subsequent cached reads.
        assert_eq!(c.subjects(false).unwrap(), refreshed);
    }

    #[test]
    fn test_random_question_never_cached() {
        let c = client();
        let params = BTreeMap::new();
        let a = c.random_question(&params).unwrap();
        let b = c.random_question(&params).unwrap();
        assert_ne!(a, b);
        assert_eq!(c.transport.calls.borrow().len(), 2);
        assert_eq!(c.cache_len(), 0);
    }

    #[test]
    fn test_distinct_params_distinct_entries() {
        let c = client();
        let mut math = BTreeMap::new();
        math.insert("subject".to_string(), "math".to_string());
        let mut physics = BTreeMap::new();
        physics.insert("subject".to_string(), "physics".to_string());

        let a = c.categories(&math, false).unwrap();
        let b = c.categories(&physics, false).unwrap();
        assert_ne!(a, b);
        assert_eq!(c.cache_len(), 2);
    }

    #[test]
    fn test_fetch_failure_propagates_and_is_not_cached() {
        let c = client();
        c.transport.fail.set(true);
        assert!(c.grades(false).is_err());
        assert_eq!(c.cache_len(), 0);

        // Recovery: the next call retries and caches normally.
        c.transport.fail.set(false);
        assert!(c.grades(false).is_ok());
        assert_eq!(c.cache_len(), 1);
    }

    #[test]
    fn test_invalidate_by_pattern() {
        let c = client();
        c.grades(false).unwrap();
        c.subjects(false).unwrap();
        let mut params = BTreeMap::new();
        params.insert("subject".to_string(), "math".to_string());
        c.categories(&params, false).unwrap();

        assert_eq!(c.invalidate("categories"), 1);
        assert_eq!(c.cache_len(), 2);
    }
}
