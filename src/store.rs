//! In-memory document store with time-to-live eviction.
//!
//! The extraction pipeline itself is stateless between calls; an enclosing
//! system that keeps in-flight documents across requests does so through
//! this store, which serializes access behind a mutex and evicts entries
//! older than the TTL. Eviction runs best-effort on every insert (matching
//! request-time cleanup) and on demand via [`DocumentStore::evict_expired`]
//! for timer-driven sweeps.

use crate::model::FormDocument;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct StoredEntry {
    created: Instant,
    document: Arc<Mutex<FormDocument>>,
}

/// Concurrency-safe store of in-flight documents keyed by document id.
pub struct DocumentStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, StoredEntry>>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl DocumentStore {
    /// Create a store whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Insert a document under its own id, returning the id. Runs an
    /// eviction sweep first.
    pub fn insert(&self, document: FormDocument) -> String {
        self.evict_expired();
        let id = document.document_id.clone();
        let mut inner = self.lock();
        inner.insert(
            id.clone(),
            StoredEntry {
                created: Instant::now(),
                document: Arc::new(Mutex::new(document)),
            },
        );
        id
    }

    /// Fetch a live document by id. Expired entries are treated as absent
    /// even before a sweep removes them.
    pub fn get(&self, document_id: &str) -> Option<Arc<Mutex<FormDocument>>> {
        let inner = self.lock();
        let entry = inner.get(document_id)?;
        if entry.created.elapsed() > self.ttl {
            return None;
        }
        Some(Arc::clone(&entry.document))
    }

    /// Remove a document explicitly, returning whether it existed.
    pub fn remove(&self, document_id: &str) -> bool {
        self.lock().remove(document_id).is_some()
    }

    /// Drop all entries older than the TTL; returns how many were evicted.
    pub fn evict_expired(&self) -> usize {
        let mut inner = self.lock();
        let before = inner.len();
        inner.retain(|_, entry| entry.created.elapsed() <= self.ttl);
        before - inner.len()
    }

    /// Number of stored entries, expired ones included until a sweep.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredEntry>> {
        // A poisoned lock only means another thread panicked mid-access;
        // the map itself is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
