//! Named tokenizer cache.
//!
//! Building a tokenizer parses a large rank table and compiles its pattern,
//! so callers that resolve encodings by name keep the built instances here.
//! The cache is an optimization only; a miss simply builds again.

use crate::tokenizer::Tokenizer;
use crate::Result;
use ahash::AHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

/// Thread-safe map from encoding name to a shared tokenizer.
#[derive(Debug, Default)]
pub struct TokenizerCache {
    entries: RwLock<AHashMap<String, Arc<Tokenizer>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TokenizerCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, AHashMap<String, Arc<Tokenizer>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AHashMap<String, Arc<Tokenizer>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Get the cached tokenizer for `name`, or build and cache it.
    ///
    /// The factory runs without the lock held. If two threads miss at once,
    /// both build and the first insert wins; both callers get that instance.
    /// A failed build caches nothing.
    pub fn get_or_try_insert_with<F>(&self, name: &str, factory: F) -> Result<Arc<Tokenizer>>
    where
        F: FnOnce() -> Result<Tokenizer>,
    {
        if let Some(tokenizer) = self.read().get(name) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(name, "tokenizer cache hit");
            return Ok(Arc::clone(tokenizer));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let built = Arc::new(factory()?);
        debug!(name, "tokenizer cache miss, built new instance");

        let mut entries = self.write();
        Ok(Arc::clone(entries.entry(name.to_string()).or_insert(built)))
    }

    /// Get the cached tokenizer for `name`.
    pub fn get(&self, name: &str) -> Option<Arc<Tokenizer>> {
        self.read().get(name).cloned()
    }

    /// Check if `name` is cached.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Remove and return the tokenizer cached under `name`.
    pub fn remove(&self, name: &str) -> Option<Arc<Tokenizer>> {
        self.write().remove(name)
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            entries: self.len(),
            hits,
            misses,
            hit_rate: (lookups > 0).then(|| hits as f64 / lookups as f64),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that ran the factory
    pub misses: u64,
    /// Cache hit rate (None before the first lookup)
    pub hit_rate: Option<f64>,
}
