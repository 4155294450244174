//! # Document cache
//!
//! TTL key/value store abstraction for resolved DID documents. The default
//! in-memory backend suits a single process; a distributed backend (e.g. a
//! Redis-backed store) implements the same trait externally.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::document::Document;

/// A pluggable cache backend for resolved documents.
///
/// Keys are normalized DID strings (`did:<method>:<id>`). Writes are
/// replace-on-conflict: the last successful resolution wins. Errors signal
/// an unavailable backend; the dispatcher treats them as a degraded cache,
/// never as a failed resolution.
#[async_trait]
pub trait DocumentCache: Send + Sync {
    /// Fetch an unexpired document, or `None` on miss or expiry.
    async fn get(&self, did: &str) -> anyhow::Result<Option<Document>>;

    /// Store a document under the normalized DID with the given TTL.
    async fn set(&self, did: &str, document: &Document, ttl: Duration) -> anyhow::Result<()>;

    /// Explicitly invalidate a cached document.
    async fn delete(&self, did: &str) -> anyhow::Result<()>;
}

struct Entry {
    document: Document,
    expires_at: Instant,
}

/// In-memory cache backend over a concurrent map.
///
/// Expired entries are dropped lazily on read; [`MemoryCache::purge_expired`]
/// sweeps the remainder and is intended to be driven by a periodic task
/// owned by process bootstrap.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        before - self.entries.len()
    }

    /// Number of live (possibly expired, not yet swept) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl DocumentCache for MemoryCache {
    async fn get(&self, did: &str) -> anyhow::Result<Option<Document>> {
        let expired = match self.entries.get(did) {
            None => return Ok(None),
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.document.clone()));
            }
            Some(_) => true,
        };
        if expired {
            self.entries.remove(did);
        }
        Ok(None)
    }

    async fn set(&self, did: &str, document: &Document, ttl: Duration) -> anyhow::Result<()> {
        self.entries.insert(
            did.to_string(),
            Entry { document: document.clone(), expires_at: Instant::now() + ttl },
        );
        Ok(())
    }

    async fn delete(&self, did: &str) -> anyhow::Result<()> {
        self.entries.remove(did);
        Ok(())
    }
}
