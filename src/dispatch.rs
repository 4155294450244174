//! # Resolver dispatcher
//!
//! Orchestrates resolution: parse → cache lookup → dedup → resolve →
//! validate → cache write. Designed for many concurrent callers; concurrent
//! calls for an identical DID share one underlying resolver invocation and
//! observe the same outcome.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::broadcast;

use crate::cache::DocumentCache;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::identifier::Did;
use crate::methods::MethodResolver;
use crate::registry::MethodRegistry;
use crate::validate::{ValidationPolicy, validate};

/// Dispatcher construction settings.
#[derive(Clone, Debug)]
pub struct DispatcherConfig {
    /// Cache TTL applied when a document carries no override.
    pub default_ttl: Duration,

    /// Resolution timeout applied when the caller supplies none.
    pub timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { default_ttl: Duration::from_secs(3600), timeout: Duration::from_secs(10) }
    }
}

/// Per-call resolution options.
#[derive(Clone, Debug, Default)]
pub struct ResolveOptions {
    /// Skip the cache lookup and resolve afresh. The result is still
    /// validated and written back.
    pub force_refresh: bool,

    /// Overall timeout for this call; the dispatcher's configured default
    /// applies when absent.
    pub timeout: Option<Duration>,

    /// Request-scoped validation constraints. Applied to cache hits as well
    /// as fresh resolutions, so a stricter caller never sees a document that
    /// only satisfied an earlier, laxer policy.
    pub policy: ValidationPolicy,
}

/// The outcome of an in-flight resolution, shared with every attached caller.
type Outcome = Arc<Result<Document>>;

/// Resolves DID strings to validated documents.
pub struct Dispatcher {
    registry: Arc<MethodRegistry>,
    cache: Arc<dyn DocumentCache>,
    config: DispatcherConfig,
    flights: DashMap<String, broadcast::Sender<Outcome>>,
}

impl Dispatcher {
    /// Create a dispatcher over a registry and cache backend.
    #[must_use]
    pub fn new(
        registry: Arc<MethodRegistry>, cache: Arc<dyn DocumentCache>, config: DispatcherConfig,
    ) -> Self {
        Self { registry, cache, config, flights: DashMap::new() }
    }

    /// Resolve a DID string to its validated document.
    ///
    /// # Errors
    ///
    /// Returns a value from the crate error taxonomy; see [`Error`] for
    /// which classes are retryable. An unavailable cache backend never fails
    /// the call — resolution degrades to a direct fetch.
    pub async fn resolve(&self, did: &str, opts: ResolveOptions) -> Result<Document> {
        let did: Did = did.parse()?;
        let key = did.did();
        let timeout = opts.timeout.unwrap_or(self.config.timeout);

        loop {
            if !opts.force_refresh {
                match self.cache.get(&key).await {
                    Ok(Some(document)) => {
                        tracing::debug!("cache hit for {key}");
                        // a hit may have been written under a laxer policy;
                        // the caller's constraints still apply
                        validate(&document, &did, &opts.policy)?;
                        return Ok(document);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!("cache unavailable, resolving {key} directly: {e}"),
                }
            }

            let Some(resolver) = self.registry.get(did.method()) else {
                return Err(Error::MethodNotSupported(did.method().to_string()));
            };

            enum Role {
                Leader(broadcast::Sender<Outcome>),
                Follower(broadcast::Receiver<Outcome>),
            }

            let role = match self.flights.entry(key.clone()) {
                Entry::Occupied(entry) => Role::Follower(entry.get().subscribe()),
                Entry::Vacant(entry) => {
                    let (tx, _) = broadcast::channel(1);
                    entry.insert(tx.clone());
                    Role::Leader(tx)
                }
            };

            match role {
                Role::Leader(tx) => {
                    // the guard releases the dedup key on completion, success
                    // or failure, including cancellation mid-flight
                    let guard = FlightGuard { flights: &self.flights, key: &key };
                    let result =
                        self.resolve_uncached(resolver.as_ref(), &did, timeout, &opts.policy).await;
                    drop(guard);
                    let _ = tx.send(Arc::new(result.clone()));
                    return result;
                }
                Role::Follower(mut rx) => {
                    tracing::debug!("attaching to in-flight resolution of {key}");
                    match rx.recv().await {
                        Ok(outcome) => return (*outcome).clone(),
                        // the flight ended without publishing; start over
                        Err(_) => continue,
                    }
                }
            }
        }
    }

    /// Explicitly invalidate a cached document, forcing the next resolve to
    /// go to the method's authority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDid`] for an unparseable DID or
    /// [`Error::CacheUnavailable`] if the backend cannot be reached.
    pub async fn invalidate(&self, did: &str) -> Result<()> {
        let did: Did = did.parse()?;
        self.cache
            .delete(&did.did())
            .await
            .map_err(|e| Error::CacheUnavailable(e.to_string()))
    }

    async fn resolve_uncached(
        &self, resolver: &dyn MethodResolver, did: &Did, timeout: Duration,
        policy: &ValidationPolicy,
    ) -> Result<Document> {
        let key = did.did();
        tracing::debug!("resolving {key} via method {}", did.method());

        let document = match tokio::time::timeout(timeout, resolver.resolve(did, timeout)).await {
            Ok(resolved) => resolved?,
            Err(_) => {
                return Err(Error::Network(format!(
                    "resolution of {key} timed out after {timeout:?}"
                )));
            }
        };

        validate(&document, did, policy)?;

        let ttl = document.ttl_secs().map_or(self.config.default_ttl, Duration::from_secs);
        if let Err(e) = self.cache.set(&key, &document, ttl).await {
            tracing::warn!("cache unavailable, resolution of {key} not cached: {e}");
        }
        Ok(document)
    }
}

struct FlightGuard<'a> {
    flights: &'a DashMap<String, broadcast::Sender<Outcome>>,
    key: &'a str,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flights.remove(self.key);
    }
}
