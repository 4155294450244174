//! # Trust registry
//!
//! Answers whether an issuer identifier is trusted by consulting an ordered
//! list of heterogeneous sources: a local allow/deny list, a remote HTTP
//! registry, DNS TXT records and a blockchain-anchored contract. Queried
//! independently of resolution, keyed by issuer or controller identifiers
//! extracted from resolved documents.

pub mod blockchain;
pub mod dns;
pub mod http;
pub mod local;

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Error;

pub use self::blockchain::BlockchainSource;
pub use self::dns::DnsSource;
pub use self::http::HttpSource;
pub use self::local::LocalSource;

/// A trust verdict for an issuer.
///
/// `Unknown` is conservative "not trusted" for authorization purposes but
/// remains distinguishable from an explicit `Untrusted` for audit purposes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrustDecision {
    /// The source explicitly trusts the issuer.
    Trusted,

    /// The source explicitly distrusts the issuer.
    Untrusted,

    /// The source has no opinion on the issuer.
    #[default]
    Unknown,
}

/// The kind of source that produced a verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Explicit in-process allow/deny list.
    Local,

    /// Remote trust registry API.
    Http,

    /// DNS TXT-record lookup.
    Dns,

    /// Smart-contract read.
    Blockchain,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Http => write!(f, "http"),
            Self::Dns => write!(f, "dns"),
            Self::Blockchain => write!(f, "blockchain"),
        }
    }
}

/// The outcome of one trust query. Ephemeral: every query re-evaluates the
/// sources; callers may cache externally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustRecord {
    /// The issuer the query was about.
    pub issuer: String,

    /// The source whose verdict decided the outcome, or `None` when every
    /// source was exhausted without a definitive verdict.
    pub source: Option<SourceKind>,

    /// The aggregated verdict.
    pub decision: TrustDecision,

    /// When the verdict was produced.
    pub observed_at: DateTime<Utc>,
}

/// A single authoritative source of trust verdicts.
///
/// An `Err` means the source is unreachable; the aggregator skips it. A
/// source never reports `Untrusted` merely because it cannot answer.
#[async_trait]
pub trait TrustSource: Send + Sync {
    /// The kind of this source, for records and logging.
    fn kind(&self) -> SourceKind;

    /// Evaluate the issuer against this source alone.
    async fn evaluate(&self, issuer: &str) -> anyhow::Result<TrustDecision>;
}

/// Aggregates trust verdicts across sources in configured order.
///
/// The local source is always consulted first and its explicit verdict is
/// authoritative: local policy overrides remote signals. Remaining sources
/// are consulted in the order supplied; the first definitive verdict wins.
pub struct MultiSourceTrustRegistry {
    sources: Vec<Arc<dyn TrustSource>>,
    source_timeout: Duration,
}

impl MultiSourceTrustRegistry {
    /// Create a registry from the local source and the ordered remote
    /// sources to fall back to.
    #[must_use]
    pub fn new(local: Arc<LocalSource>, remotes: Vec<Arc<dyn TrustSource>>) -> Self {
        let mut sources: Vec<Arc<dyn TrustSource>> = vec![local];
        sources.extend(remotes);
        Self { sources, source_timeout: Duration::from_secs(5) }
    }

    /// Override the per-source timeout budget (default 5s). A slow source
    /// never delays evaluation of subsequent sources beyond this budget.
    #[must_use]
    pub const fn with_source_timeout(mut self, timeout: Duration) -> Self {
        self.source_timeout = timeout;
        self
    }

    /// Evaluate the issuer across all sources.
    ///
    /// Infallible: an unreachable source is skipped, and exhausting every
    /// source yields an `Unknown` record.
    pub async fn is_trusted(&self, issuer: &str) -> TrustRecord {
        for source in &self.sources {
            let kind = source.kind();
            match tokio::time::timeout(self.source_timeout, source.evaluate(issuer)).await {
                Ok(Ok(TrustDecision::Unknown)) => {
                    tracing::debug!("{kind} source has no opinion on {issuer}");
                }
                Ok(Ok(decision)) => {
                    tracing::debug!("{kind} source decided {decision:?} for {issuer}");
                    return TrustRecord {
                        issuer: issuer.to_string(),
                        source: Some(kind),
                        decision,
                        observed_at: Utc::now(),
                    };
                }
                Ok(Err(e)) => {
                    let reason = Error::TrustUnavailable(format!("{kind} source: {e}"));
                    tracing::warn!("skipping source for {issuer}: {reason}");
                }
                Err(_) => {
                    let reason = Error::TrustUnavailable(format!(
                        "{kind} source timed out after {:?}",
                        self.source_timeout
                    ));
                    tracing::warn!("skipping source for {issuer}: {reason}");
                }
            }
        }

        TrustRecord {
            issuer: issuer.to_string(),
            source: None,
            decision: TrustDecision::Unknown,
            observed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        kind: SourceKind,
        verdict: anyhow::Result<TrustDecision>,
        delay: Duration,
    }

    impl StubSource {
        fn verdict(kind: SourceKind, decision: TrustDecision) -> Arc<Self> {
            Arc::new(Self { kind, verdict: Ok(decision), delay: Duration::ZERO })
        }

        fn unreachable(kind: SourceKind) -> Arc<Self> {
            Arc::new(Self {
                kind,
                verdict: Err(anyhow::anyhow!("connection refused")),
                delay: Duration::ZERO,
            })
        }

        fn slow(kind: SourceKind, decision: TrustDecision, delay: Duration) -> Arc<Self> {
            Arc::new(Self { kind, verdict: Ok(decision), delay })
        }
    }

    #[async_trait]
    impl TrustSource for StubSource {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        async fn evaluate(&self, _issuer: &str) -> anyhow::Result<TrustDecision> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.verdict {
                Ok(decision) => Ok(*decision),
                Err(e) => Err(anyhow::anyhow!("{e}")),
            }
        }
    }

    #[tokio::test]
    async fn local_denial_overrides_remote_trust() {
        let local = Arc::new(LocalSource::new([], ["did:web:x.com".to_string()]));
        let registry = MultiSourceTrustRegistry::new(
            local,
            vec![StubSource::verdict(SourceKind::Blockchain, TrustDecision::Trusted)],
        );

        let record = registry.is_trusted("did:web:x.com").await;
        assert_eq!(record.decision, TrustDecision::Untrusted);
        assert_eq!(record.source, Some(SourceKind::Local));
    }

    #[tokio::test]
    async fn unreachable_source_is_skipped_not_untrusted() {
        let local = Arc::new(LocalSource::default());
        let registry = MultiSourceTrustRegistry::new(
            local,
            vec![
                StubSource::unreachable(SourceKind::Http),
                StubSource::verdict(SourceKind::Dns, TrustDecision::Trusted),
            ],
        );

        let record = registry.is_trusted("did:web:y.com").await;
        assert_eq!(record.decision, TrustDecision::Trusted);
        assert_eq!(record.source, Some(SourceKind::Dns));
    }

    #[tokio::test]
    async fn exhausted_sources_yield_unknown() {
        let local = Arc::new(LocalSource::default());
        let registry = MultiSourceTrustRegistry::new(
            local,
            vec![StubSource::unreachable(SourceKind::Http)],
        );

        let record = registry.is_trusted("did:web:z.com").await;
        assert_eq!(record.decision, TrustDecision::Unknown);
        assert_eq!(record.source, None);
    }

    #[tokio::test]
    async fn slow_source_is_bounded_by_its_timeout() {
        let local = Arc::new(LocalSource::default());
        let registry = MultiSourceTrustRegistry::new(
            local,
            vec![
                StubSource::slow(
                    SourceKind::Http,
                    TrustDecision::Untrusted,
                    Duration::from_secs(30),
                ),
                StubSource::verdict(SourceKind::Dns, TrustDecision::Trusted),
            ],
        )
        .with_source_timeout(Duration::from_millis(20));

        let record = registry.is_trusted("did:web:slow.com").await;
        assert_eq!(record.decision, TrustDecision::Trusted);
        assert_eq!(record.source, Some(SourceKind::Dns));
    }

    #[tokio::test]
    async fn first_definitive_verdict_wins() {
        let local = Arc::new(LocalSource::default());
        let registry = MultiSourceTrustRegistry::new(
            local,
            vec![
                StubSource::verdict(SourceKind::Http, TrustDecision::Untrusted),
                StubSource::verdict(SourceKind::Dns, TrustDecision::Trusted),
            ],
        );

        let record = registry.is_trusted("did:web:contested.com").await;
        assert_eq!(record.decision, TrustDecision::Untrusted);
        assert_eq!(record.source, Some(SourceKind::Http));
    }
}
