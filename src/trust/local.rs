//! # Local trust source
//!
//! An in-process allow/deny list supplied at construction. No ambient or
//! global state: different registries may carry different lists.

use std::collections::HashSet;

use async_trait::async_trait;

use super::{SourceKind, TrustDecision, TrustSource};

/// Trust source backed by explicit allow and deny lists.
///
/// The deny list wins over the allow list when an issuer appears in both.
/// Issuers on neither list get `Unknown`, deferring to the remote sources.
#[derive(Debug, Default)]
pub struct LocalSource {
    allow: HashSet<String>,
    deny: HashSet<String>,
}

impl LocalSource {
    /// Create a source from allow and deny lists.
    pub fn new(
        allow: impl IntoIterator<Item = String>, deny: impl IntoIterator<Item = String>,
    ) -> Self {
        Self { allow: allow.into_iter().collect(), deny: deny.into_iter().collect() }
    }
}

#[async_trait]
impl TrustSource for LocalSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    async fn evaluate(&self, issuer: &str) -> anyhow::Result<TrustDecision> {
        if self.deny.contains(issuer) {
            Ok(TrustDecision::Untrusted)
        } else if self.allow.contains(issuer) {
            Ok(TrustDecision::Trusted)
        } else {
            Ok(TrustDecision::Unknown)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deny_wins_over_allow() {
        let source = LocalSource::new(
            ["did:web:both.com".to_string(), "did:web:good.com".to_string()],
            ["did:web:both.com".to_string()],
        );

        assert_eq!(source.evaluate("did:web:both.com").await.unwrap(), TrustDecision::Untrusted);
        assert_eq!(source.evaluate("did:web:good.com").await.unwrap(), TrustDecision::Trusted);
        assert_eq!(source.evaluate("did:web:unlisted.com").await.unwrap(), TrustDecision::Unknown);
    }
}
