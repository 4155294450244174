//! # DID Ethr
//!
//! The `did:ethr` method anchors identifiers in an Ethereum-style registry
//! contract. This resolver delegates the ledger read to a per-deployment
//! resolution gateway speaking the universal-resolver driver API
//! (`GET {endpoint}/1.0/identifiers/{did}`); the chain wire format itself is
//! the gateway's concern.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{MethodResolver, document_from_body, fetch_json};
use crate::document::Document;
use crate::error::Result;
use crate::identifier::Did;

/// Resolver for the `did:ethr` method.
pub struct EthrResolver {
    client: reqwest::Client,
    endpoint: Url,
}

impl EthrResolver {
    /// Create a resolver against the configured gateway endpoint, e.g.
    /// `https://resolver.example.com`.
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl MethodResolver for EthrResolver {
    fn method(&self) -> &str {
        "ethr"
    }

    async fn resolve(&self, did: &Did, timeout: Duration) -> Result<Document> {
        let url = format!(
            "{}/1.0/identifiers/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            did.did()
        );
        tracing::debug!("resolving {} from {url}", did.did());
        let body = fetch_json(&self.client, &url, timeout).await?;
        document_from_body(body)
    }
}
