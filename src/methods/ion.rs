//! # DID ION
//!
//! The `did:ion` method anchors identifiers via a Sidetree network. This
//! resolver queries a configured ION node's resolution endpoint
//! (`GET {node}/identifiers/{did}`), which returns a W3C resolution
//! envelope.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{MethodResolver, document_from_body, fetch_json};
use crate::document::Document;
use crate::error::Result;
use crate::identifier::Did;

/// Resolver for the `did:ion` method.
pub struct IonResolver {
    client: reqwest::Client,
    node: Url,
}

impl IonResolver {
    /// Create a resolver against the configured ION node, e.g.
    /// `https://ion.example.com`.
    #[must_use]
    pub fn new(client: reqwest::Client, node: Url) -> Self {
        Self { client, node }
    }
}

#[async_trait]
impl MethodResolver for IonResolver {
    fn method(&self) -> &str {
        "ion"
    }

    async fn resolve(&self, did: &Did, timeout: Duration) -> Result<Document> {
        let url =
            format!("{}/identifiers/{}", self.node.as_str().trim_end_matches('/'), did.did());
        tracing::debug!("resolving {} from {url}", did.did());
        let body = fetch_json(&self.client, &url, timeout).await?;
        document_from_body(body)
    }
}
