//! # DID Peer
//!
//! The `did:peer` method is self-certifying: the document is recovered from
//! the method-specific ID alone, with no network call. Numalgo 0 is
//! supported, where the ID is `0` followed by the base58-encoded JSON
//! document.

use std::time::Duration;

use async_trait::async_trait;

use super::MethodResolver;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::identifier::Did;

/// Resolver for the `did:peer` method.
#[derive(Default)]
pub struct PeerResolver;

impl PeerResolver {
    /// Create a peer resolver. Stateless; resolution needs no configuration.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Encode a document as a numalgo-0 `did:peer` method-specific ID.
    #[must_use]
    pub fn encode(document: &Document) -> String {
        let json = serde_json::to_vec(document).unwrap_or_default();
        format!("0{}", bs58::encode(json).into_string())
    }
}

#[async_trait]
impl MethodResolver for PeerResolver {
    fn method(&self) -> &str {
        "peer"
    }

    async fn resolve(&self, did: &Did, _timeout: Duration) -> Result<Document> {
        let msid = did.method_specific_id();
        let Some(encoded) = msid.strip_prefix('0') else {
            return Err(Error::MalformedDocument(format!(
                "unsupported did:peer numalgo: {}",
                msid.chars().next().unwrap_or_default()
            )));
        };

        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| Error::MalformedDocument(format!("invalid base58 encoding: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::MalformedDocument(format!("invalid embedded document: {e}")))
    }
}
