//! # DID Web
//!
//! The `did:web` method hosts a DID document at a well-known HTTPS path
//! derived from the method-specific ID:
//!
//! - `did:web:example.com` → `https://example.com/.well-known/did.json`
//! - `did:web:example.com:user:alice` → `https://example.com/user/alice/did.json`
//!
//! A port must be url-encoded in the DID (`%3A`), e.g.
//! `did:web:example.com%3A8080`.

use std::time::Duration;

use async_trait::async_trait;

use super::{MethodResolver, document_from_body, fetch_json};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::identifier::Did;

/// Resolver for the `did:web` method.
pub struct WebResolver {
    client: reqwest::Client,
}

impl WebResolver {
    /// Create a resolver using the supplied HTTP client.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Construct the well-known HTTPS URL for a `did:web` DID.
    fn url_for(did: &Did) -> Result<String> {
        let id = did.method_specific_id();
        let has_path = id.contains(':');
        // the port escape may be written in either case
        let base =
            format!("https://{}", id.replace(':', "/").replace("%3A", ":").replace("%3a", ":"));
        let location =
            if has_path { format!("{base}/did.json") } else { format!("{base}/.well-known/did.json") };

        // confirm the derived URL is well-formed before going to the network
        url::Url::parse(&location)
            .map_err(|e| Error::InvalidDid(format!("{} maps to an invalid URL: {e}", did.did())))?;
        Ok(location)
    }
}

#[async_trait]
impl MethodResolver for WebResolver {
    fn method(&self) -> &str {
        "web"
    }

    async fn resolve(&self, did: &Did, timeout: Duration) -> Result<Document> {
        let url = Self::url_for(did)?;
        tracing::debug!("resolving {} from {url}", did.did());
        let body = fetch_json(&self.client, &url, timeout).await?;
        document_from_body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_for(s: &str) -> String {
        WebResolver::url_for(&s.parse().unwrap()).unwrap()
    }

    #[test]
    fn well_known_url() {
        assert_eq!(url_for("did:web:example.com"), "https://example.com/.well-known/did.json");
    }

    #[test]
    fn path_url() {
        assert_eq!(
            url_for("did:web:example.com:user:alice"),
            "https://example.com/user/alice/did.json"
        );
    }

    #[test]
    fn port_url() {
        assert_eq!(
            url_for("did:web:example.com%3A8080:user:alice"),
            "https://example.com:8080/user/alice/did.json"
        );
    }

    #[test]
    fn lowercase_port_escape() {
        assert_eq!(url_for("did:web:example.com%3a8080"), "https://example.com:8080/.well-known/did.json");
    }
}
