//! # Method resolvers
//!
//! One resolver per DID method. Web, Ethr and Ion perform network I/O
//! against a per-deployment endpoint; Peer resolves purely from the DID's
//! self-contained encoding.

pub mod ethr;
pub mod ion;
pub mod peer;
pub mod web;

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::identifier::Did;

/// Pause before the single bounded retry of a network-class failure.
const RETRY_DELAY: Duration = Duration::from_millis(250);

/// Resolves one DID method to a document.
///
/// Implementations must respect the supplied timeout and report
/// network-class failures distinctly from definitive not-found or malformed
/// outcomes; dispatcher behavior depends on the distinction.
#[async_trait]
pub trait MethodResolver: Send + Sync {
    /// The method this resolver handles, e.g. `web`.
    fn method(&self) -> &str;

    /// Resolve a DID to its document.
    async fn resolve(&self, did: &Did, timeout: Duration) -> Result<Document>;
}

/// GET a JSON body, classifying failures per the crate error taxonomy and
/// retrying a network-class failure once.
pub(crate) async fn fetch_json(
    client: &reqwest::Client, url: &str, timeout: Duration,
) -> Result<Value> {
    match fetch_json_once(client, url, timeout).await {
        Err(Error::Network(reason)) => {
            tracing::debug!("retrying {url} after network failure: {reason}");
            tokio::time::sleep(RETRY_DELAY).await;
            fetch_json_once(client, url, timeout).await
        }
        other => other,
    }
}

async fn fetch_json_once(
    client: &reqwest::Client, url: &str, timeout: Duration,
) -> Result<Value> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| Error::Network(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::GONE {
        return Err(Error::NotFound(format!("{url} returned {status}")));
    }
    if !status.is_success() {
        return Err(Error::Network(format!("{url} returned {status}")));
    }

    response
        .json()
        .await
        .map_err(|e| Error::MalformedDocument(format!("invalid JSON from {url}: {e}")))
}

/// Extract a document from a resolution response body.
///
/// Accepts either a bare document or a W3C resolution envelope with a
/// `didDocument` member, as returned by universal-resolver-style endpoints.
pub(crate) fn document_from_body(body: Value) -> Result<Document> {
    let value = match body.get("didDocument") {
        Some(Value::Null) => {
            return Err(Error::NotFound("resolution response carries no document".into()));
        }
        Some(doc) => doc.clone(),
        None => body,
    };
    serde_json::from_value(value)
        .map_err(|e| Error::MalformedDocument(format!("issue deserializing document: {e}")))
}
