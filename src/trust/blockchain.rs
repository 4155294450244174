//! # Blockchain trust source
//!
//! Reads a trust-registry smart contract through a JSON-RPC node. The
//! contract exposes a read-only `trust_isTrusted(contract, issuer)` call
//! returning `true`, `false` or `null` for no entry.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{SourceKind, TrustDecision, TrustSource};

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<bool>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Trust source backed by an on-chain registry contract.
pub struct BlockchainSource {
    client: reqwest::Client,
    rpc: Url,
    contract: String,
}

impl BlockchainSource {
    /// Create a source reading `contract` through the node at `rpc`.
    #[must_use]
    pub fn new(client: reqwest::Client, rpc: Url, contract: impl Into<String>) -> Self {
        Self { client, rpc, contract: contract.into() }
    }

    fn decision_for(result: Option<bool>) -> TrustDecision {
        match result {
            Some(true) => TrustDecision::Trusted,
            Some(false) => TrustDecision::Untrusted,
            None => TrustDecision::Unknown,
        }
    }
}

#[async_trait]
impl TrustSource for BlockchainSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Blockchain
    }

    async fn evaluate(&self, issuer: &str) -> anyhow::Result<TrustDecision> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "trust_isTrusted",
            "params": [self.contract, issuer],
        });

        let response: RpcResponse = self
            .client
            .post(self.rpc.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(e) = response.error {
            anyhow::bail!("node returned error {}: {}", e.code, e.message);
        }
        Ok(Self::decision_for(response.result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_results_map_to_decisions() {
        assert_eq!(BlockchainSource::decision_for(Some(true)), TrustDecision::Trusted);
        assert_eq!(BlockchainSource::decision_for(Some(false)), TrustDecision::Untrusted);
        assert_eq!(BlockchainSource::decision_for(None), TrustDecision::Unknown);
    }
}
