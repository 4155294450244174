//! # HTTP trust source
//!
//! Queries a remote trust registry over HTTPS: `GET {base}/{issuer}` returns
//! a JSON body whose `status` field carries the verdict. A `404` means the
//! registry has no entry for the issuer, which is `Unknown`, not an error.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use super::{SourceKind, TrustDecision, TrustSource};

#[derive(Deserialize)]
struct StatusBody {
    status: String,
}

/// Trust source backed by a remote registry API.
pub struct HttpSource {
    client: reqwest::Client,
    base: Url,
}

impl HttpSource {
    /// Create a source querying the registry at `base`.
    #[must_use]
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    fn decision_for(status: &str) -> TrustDecision {
        match status {
            "trusted" => TrustDecision::Trusted,
            "untrusted" | "revoked" => TrustDecision::Untrusted,
            _ => TrustDecision::Unknown,
        }
    }
}

#[async_trait]
impl TrustSource for HttpSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Http
    }

    async fn evaluate(&self, issuer: &str) -> anyhow::Result<TrustDecision> {
        let url = format!("{}/{issuer}", self.base.as_str().trim_end_matches('/'));
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(TrustDecision::Unknown);
        }
        let body: StatusBody = response.error_for_status()?.json().await?;
        Ok(Self::decision_for(&body.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_values_map_to_decisions() {
        assert_eq!(HttpSource::decision_for("trusted"), TrustDecision::Trusted);
        assert_eq!(HttpSource::decision_for("untrusted"), TrustDecision::Untrusted);
        assert_eq!(HttpSource::decision_for("revoked"), TrustDecision::Untrusted);
        assert_eq!(HttpSource::decision_for("pending"), TrustDecision::Unknown);
    }
}
