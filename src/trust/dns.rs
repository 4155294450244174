//! # DNS trust source
//!
//! Reads verdicts from TXT records published under a configured zone. Each
//! record has the form `did=<issuer>;trust=<verdict>`; records that do not
//! parse are ignored. An empty or absent record set is `Unknown`.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::error::ResolveErrorKind;

use super::{SourceKind, TrustDecision, TrustSource};

/// Trust source backed by TXT records in a DNS zone.
pub struct DnsSource {
    resolver: TokioAsyncResolver,
    zone: String,
}

impl DnsSource {
    /// Create a source querying TXT records under `zone` with the system's
    /// default DNS configuration.
    #[must_use]
    pub fn new(zone: impl Into<String>) -> Self {
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), Default::default()),
            zone: zone.into(),
        }
    }

    /// Create a source with a caller-configured resolver.
    #[must_use]
    pub fn with_resolver(resolver: TokioAsyncResolver, zone: impl Into<String>) -> Self {
        Self { resolver, zone: zone.into() }
    }

    fn decision_from_records<'a>(
        records: impl Iterator<Item = &'a str>, issuer: &str,
    ) -> TrustDecision {
        for record in records {
            let Some((did, trust)) = record.split_once(';') else {
                continue;
            };
            let (Some(did), Some(trust)) =
                (did.trim().strip_prefix("did="), trust.trim().strip_prefix("trust="))
            else {
                continue;
            };
            if did != issuer {
                continue;
            }
            return match trust {
                "trusted" => TrustDecision::Trusted,
                "untrusted" => TrustDecision::Untrusted,
                _ => TrustDecision::Unknown,
            };
        }
        TrustDecision::Unknown
    }
}

#[async_trait]
impl TrustSource for DnsSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Dns
    }

    async fn evaluate(&self, issuer: &str) -> anyhow::Result<TrustDecision> {
        let fqdn = format!("{}.", self.zone.trim_end_matches('.'));
        let response = match self.resolver.txt_lookup(fqdn).await {
            Ok(response) => response,
            // an empty zone is a silent source, not an outage
            Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
                return Ok(TrustDecision::Unknown);
            }
            Err(e) => return Err(e.into()),
        };

        let records: Vec<String> = response
            .iter()
            .flat_map(|txt| txt.txt_data().iter())
            .map(|data| String::from_utf8_lossy(data).to_string())
            .collect();
        Ok(Self::decision_from_records(records.iter().map(String::as_str), issuer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_parse_to_decisions() {
        let records = [
            "garbage",
            "did=did:web:a.com;trust=trusted",
            "did=did:web:b.com;trust=untrusted",
            "did=did:web:c.com;trust=maybe",
        ];

        let decide = |issuer| DnsSource::decision_from_records(records.iter().copied(), issuer);
        assert_eq!(decide("did:web:a.com"), TrustDecision::Trusted);
        assert_eq!(decide("did:web:b.com"), TrustDecision::Untrusted);
        assert_eq!(decide("did:web:c.com"), TrustDecision::Unknown);
        assert_eq!(decide("did:web:absent.com"), TrustDecision::Unknown);
    }
}
