//! # DID Document
//!
//! The structured record a method resolver produces: the verification
//! methods and service endpoints controlled by a DID, plus document
//! metadata. Documents are immutable once constructed; a newer resolution
//! supersedes rather than mutates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// DID Document.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The context of the DID document. Must be non-empty; ordering is
    /// preserved.
    #[serde(rename = "@context")]
    pub context: Vec<String>,

    /// The DID for the subject described by this document. Must equal the
    /// DID that was resolved, or an alias listed in `also_known_as`.
    pub id: String,

    /// Other identifiers for the same subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub also_known_as: Option<Vec<String>>,

    /// The identifier of the controller of this document, where it differs
    /// from the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,

    /// Verification methods the subject can use to prove control.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub verification_method: Vec<VerificationMethod>,

    /// Service endpoints advertised by the subject.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub service: Vec<Service>,

    /// Metadata about the document itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

impl Document {
    /// Find a verification method by its ID.
    #[must_use]
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// Find a service endpoint by its ID.
    #[must_use]
    pub fn service(&self, id: &str) -> Option<&Service> {
        self.service.iter().find(|svc| svc.id == id)
    }

    /// Whether `did` is the document subject or a listed alias.
    #[must_use]
    pub fn describes(&self, did: &str) -> bool {
        self.id == did
            || self.also_known_as.as_ref().is_some_and(|aka| aka.iter().any(|a| a == did))
    }

    /// The document-specific cache TTL override, if one is carried.
    #[must_use]
    pub fn ttl_secs(&self) -> Option<u64> {
        self.metadata.as_ref().and_then(|md| md.ttl)
    }
}

/// A cryptographic key descriptor bound to a DID, used to prove control.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Identifier of the verification method, typically the DID with a
    /// fragment, e.g. `did:web:example.com#key-1`.
    pub id: String,

    /// Verification method type, e.g. `Ed25519VerificationKey2020`.
    #[serde(rename = "type")]
    pub type_: String,

    /// The DID of the controller of the key.
    pub controller: String,

    /// Key material. Opaque to this crate; consumed by an external proof
    /// verifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_multibase: Option<String>,
}

/// A named, typed network location advertised by a DID document.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Identifier of the service, e.g. `did:web:example.com#agent`.
    pub id: String,

    /// Service type, e.g. `DIDCommMessaging`.
    #[serde(rename = "type")]
    pub type_: String,

    /// The service's endpoint URL.
    pub service_endpoint: String,
}

/// Metadata associated with a DID document.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// When the document was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// When the document was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Method-supplied cache TTL override, in seconds. Absent means the
    /// dispatcher's configured default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        serde_json::from_value(serde_json::json!({
            "@context": ["https://www.w3.org/ns/did/v1"],
            "id": "did:web:example.com",
            "verificationMethod": [{
                "id": "did:web:example.com#key-1",
                "type": "Ed25519VerificationKey2020",
                "controller": "did:web:example.com",
                "publicKeyMultibase": "z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"
            }],
            "service": [{
                "id": "did:web:example.com#agent",
                "type": "DIDCommMessaging",
                "serviceEndpoint": "https://agent.example.com"
            }],
            "metadata": { "ttl": 600 }
        }))
        .unwrap()
    }

    #[test]
    fn deserialize_camel_case() {
        let doc = sample();
        assert_eq!(doc.context, vec!["https://www.w3.org/ns/did/v1"]);
        assert_eq!(doc.verification_method[0].type_, "Ed25519VerificationKey2020");
        assert_eq!(doc.service[0].service_endpoint, "https://agent.example.com");
        assert_eq!(doc.ttl_secs(), Some(600));
    }

    #[test]
    fn getters() {
        let doc = sample();
        assert!(doc.verification_method("did:web:example.com#key-1").is_some());
        assert!(doc.verification_method("did:web:example.com#key-2").is_none());
        assert!(doc.service("did:web:example.com#agent").is_some());
        assert!(doc.describes("did:web:example.com"));
        assert!(!doc.describes("did:web:other.com"));
    }

    #[test]
    fn aliases() {
        let mut doc = sample();
        doc.also_known_as = Some(vec!["did:web:alias.example.com".into()]);
        assert!(doc.describes("did:web:alias.example.com"));
    }
}
