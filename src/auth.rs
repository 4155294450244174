//! # Authentication adapter
//!
//! Maps a validated document into the claim set consumed by the HTTP and
//! session layers. Pure projection: no I/O, no failure modes. Callers pass
//! documents that have already been through resolution and validation.

use crate::document::Document;

/// A single name/value claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    /// The claim name, e.g. `verification_method`.
    pub name: String,

    /// The claim value.
    pub value: String,
}

impl Claim {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// The claims extracted from one resolved document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimSet {
    /// The subject DID, mirrored in the `sub` claim.
    pub subject: String,

    /// All claims in document order.
    pub claims: Vec<Claim>,
}

impl ClaimSet {
    /// The first value of the named claim, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.claims.iter().find(|c| c.name == name).map(|c| c.value.as_str())
    }

    /// All values of the named claim, in document order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.claims.iter().filter(|c| c.name == name).map(|c| c.value.as_str()).collect()
    }
}

/// Project a validated document into a claim set.
///
/// Produces a `sub` claim for the document id, a `verification_method` and
/// `verification_method_type` pair per verification method, and a `service`
/// and `service_type` pair per service.
#[must_use]
pub fn authenticate(document: &Document) -> ClaimSet {
    let mut claims = vec![Claim::new("sub", &document.id)];

    for vm in &document.verification_method {
        claims.push(Claim::new("verification_method", &vm.id));
        claims.push(Claim::new("verification_method_type", &vm.type_));
    }
    for svc in &document.service {
        claims.push(Claim::new("service", &svc.id));
        claims.push(Claim::new("service_type", &svc.type_));
    }

    ClaimSet { subject: document.id.clone(), claims }
}
