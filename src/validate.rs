//! # Document validation
//!
//! Structural checks applied to every resolved document, plus request-scoped
//! checks applied only when the caller supplies constraints. The validator
//! accumulates every violated rule before returning so callers see the
//! complete failure reason set, never just the first.

use std::collections::HashSet;

use crate::document::Document;
use crate::error::{Error, Result, Violation};
use crate::identifier::Did;

/// Request-scoped validation constraints.
///
/// The default policy applies structural checks only. Constraints are plain
/// data passed per call; nothing is configured through ambient state.
#[derive(Clone, Debug, Default)]
pub struct ValidationPolicy {
    /// When set, the resolved DID must be a member of this allow-list.
    pub allowed_dids: Option<HashSet<String>>,

    /// When set, the document must carry at least one verification method of
    /// this type.
    pub required_method_type: Option<String>,
}

/// Validate a resolved document against the requested DID and policy.
///
/// # Errors
///
/// Returns [`Error::Validation`] carrying every violated rule.
pub fn validate(document: &Document, did: &Did, policy: &ValidationPolicy) -> Result<()> {
    let mut violations = vec![];
    let requested = did.did();

    if document.id.is_empty() {
        violations.push(Violation::new("id", "must be present"));
    } else if !document.describes(&requested) {
        violations.push(Violation::new(
            "id",
            format!("must equal the resolved DID {requested} or list it as an alias"),
        ));
    }

    if document.context.is_empty() {
        violations.push(Violation::new("@context", "must not be empty"));
    }

    for (i, vm) in document.verification_method.iter().enumerate() {
        for (field, value) in
            [("id", &vm.id), ("type", &vm.type_), ("controller", &vm.controller)]
        {
            if value.is_empty() {
                violations
                    .push(Violation::new(format!("verificationMethod[{i}].{field}"), "must not be empty"));
            }
        }
    }

    for (i, svc) in document.service.iter().enumerate() {
        for (field, value) in [("id", &svc.id), ("type", &svc.type_)] {
            if value.is_empty() {
                violations.push(Violation::new(format!("service[{i}].{field}"), "must not be empty"));
            }
        }
        if svc.service_endpoint.is_empty() {
            violations.push(Violation::new(format!("service[{i}].serviceEndpoint"), "must not be empty"));
        } else if url::Url::parse(&svc.service_endpoint).is_err() {
            violations
                .push(Violation::new(format!("service[{i}].serviceEndpoint"), "must be a valid URI"));
        }
    }

    if let Some(allowed) = &policy.allowed_dids {
        if !allowed.contains(&requested) {
            violations.push(Violation::new("id", "is not in the caller's allow-list"));
        }
    }

    if let Some(required) = &policy.required_method_type {
        if !document.verification_method.iter().any(|vm| &vm.type_ == required) {
            violations.push(Violation::new(
                "verificationMethod",
                format!("no verification method of required type {required}"),
            ));
        }
    }

    if violations.is_empty() { Ok(()) } else { Err(Error::Validation(violations)) }
}
