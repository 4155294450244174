//! # Errors
//!
//! Every expected failure in this crate is an explicit result value so that
//! callers can tell "safe to retry" from "will never succeed without a
//! configuration change". Nothing here panics on an expected path.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// Crate result type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Public error type for DID resolution and trust evaluation.
///
/// The type is `Clone` so a single in-flight resolution outcome can be
/// shared with every caller attached to it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The supplied string is not a syntactically valid DID. Caller error,
    /// never retried.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// No resolver is registered for the DID's method. Configuration error,
    /// never retried.
    #[error("method not supported: {0}")]
    MethodNotSupported(String),

    /// A network-class failure: connect error, timeout, or a server-side
    /// fault. Transient; the whole operation may be retried by the caller.
    /// Nothing is cached when this is returned.
    #[error("network failure: {0}")]
    Network(String),

    /// The method's authority definitively reports no document for this DID.
    /// Terminal, never retried.
    #[error("document not found: {0}")]
    NotFound(String),

    /// A document was returned but could not be understood. Terminal.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The resolved document violated one or more validation rules. Carries
    /// the complete rule set that failed, not just the first.
    #[error("document validation failed: {}", fmt_violations(.0))]
    Validation(Vec<Violation>),

    /// The cache backend could not be reached. Non-fatal: the dispatcher
    /// degrades to direct resolution rather than failing the call.
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    /// A trust source could not be reached. Non-fatal: the source is
    /// skipped, never escalated to an overall failure.
    #[error("trust source unavailable: {0}")]
    TrustUnavailable(String),
}

impl Error {
    /// Whether the error class is transient and the whole operation can be
    /// retried without a configuration change.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::CacheUnavailable(_) | Self::TrustUnavailable(_))
    }

    /// The violations carried by a [`Error::Validation`], empty otherwise.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }
}

/// A single violated validation rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The document field the rule applies to, e.g. `id` or
    /// `verificationMethod[1].type`.
    pub field: String,

    /// What was expected of the field.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn fmt_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}
