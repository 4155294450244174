//! Destructure DID strings into strongly typed components.
//!
//! A DID is of the form
//!
//! `did:<method>:<method-specific-id>[/<path>][?<query>][#<fragment>]`
//!
//! where `method` matches `[a-z0-9]+` and `method-specific-id` is any
//! non-empty string not containing an unescaped `/`, `?` or `#`.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Structure of a DID.
///
/// Created by parsing, never mutated. Re-parsing the `Display` form of a
/// successfully parsed DID yields an identical value (round-trip law); the
/// method token is normalized to lowercase at parse time, all other
/// components are case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Did {
    method: String,
    id: String,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

impl Did {
    /// DID method, always lowercase.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Method-specific ID. Opaque to this crate; interpreted by the method's
    /// resolver.
    #[must_use]
    pub fn method_specific_id(&self) -> &str {
        &self.id
    }

    /// Path component, without the leading `/`.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Query component, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Fragment component, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The base `did:<method>:<method-specific-id>` form, with path, query
    /// and fragment stripped.
    ///
    /// This is the normalized key used for caching and request deduplication.
    #[must_use]
    pub fn did(&self) -> String {
        format!("did:{}:{}", self.method, self.id)
    }
}

impl FromStr for Did {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix("did:") else {
            return Err(Error::InvalidDid(format!("{s} is missing the did: prefix")));
        };
        let Some((method, rest)) = rest.split_once(':') else {
            return Err(Error::InvalidDid(format!("{s} is missing a method-specific id")));
        };
        if method.is_empty() {
            return Err(Error::InvalidDid(format!("{s} has an empty method")));
        }
        let method = method.to_lowercase();
        if !method.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return Err(Error::InvalidDid(format!("method {method} contains invalid characters")));
        }

        let (id, mut tail) = match rest.find(['/', '?', '#']) {
            Some(at) => (&rest[..at], &rest[at..]),
            None => (rest, ""),
        };
        if id.is_empty() {
            return Err(Error::InvalidDid(format!("{s} has an empty method-specific id")));
        }

        let mut path = None;
        if let Some(p) = tail.strip_prefix('/') {
            let end = p.find(['?', '#']).unwrap_or(p.len());
            path = Some(p[..end].to_string());
            tail = &p[end..];
        }
        let mut query = None;
        if let Some(q) = tail.strip_prefix('?') {
            let end = q.find('#').unwrap_or(q.len());
            query = Some(q[..end].to_string());
            tail = &q[end..];
        }
        let fragment = tail.strip_prefix('#').map(ToString::to_string);

        Ok(Self { method, id: id.to_string(), path, query, fragment })
    }
}

impl Display for Did {
    /// The exact canonical inverse of a successful parse.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "did:{}:{}", self.method, self.id)?;
        if let Some(path) = &self.path {
            write!(f, "/{path}")?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl Serialize for Did {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_did() {
        let did: Did = "did:web:example.com".parse().unwrap();
        assert_eq!(did.method(), "web");
        assert_eq!(did.method_specific_id(), "example.com");
        assert_eq!(did.path(), None);
        assert_eq!(did.query(), None);
        assert_eq!(did.fragment(), None);
        assert_eq!(did.to_string(), "did:web:example.com");
        assert_eq!(did.did(), "did:web:example.com");
    }

    #[test]
    fn did_with_the_works() {
        let did: Did = "did:ion:EiClkZMD#keys-1".parse().unwrap();
        assert_eq!(did.fragment(), Some("keys-1"));
        assert_eq!(did.did(), "did:ion:EiClkZMD");

        let did: Did = "did:web:example.com/path/to/resource?versionId=1#key-1".parse().unwrap();
        assert_eq!(did.path(), Some("path/to/resource"));
        assert_eq!(did.query(), Some("versionId=1"));
        assert_eq!(did.fragment(), Some("key-1"));
        assert_eq!(did.to_string(), "did:web:example.com/path/to/resource?versionId=1#key-1");
    }

    #[test]
    fn round_trip() {
        for s in [
            "did:web:example.com",
            "did:web:example.com%3A8080:user:alice",
            "did:peer:0z6Mkh",
            "did:ethr:0xb9c5714089478a327f09197987f16f9e5d936e8a",
            "did:web:example.com/p?q=1#f",
            "did:web:example.com?service=agent",
            "did:web:example.com#key-1",
        ] {
            let did: Did = s.parse().unwrap();
            assert_eq!(did.to_string(), s);
            let again: Did = did.to_string().parse().unwrap();
            assert_eq!(did, again);
        }
    }

    #[test]
    fn method_is_lowercased() {
        let did: Did = "did:WEB:Example.COM".parse().unwrap();
        assert_eq!(did.method(), "web");
        // only the method token is normalized
        assert_eq!(did.method_specific_id(), "Example.COM");
        assert_eq!(did.to_string(), "did:web:Example.COM");
    }

    #[test]
    fn invalid_dids() {
        for s in [
            "",
            "did",
            "did:",
            "web:example.com",
            "did::example.com",
            "did:web:",
            "did:web:#frag",
            "did:we b:example.com",
            "did:w-b:example.com",
            "did:web!:example.com",
        ] {
            assert!(
                matches!(s.parse::<Did>(), Err(Error::InvalidDid(_))),
                "expected {s:?} to be rejected"
            );
        }
    }
}
