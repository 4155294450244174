//! # DID Resolver
//!
//! Resolution, caching and trust evaluation for Decentralized Identifiers.
//!
//! A [`Dispatcher`] orchestrates the full pipeline: parse the DID, consult
//! the cache, deduplicate concurrent misses, resolve through the registered
//! [`MethodResolver`], validate the returned document and write it back with
//! a TTL. Resolvers for `did:web`, `did:ethr`, `did:ion` and `did:peer` ship
//! in [`methods`]; the [`trust`] module answers the separate question of
//! whether an issuer is trusted, and [`auth`] projects a validated document
//! into the claim set consumed by session layers.
//!
//! See [DID resolution](https://www.w3.org/TR/did-core/#did-resolution) for more.

pub mod auth;
pub mod cache;
pub mod methods;
pub mod trust;

mod dispatch;
mod document;
mod error;
mod identifier;
mod registry;
mod validate;

pub use self::auth::{Claim, ClaimSet, authenticate};
pub use self::cache::{DocumentCache, MemoryCache};
pub use self::dispatch::{Dispatcher, DispatcherConfig, ResolveOptions};
pub use self::document::{Document, DocumentMetadata, Service, VerificationMethod};
pub use self::error::{Error, Result, Violation};
pub use self::identifier::Did;
pub use self::methods::MethodResolver;
pub use self::registry::MethodRegistry;
pub use self::trust::{
    MultiSourceTrustRegistry, SourceKind, TrustDecision, TrustRecord, TrustSource,
};
pub use self::validate::{ValidationPolicy, validate};
