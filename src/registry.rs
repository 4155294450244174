//! # Method registry
//!
//! Maps a DID method name to its resolver. Registration happens once at
//! process start from an explicit list; reads stay lock-free while it is
//! still in progress.

use std::sync::Arc;

use dashmap::DashMap;

use crate::methods::MethodResolver;

/// Registry of method resolvers, keyed by lowercase method name.
#[derive(Default)]
pub struct MethodRegistry {
    resolvers: DashMap<String, Arc<dyn MethodResolver>>,
}

impl MethodRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver under its method name.
    ///
    /// Registering a duplicate method name replaces the prior binding (last
    /// write wins); the replaced resolver is returned and a warning logged,
    /// since silent duplicate registration is an easy bug to introduce.
    pub fn register(&self, resolver: Arc<dyn MethodResolver>) -> Option<Arc<dyn MethodResolver>> {
        let method = resolver.method().to_lowercase();
        let replaced = self.resolvers.insert(method.clone(), resolver);
        if replaced.is_some() {
            tracing::warn!("replacing previously registered resolver for method {method}");
        }
        replaced
    }

    /// The resolver for a method, if one is registered.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<Arc<dyn MethodResolver>> {
        self.resolvers.get(method).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a resolver is registered for the method.
    #[must_use]
    pub fn supports(&self, method: &str) -> bool {
        self.resolvers.contains_key(method)
    }

    /// The registered method names, in no particular order.
    #[must_use]
    pub fn methods(&self) -> Vec<String> {
        self.resolvers.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::document::Document;
    use crate::error::Result;
    use crate::identifier::Did;

    struct Named(&'static str, &'static str);

    #[async_trait]
    impl MethodResolver for Named {
        fn method(&self) -> &str {
            self.0
        }

        async fn resolve(&self, _did: &Did, _timeout: Duration) -> Result<Document> {
            Ok(Document { id: self.1.into(), ..Document::default() })
        }
    }

    #[test]
    fn register_and_lookup() {
        let registry = MethodRegistry::new();
        assert!(registry.register(Arc::new(Named("web", "first"))).is_none());

        assert!(registry.supports("web"));
        assert!(!registry.supports("ion"));
        assert!(registry.get("web").is_some());
        assert!(registry.get("ion").is_none());
        assert_eq!(registry.methods(), vec!["web".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_registration_is_last_write_wins() {
        let registry = MethodRegistry::new();
        registry.register(Arc::new(Named("web", "first")));
        let replaced = registry.register(Arc::new(Named("web", "second")));
        assert!(replaced.is_some());

        let did: Did = "did:web:example.com".parse().unwrap();
        let doc =
            registry.get("web").unwrap().resolve(&did, Duration::from_secs(1)).await.unwrap();
        assert_eq!(doc.id, "second");
    }
}
