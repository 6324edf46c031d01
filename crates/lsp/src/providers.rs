use dashmap::DashMap;
use extkit_api::{ApiError, ApiResult, Disposable, DisposeFn, TextDocumentContentProvider};
use std::sync::Arc;
use tower_lsp::lsp_types::Url;
use tracing::debug;

/// Content providers by URI scheme. LSP has no virtual documents, so the server
/// answers reads for them itself.
#[derive(Clone, Default)]
pub struct ContentProviderRegistry {
    providers: Arc<DashMap<String, Arc<dyn TextDocumentContentProvider>>>,
}

impl ContentProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any provider already registered for `scheme`.
    /// Disposing the handle only removes this provider.
    pub fn register(
        &self,
        scheme: &str,
        provider: Arc<dyn TextDocumentContentProvider>,
    ) -> Box<dyn Disposable> {
        debug!("Registering content provider for '{}'", scheme);
        self.providers.insert(scheme.to_string(), provider.clone());

        let providers = self.providers.clone();
        let scheme = scheme.to_string();
        Box::new(DisposeFn::new(move || {
            providers.remove_if(&scheme, |_, current| Arc::ptr_eq(current, &provider));
        }))
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.providers.contains_key(scheme)
    }

    pub async fn provide(&self, uri: &Url) -> ApiResult<String> {
        let provider = self
            .providers
            .get(uri.scheme())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                ApiError::NotFound(format!("content provider for scheme '{}'", uri.scheme()))
            })?;
        provider.provide_text_document_content(uri).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(&'static str);

    #[async_trait]
    impl TextDocumentContentProvider for Fixed {
        async fn provide_text_document_content(&self, _uri: &Url) -> ApiResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn serves_registered_scheme() {
        let registry = ContentProviderRegistry::new();
        let _handle = registry.register("demo", Arc::new(Fixed("hello")));

        let uri = Url::parse("demo:///a/b.json").unwrap();
        assert_eq!(registry.provide(&uri).await.unwrap(), "hello");

        let other = Url::parse("file:///a/b.json").unwrap();
        assert!(matches!(
            registry.provide(&other).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn stale_handle_keeps_replacement() {
        let registry = ContentProviderRegistry::new();
        let first = registry.register("demo", Arc::new(Fixed("one")));
        let second = registry.register("demo", Arc::new(Fixed("two")));

        first.dispose();
        let uri = Url::parse("demo:///x").unwrap();
        assert_eq!(registry.provide(&uri).await.unwrap(), "two");

        second.dispose();
        assert!(!registry.contains("demo"));
    }
}
