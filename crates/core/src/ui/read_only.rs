//! Read-only virtual documents served through a custom URI scheme.

use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use extkit_api::{
    ApiError, ApiResult, ConfigurationStore, ExtensionContext, TextDocumentContentProvider, Window,
    require, require_non_empty,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{OnceCell, broadcast};
use tracing::debug;
use url::Url;
use xxhash_rust::xxh3::xxh3_64;

pub const READ_ONLY_SCHEME: &str = "extkitreadonly";

const DEFAULT_TAB_SIZE: usize = 4;
const MAX_TAB_SIZE: usize = 16;

/// Identifies the thing a read-only document shows.
#[derive(Debug, Clone)]
pub struct DocumentNode {
    /// Used as the document's file name.
    pub label: String,
    /// Stable identity; hashed into the URI so equal ids reuse one document.
    pub full_id: String,
}

impl DocumentNode {
    pub fn new(label: impl Into<String>, full_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            full_id: full_id.into(),
        }
    }
}

/// Builds `extkitreadonly:///<hash>/<label><ext>`.
pub fn document_uri(node: &DocumentNode, file_extension: &str) -> ApiResult<Url> {
    let label = require_non_empty(Some(node.label.as_str()), "DocumentNode.label")?;
    let hash = format!("{:016x}", xxh3_64(node.full_id.as_bytes()));
    let mut uri = Url::parse(&format!("{READ_ONLY_SCHEME}:///{hash}/"))
        .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
    uri.path_segments_mut()
        .map_err(|_| ApiError::InvalidArgument(format!("{READ_ONLY_SCHEME} URI has no path")))?
        .pop_if_empty()
        .push(&format!("{label}{file_extension}"));
    Ok(uri)
}

/// Indentation used for JSON documents, following the editor's settings.
pub async fn json_indent(config: &dyn ConfigurationStore) -> String {
    if !config.get_bool("editor.insertSpaces").await.unwrap_or(false) {
        return "\t".to_string();
    }
    let tab_size = config
        .get_i64("editor.tabSize")
        .await
        .filter(|size| *size >= 0)
        .map_or(DEFAULT_TAB_SIZE, |size| {
            usize::try_from(size).map_or(MAX_TAB_SIZE, |size| size.min(MAX_TAB_SIZE))
        });
    " ".repeat(tab_size)
}

pub fn to_json_with_indent(data: &Value, indent: &str) -> Result<String> {
    if indent.is_empty() {
        return Ok(serde_json::to_string(data)?);
    }
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Stores document text by URI and announces updates.
pub struct ReadOnlyContentProvider {
    contents: DashMap<String, String>,
    changes: broadcast::Sender<Url>,
}

impl ReadOnlyContentProvider {
    fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            contents: DashMap::new(),
            changes,
        }
    }

    fn store(&self, uri: &Url, content: String) {
        self.contents.insert(uri.to_string(), content);
    }

    fn notify_changed(&self, uri: Url) {
        // No subscribers is fine
        let _ = self.changes.send(uri);
    }
}

#[async_trait]
impl TextDocumentContentProvider for ReadOnlyContentProvider {
    async fn provide_text_document_content(&self, uri: &Url) -> ApiResult<String> {
        require(
            self.contents.get(uri.as_str()).map(|c| c.value().clone()),
            "ReadOnlyContentProvider.contents",
        )
    }
}

pub struct ReadOnlyDocumentManager {
    context: Arc<ExtensionContext>,
    window: Arc<dyn Window>,
    config: Arc<dyn ConfigurationStore>,
    provider: Arc<ReadOnlyContentProvider>,
    registered: OnceCell<()>,
}

impl ReadOnlyDocumentManager {
    pub fn new(
        context: Arc<ExtensionContext>,
        window: Arc<dyn Window>,
        config: Arc<dyn ConfigurationStore>,
    ) -> Self {
        Self {
            context,
            window,
            config,
            provider: Arc::new(ReadOnlyContentProvider::new()),
            registered: OnceCell::new(),
        }
    }

    /// Receives the URI of every document opened or refreshed from now on.
    pub fn subscribe_changes(&self) -> broadcast::Receiver<Url> {
        self.provider.changes.subscribe()
    }

    pub async fn open_read_only_json(&self, node: &DocumentNode, data: &Value) -> Result<Url> {
        let indent = json_indent(self.config.as_ref()).await;
        let content = to_json_with_indent(data, &indent)?;
        self.open_read_only_content(node, content, ".json").await
    }

    pub async fn open_read_only_content(
        &self,
        node: &DocumentNode,
        content: String,
        file_extension: &str,
    ) -> Result<Url> {
        self.registered
            .get_or_init(|| async {
                debug!("Registering {} content provider", READ_ONLY_SCHEME);
                let provider: Arc<dyn TextDocumentContentProvider> = self.provider.clone();
                let registration = self
                    .window
                    .register_text_document_content_provider(READ_ONLY_SCHEME, provider)
                    .await;
                self.context.subscribe(registration);
            })
            .await;

        let uri = document_uri(node, file_extension)?;
        self.provider.store(&uri, content);
        self.window.show_text_document(&uri).await?;
        self.provider.notify_changed(uri.clone());
        Ok(uri)
    }

    pub async fn provide_text_document_content(&self, uri: &Url) -> ApiResult<String> {
        self.provider.provide_text_document_content(uri).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfiguration;
    use serde_json::json;

    #[test]
    fn uri_hashes_id_and_encodes_label() {
        let node = DocumentNode::new("my app", "apps/my app");
        let uri = document_uri(&node, ".json").unwrap();
        assert_eq!(uri.scheme(), READ_ONLY_SCHEME);
        assert!(uri.path().ends_with("/my%20app.json"));

        let again = document_uri(&DocumentNode::new("my app", "apps/my app"), ".json").unwrap();
        assert_eq!(uri, again);
        let other = document_uri(&DocumentNode::new("my app", "apps/other"), ".json").unwrap();
        assert_ne!(uri, other);
    }

    #[tokio::test]
    async fn indent_follows_editor_settings() {
        let tabs = MemoryConfiguration::new();
        assert_eq!(json_indent(&tabs).await, "\t");

        let spaces = MemoryConfiguration::new()
            .with("editor.insertSpaces", true)
            .with("editor.tabSize", 2);
        assert_eq!(json_indent(&spaces).await, "  ");

        let negative = MemoryConfiguration::new()
            .with("editor.insertSpaces", true)
            .with("editor.tabSize", -1);
        assert_eq!(json_indent(&negative).await, "    ");

        let missing = MemoryConfiguration::new().with("editor.insertSpaces", true);
        assert_eq!(json_indent(&missing).await, "    ");

        let huge = MemoryConfiguration::new()
            .with("editor.insertSpaces", true)
            .with("editor.tabSize", i64::MAX);
        assert_eq!(json_indent(&huge).await, " ".repeat(MAX_TAB_SIZE));
    }

    #[test]
    fn empty_label_is_rejected() {
        let err = document_uri(&DocumentNode::new("", "apps/unnamed"), ".json").unwrap_err();
        assert!(matches!(err, ApiError::Empty(Some(ref what)) if what == "DocumentNode.label"));
    }

    #[test]
    fn json_uses_requested_indent() {
        let text = to_json_with_indent(&json!({"a": [1]}), "  ").unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1\n  ]\n}");
        assert_eq!(to_json_with_indent(&json!({"a": 1}), "").unwrap(), "{\"a\":1}");
    }
}
