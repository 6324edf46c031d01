use crate::ApiResult;
use crate::context::Disposable;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarAlignment {
    #[default]
    Left,
    Right,
}

/// A named output pane owned by the host.
#[async_trait]
pub trait OutputChannel: Send + Sync {
    fn name(&self) -> &str;
    async fn append(&self, text: &str);
    async fn clear(&self);
    async fn show(&self);
    async fn dispose(&self);
}

/// A single status bar entry owned by the host.
#[async_trait]
pub trait StatusBarItem: Send + Sync {
    async fn set_text(&self, text: &str);
    async fn set_command(&self, command: Option<&str>);
    async fn show(&self);
}

/// Serves the text of virtual documents for one URI scheme.
#[async_trait]
pub trait TextDocumentContentProvider: Send + Sync {
    async fn provide_text_document_content(&self, uri: &Url) -> ApiResult<String>;
}

/// The host window surface the managers drive.
#[async_trait]
pub trait Window: Send + Sync {
    async fn show_information_message(&self, text: &str);

    async fn set_status_bar_message(&self, text: &str, hide_after: Duration);

    async fn create_output_channel(&self, name: &str) -> Arc<dyn OutputChannel>;

    async fn create_status_bar_item(
        &self,
        alignment: StatusBarAlignment,
        priority: i32,
    ) -> Arc<dyn StatusBarItem>;

    async fn register_text_document_content_provider(
        &self,
        scheme: &str,
        provider: Arc<dyn TextDocumentContentProvider>,
    ) -> Box<dyn Disposable>;

    async fn show_text_document(&self, uri: &Url) -> ApiResult<()>;
}
