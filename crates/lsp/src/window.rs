use crate::output::LspOutputChannel;
use crate::providers::ContentProviderRegistry;
use async_trait::async_trait;
use extkit_api::{
    ApiError, ApiResult, Disposable, OutputChannel, StatusBarAlignment, StatusBarItem,
    TextDocumentContentProvider, Window,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower_lsp::lsp_types::{MessageType, ShowDocumentParams, Url};
use tower_lsp::Client;

/// Host window backed by an LSP client.
///
/// LSP has no status bar or output panel; both end up in the client's log.
#[derive(Clone)]
pub struct LspWindow {
    client: Client,
    providers: ContentProviderRegistry,
}

impl LspWindow {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            providers: ContentProviderRegistry::new(),
        }
    }

    pub fn providers(&self) -> &ContentProviderRegistry {
        &self.providers
    }

    pub async fn provide_content(&self, uri: &Url) -> ApiResult<String> {
        self.providers.provide(uri).await
    }
}

#[async_trait]
impl Window for LspWindow {
    async fn show_information_message(&self, text: &str) {
        self.client.show_message(MessageType::INFO, text).await;
    }

    async fn set_status_bar_message(&self, text: &str, _hide_after: Duration) {
        self.client.log_message(MessageType::INFO, text).await;
    }

    async fn create_output_channel(&self, name: &str) -> Arc<dyn OutputChannel> {
        Arc::new(LspOutputChannel::new(name, self.client.clone()))
    }

    async fn create_status_bar_item(
        &self,
        alignment: StatusBarAlignment,
        priority: i32,
    ) -> Arc<dyn StatusBarItem> {
        Arc::new(LspStatusBarItem::new(self.client.clone(), alignment, priority))
    }

    async fn register_text_document_content_provider(
        &self,
        scheme: &str,
        provider: Arc<dyn TextDocumentContentProvider>,
    ) -> Box<dyn Disposable> {
        self.providers.register(scheme, provider)
    }

    async fn show_text_document(&self, uri: &Url) -> ApiResult<()> {
        let params = ShowDocumentParams {
            uri: uri.clone(),
            external: Some(false),
            take_focus: Some(true),
            selection: None,
        };
        let shown = self
            .client
            .show_document(params)
            .await
            .map_err(|e| ApiError::Host(e.to_string()))?;
        if shown {
            Ok(())
        } else {
            Err(ApiError::Host(format!("client declined to show {uri}")))
        }
    }
}

/// Logs its text once shown; later text changes are logged as they happen.
pub struct LspStatusBarItem {
    client: Client,
    alignment: StatusBarAlignment,
    priority: i32,
    text: Mutex<String>,
    command: Mutex<Option<String>>,
    visible: AtomicBool,
}

impl LspStatusBarItem {
    fn new(client: Client, alignment: StatusBarAlignment, priority: i32) -> Self {
        Self {
            client,
            alignment,
            priority,
            text: Mutex::new(String::new()),
            command: Mutex::new(None),
            visible: AtomicBool::new(false),
        }
    }

    pub fn alignment(&self) -> StatusBarAlignment {
        self.alignment
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn command(&self) -> Option<String> {
        self.command
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn current_text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn report(&self, text: &str) {
        if !text.is_empty() {
            self.client.log_message(MessageType::LOG, text).await;
        }
    }
}

#[async_trait]
impl StatusBarItem for LspStatusBarItem {
    async fn set_text(&self, text: &str) {
        *self
            .text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = text.to_string();
        if self.visible.load(Ordering::SeqCst) {
            self.report(text).await;
        }
    }

    async fn set_command(&self, command: Option<&str>) {
        *self
            .command
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = command.map(str::to_string);
    }

    async fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            let text = self.current_text();
            self.report(&text).await;
        }
    }
}
