use async_trait::async_trait;
use extkit_api::{StatusBarAlignment, StatusBarItem, Window};
use std::sync::{Arc, OnceLock};

/// Holds the host item once the manager has created it.
#[derive(Default)]
pub struct StatusBarSlot {
    item: OnceLock<Arc<dyn StatusBarItem>>,
}

impl StatusBarSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the host item. Later attachments are ignored.
    pub fn attach(&self, item: Arc<dyn StatusBarItem>) {
        let _ = self.item.set(item);
    }

    pub fn item(&self) -> Option<&Arc<dyn StatusBarItem>> {
        self.item.get()
    }

    pub async fn set_text(&self, text: &str) {
        if let Some(item) = self.item.get() {
            item.set_text(text).await;
        }
    }
}

/// A contribution to the status bar.
///
/// Implementors only need to expose their [`StatusBarSlot`]; every other method has
/// the usual default (left aligned, priority 0, no command, no initial text).
#[async_trait]
pub trait StatusBarManagerItem: Send + Sync {
    fn slot(&self) -> &StatusBarSlot;

    fn alignment(&self) -> StatusBarAlignment {
        StatusBarAlignment::Left
    }

    fn priority(&self) -> i32 {
        0
    }

    fn command(&self) -> Option<String> {
        None
    }

    fn text(&self) -> Option<String> {
        None
    }

    fn set_status_bar_item(&self, item: Arc<dyn StatusBarItem>) {
        self.slot().attach(item);
    }

    async fn set_text(&self, text: &str) {
        self.slot().set_text(text).await;
    }
}

pub struct StatusBarManager {
    items: Vec<Arc<dyn StatusBarManagerItem>>,
}

impl StatusBarManager {
    /// Creates, configures and shows one host item per contribution.
    pub async fn new(window: &dyn Window, items: Vec<Arc<dyn StatusBarManagerItem>>) -> Self {
        for item in &items {
            let host_item = window
                .create_status_bar_item(item.alignment(), item.priority())
                .await;
            item.set_status_bar_item(host_item.clone());
            host_item.set_command(item.command().as_deref()).await;
            if let Some(text) = item.text().filter(|t| !t.is_empty()) {
                host_item.set_text(&text).await;
            }
            host_item.show().await;
        }
        Self { items }
    }

    pub fn items(&self) -> &[Arc<dyn StatusBarManagerItem>] {
        &self.items
    }
}
