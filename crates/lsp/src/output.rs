use async_trait::async_trait;
use extkit_api::OutputChannel;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tower_lsp::lsp_types::MessageType;
use tower_lsp::Client;

/// Removes every complete line from `buffer` and returns them without their terminators.
/// A trailing partial line stays buffered.
pub fn drain_complete_lines(buffer: &mut String) -> Vec<String> {
    let Some(last_newline) = buffer.rfind('\n') else {
        return Vec::new();
    };
    let rest = buffer.split_off(last_newline + 1);
    let complete = std::mem::replace(buffer, rest);
    complete
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

/// Output channel forwarded to the client's log as `[name] line`.
pub struct LspOutputChannel {
    name: String,
    client: Client,
    pending: Mutex<String>,
    disposed: AtomicBool,
}

impl LspOutputChannel {
    pub fn new(name: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            client,
            pending: Mutex::new(String::new()),
            disposed: AtomicBool::new(false),
        }
    }

    fn take_lines(&self, text: &str) -> Vec<String> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        pending.push_str(text);
        drain_complete_lines(&mut pending)
    }

    fn take_partial(&self) -> Option<String> {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        (!pending.is_empty()).then(|| std::mem::take(&mut *pending))
    }

    async fn emit(&self, line: &str) {
        self.client
            .log_message(MessageType::LOG, format!("[{}] {}", self.name, line))
            .await;
    }
}

#[async_trait]
impl OutputChannel for LspOutputChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn append(&self, text: &str) {
        if self.disposed.load(Ordering::SeqCst) {
            return;
        }
        for line in self.take_lines(text) {
            self.emit(&line).await;
        }
    }

    async fn clear(&self) {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    /// Flushes a pending partial line.
    async fn show(&self) {
        if let Some(partial) = self.take_partial() {
            self.emit(&partial).await;
        }
    }

    async fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            self.show().await;
        }
    }
}
