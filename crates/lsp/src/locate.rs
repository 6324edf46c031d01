use crate::config::LspConfiguration;
use extkit_core::env::{
    JavaSettings, LocateError, LocateOptions, ResolvedRuntime, RuntimeLocator, RuntimeQuery,
};
use extkit_core::ui::OutputManager;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_lsp::lsp_types::MessageType;
use tower_lsp::Client;

pub const OUTPUT_NAME: &str = "extkit";

/// The resolved JDK. Only the most recently started lookup may publish into it.
#[derive(Clone, Default)]
pub struct RuntimeSlot {
    runtime: Arc<RwLock<Option<ResolvedRuntime>>>,
    current: Arc<Mutex<Option<CancellationToken>>>,
}

impl RuntimeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the lookup in flight, if any, and returns the token for the next one.
    pub fn begin(&self, parent: &CancellationToken) -> CancellationToken {
        let token = parent.child_token();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    /// Stores `value` unless `token` has been superseded or cancelled.
    pub async fn publish(&self, token: &CancellationToken, value: Option<ResolvedRuntime>) -> bool {
        let mut runtime = self.runtime.write().await;
        if token.is_cancelled() {
            return false;
        }
        *runtime = value;
        true
    }

    pub async fn get(&self) -> Option<ResolvedRuntime> {
        self.runtime.read().await.clone()
    }
}

/// Resolves the JDK in the background and publishes the result into `slot`.
pub fn spawn_locate(
    client: Client,
    outputs: Arc<OutputManager>,
    config: LspConfiguration,
    locator: RuntimeLocator,
    settings: JavaSettings,
    slot: RuntimeSlot,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let query = RuntimeQuery::from_sources(&config, locator.environment(), &settings).await;
        let mut options = LocateOptions::default().with_cancellation(cancel.clone());
        if let Some(ms) = settings.probe_timeout_ms {
            options = options.with_timeout(Duration::from_millis(ms));
        }

        match locator.locate_with(&query, &options).await {
            Ok(resolved) => {
                let line = format!(
                    "Using JDK {} at {}\n",
                    resolved.major_version,
                    resolved.home_directory.display()
                );
                if slot.publish(&cancel, Some(resolved)).await {
                    outputs.append_text(OUTPUT_NAME, &line, &[]).await;
                } else {
                    tracing::debug!("Discarding superseded JDK lookup result");
                }
            }
            Err(LocateError::Cancelled) => {
                tracing::debug!("JDK lookup cancelled");
            }
            Err(e) => {
                if slot.publish(&cancel, None).await {
                    tracing::error!("JDK lookup failed: {}", e);
                    client.show_message(MessageType::ERROR, e).await;
                } else {
                    tracing::debug!("Discarding superseded JDK lookup failure: {}", e);
                }
            }
        }
    });
}
