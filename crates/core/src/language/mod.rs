//! Registry of language clients started on activation.

use crate::ui::NotificationManager;
use async_trait::async_trait;
use extkit_api::{ApiError, ApiResult, Disposable, ExtensionContext};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// A client connection to one language server.
#[async_trait]
pub trait LanguageClient: Send + Sync {
    /// Starts the client; the returned handle stops it.
    async fn start(&self) -> Box<dyn Disposable>;
}

/// Knows how to build the client for a set of language ids.
pub trait LanguageSupport: Send + Sync {
    fn language_ids(&self) -> Vec<String>;
    fn build_language_client(&self) -> Arc<dyn LanguageClient>;
}

pub struct LanguageServerManager {
    clients: HashMap<String, Arc<dyn LanguageClient>>,
    ordered: Vec<Arc<dyn LanguageClient>>,
}

impl LanguageServerManager {
    /// Builds and starts one client per support, announcing each start.
    pub async fn start(
        context: &ExtensionContext,
        supports: &[Arc<dyn LanguageSupport>],
        notifications: &NotificationManager,
    ) -> Self {
        let mut clients = HashMap::new();
        let mut ordered = Vec::with_capacity(supports.len());

        for support in supports {
            let client = support.build_language_client();
            let ids = support.language_ids();
            for id in &ids {
                clients.insert(id.clone(), client.clone());
            }

            let message = format!("Starting Language Support for {}", ids.join(","));
            info!("{}", message);
            notifications.show_message(&message).await;

            let running = client.start().await;
            context.subscribe(running);
            ordered.push(client);
        }

        Self { clients, ordered }
    }

    pub fn get_language_client(&self, language_id: &str) -> ApiResult<Arc<dyn LanguageClient>> {
        self.clients
            .get(language_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("language client for '{language_id}'")))
    }

    /// Every started client once, in start order.
    pub fn get_language_clients(&self) -> Vec<Arc<dyn LanguageClient>> {
        self.ordered.clone()
    }
}
