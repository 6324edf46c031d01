use async_trait::async_trait;
use extkit_api::ConfigurationStore;
use serde_json::Value;
use tower_lsp::lsp_types::{ConfigurationItem, Url};
use tower_lsp::Client;
use tracing::warn;

/// Reads settings from the client with `workspace/configuration`, one section per key.
#[derive(Clone)]
pub struct LspConfiguration {
    client: Client,
    scope: Option<Url>,
}

impl LspConfiguration {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            scope: None,
        }
    }

    /// Scopes lookups to a workspace folder or document.
    pub fn with_scope(mut self, scope: Option<Url>) -> Self {
        self.scope = scope;
        self
    }
}

/// The client answers with one value per item; `null` means unset.
pub(crate) fn first_value(values: Vec<Value>) -> Option<Value> {
    values.into_iter().next().filter(|v| !v.is_null())
}

#[async_trait]
impl ConfigurationStore for LspConfiguration {
    async fn get_value(&self, key: &str) -> Option<Value> {
        let item = ConfigurationItem {
            scope_uri: self.scope.clone(),
            section: Some(key.to_string()),
        };
        match self.client.configuration(vec![item]).await {
            Ok(values) => first_value(values),
            Err(e) => {
                warn!("workspace/configuration for '{}' failed: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_missing_answers_are_unset() {
        assert_eq!(first_value(vec![]), None);
        assert_eq!(first_value(vec![Value::Null]), None);
        assert_eq!(
            first_value(vec![json!("/opt/jdk"), json!("ignored")]),
            Some(json!("/opt/jdk"))
        );
    }
}
