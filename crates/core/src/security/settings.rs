use extkit_api::{ApiError, ExtensionContext, SecretStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;

/// Service name secrets are filed under unless overridden.
pub const DEFAULT_SERVICE_ID: &str = "extkit";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No value stored for '{0}'")]
    Missing(String),
    #[error("Stored value for '{key}' is malformed: {error}")]
    Malformed {
        key: String,
        #[source]
        error: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] ApiError),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Typed access to plain extension state and to credentials kept in a [`SecretStore`].
pub struct SettingsManager {
    context: Arc<ExtensionContext>,
    secrets: Arc<dyn SecretStore>,
    service_id: String,
}

impl SettingsManager {
    pub fn new(context: Arc<ExtensionContext>, secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            context,
            secrets,
            service_id: DEFAULT_SERVICE_ID.to_string(),
        }
    }

    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = service_id.into();
        self
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub async fn get_nonsensitive<T: DeserializeOwned>(&self, key: &str) -> SettingsResult<T> {
        let value = self
            .context
            .global_state()
            .get(key)
            .await?
            .filter(|v| !v.is_null())
            .ok_or_else(|| SettingsError::Missing(key.to_string()))?;
        serde_json::from_value(value).map_err(|error| SettingsError::Malformed {
            key: key.to_string(),
            error,
        })
    }

    pub async fn set_nonsensitive<T: Serialize>(&self, key: &str, value: &T) -> SettingsResult<()> {
        let value = serde_json::to_value(value).map_err(|error| SettingsError::Malformed {
            key: key.to_string(),
            error,
        })?;
        self.context.global_state().update(key, Some(value)).await?;
        Ok(())
    }

    pub async fn delete_nonsensitive(&self, key: &str) -> SettingsResult<()> {
        self.context.global_state().update(key, None).await?;
        Ok(())
    }

    pub async fn get_sensitive<T: DeserializeOwned>(&self, key: &str) -> SettingsResult<T> {
        let data = self
            .secrets
            .get_password(&self.service_id, key)
            .await?
            .filter(|d| !d.is_empty())
            .ok_or_else(|| SettingsError::Missing(key.to_string()))?;
        serde_json::from_str(&data).map_err(|error| SettingsError::Malformed {
            key: key.to_string(),
            error,
        })
    }

    /// Stores `value` as JSON so [`Self::get_sensitive`] can read it back.
    pub async fn set_sensitive<T: Serialize>(&self, key: &str, value: &T) -> SettingsResult<()> {
        let data = serde_json::to_string(value).map_err(|error| SettingsError::Malformed {
            key: key.to_string(),
            error,
        })?;
        self.secrets
            .set_password(&self.service_id, key, &data)
            .await?;
        Ok(())
    }

    /// Removes the secret; succeeds whether or not one was stored.
    pub async fn delete_sensitive(&self, key: &str) -> SettingsResult<()> {
        self.secrets.delete_password(&self.service_id, key).await?;
        Ok(())
    }
}
