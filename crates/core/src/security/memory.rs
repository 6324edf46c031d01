use async_trait::async_trait;
use dashmap::DashMap;
use extkit_api::{ApiResult, SecretStore, StateStore};
use serde_json::Value;

/// Process-local secret store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    entries: DashMap<(String, String), String>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_password(&self, service: &str, account: &str) -> ApiResult<Option<String>> {
        Ok(self
            .entries
            .get(&(service.to_string(), account.to_string()))
            .map(|e| e.value().clone()))
    }

    async fn set_password(&self, service: &str, account: &str, password: &str) -> ApiResult<()> {
        self.entries.insert(
            (service.to_string(), account.to_string()),
            password.to_string(),
        );
        Ok(())
    }

    async fn delete_password(&self, service: &str, account: &str) -> ApiResult<bool> {
        Ok(self
            .entries
            .remove(&(service.to_string(), account.to_string()))
            .is_some())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    values: DashMap<String, Value>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &str) -> ApiResult<Option<Value>> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn update(&self, key: &str, value: Option<Value>) -> ApiResult<()> {
        match value {
            Some(value) => {
                self.values.insert(key.to_string(), value);
            }
            None => {
                self.values.remove(key);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn secrets_are_scoped_by_service() {
        let store = MemorySecretStore::new();
        store.set_password("svc", "token", "s3cret").await.unwrap();
        assert_eq!(
            store.get_password("svc", "token").await.unwrap().as_deref(),
            Some("s3cret")
        );
        assert_eq!(store.get_password("other", "token").await.unwrap(), None);
        assert!(store.delete_password("svc", "token").await.unwrap());
        assert!(!store.delete_password("svc", "token").await.unwrap());
    }
}
