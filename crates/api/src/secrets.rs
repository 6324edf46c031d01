use crate::ApiResult;
use async_trait::async_trait;

/// Credential storage keyed by service and account, mirroring an OS keychain.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_password(&self, service: &str, account: &str) -> ApiResult<Option<String>>;

    async fn set_password(&self, service: &str, account: &str, password: &str) -> ApiResult<()>;

    /// Returns `true` when an entry was removed.
    async fn delete_password(&self, service: &str, account: &str) -> ApiResult<bool>;
}
