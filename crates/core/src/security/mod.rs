pub mod memory;
pub mod settings;

pub use memory::{MemorySecretStore, MemoryStateStore};
pub use settings::{DEFAULT_SERVICE_ID, SettingsError, SettingsManager, SettingsResult};
