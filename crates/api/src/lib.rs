pub mod config;
pub mod context;
pub mod error;
pub mod secrets;
pub mod window;

// Re-export commonly used types
pub use config::{ConfigurationChange, ConfigurationStore};
pub use context::{Disposable, DisposeFn, ExtensionContext, StateStore};
pub use error::{ApiError, ApiResult, require, require_non_empty};
pub use secrets::SecretStore;
pub use window::{
    OutputChannel, StatusBarAlignment, StatusBarItem, TextDocumentContentProvider, Window,
};
