use crate::env::LocateError;
use crate::security::SettingsError;
use extkit_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtkitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExtkitError>;
