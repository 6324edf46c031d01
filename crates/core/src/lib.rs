pub mod config;
pub mod env;
pub mod error;
pub mod language;
pub mod logging;
pub mod security;
pub mod ui;

pub use error::{ExtkitError, Result};
