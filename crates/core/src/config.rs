//! Configuration stores backed by in-memory maps or a JSON settings file.

use crate::error::{ExtkitError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use extkit_api::ConfigurationStore;
use serde_json::{Map, Value};
use std::path::Path;

/// Looks `key` up as a flat dotted key first (`"java.home": ...`), then as a nested path.
fn lookup(root: &Map<String, Value>, key: &str) -> Option<Value> {
    if let Some(value) = root.get(key) {
        return Some(value.clone());
    }
    let mut parts = key.split('.');
    let mut current = root.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current.clone())
}

/// Mutable configuration held in memory.
#[derive(Debug, Default)]
pub struct MemoryConfiguration {
    values: DashMap<String, Value>,
}

impl MemoryConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.values.remove(key);
    }
}

#[async_trait]
impl ConfigurationStore for MemoryConfiguration {
    async fn get_value(&self, key: &str) -> Option<Value> {
        self.values.get(key).map(|v| v.value().clone())
    }
}

/// A `settings.json`-style file read once at load time.
#[derive(Debug, Clone, Default)]
pub struct JsonFileConfiguration {
    root: Map<String, Value>,
}

impl JsonFileConfiguration {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ExtkitError::Config(
                "settings file must contain a JSON object".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ConfigurationStore for JsonFileConfiguration {
    async fn get_value(&self, key: &str) -> Option<Value> {
        lookup(&self.root, key)
    }
}
