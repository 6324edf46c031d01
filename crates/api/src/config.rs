use async_trait::async_trait;
use serde_json::Value;

/// Read access to the host's workspace configuration.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Raw configuration value for a dotted key such as `java.home`.
    async fn get_value(&self, key: &str) -> Option<Value>;

    /// String view of a key. Non-string values and empty strings read as absent.
    async fn get(&self, key: &str) -> Option<String> {
        match self.get_value(key).await? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    async fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_value(key).await?.as_bool()
    }

    async fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_value(key).await?.as_i64()
    }
}

/// Describes which configuration sections changed.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationChange {
    pub sections: Vec<String>,
}

impl ConfigurationChange {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
        }
    }

    /// True if `key` equals a changed section or lives beneath / above one.
    pub fn affects(&self, key: &str) -> bool {
        self.sections.iter().any(|section| {
            section == key
                || key
                    .strip_prefix(section.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
                || section
                    .strip_prefix(key)
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}
