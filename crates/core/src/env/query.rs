use super::error::PathSource;
use super::platform::Environment;
use extkit_api::ConfigurationStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MINIMUM_MAJOR_VERSION: u32 = 8;

/// Configuration section holding a [`JavaSettings`] object.
pub const JAVA_SETTINGS_SECTION: &str = "extkit.java";

/// Names the setting an explicit JDK path is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingOrigin {
    pub key: String,
    pub app_name: String,
}

impl SettingOrigin {
    pub fn to_source(&self) -> PathSource {
        PathSource::Setting {
            key: self.key.clone(),
            app_name: self.app_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCandidate {
    pub name: String,
    pub value: Option<String>,
}

/// Everything one `locate` call looks at. Built fresh per call.
#[derive(Debug, Clone)]
pub struct RuntimeQuery {
    pub configured_path: Option<String>,
    pub setting: SettingOrigin,
    /// Checked in order; the first non-empty value wins.
    pub environment_candidates: Vec<EnvironmentCandidate>,
    pub minimum_major_version: u32,
}

impl RuntimeQuery {
    pub fn new(setting: SettingOrigin) -> Self {
        Self {
            configured_path: None,
            setting,
            environment_candidates: Vec::new(),
            minimum_major_version: DEFAULT_MINIMUM_MAJOR_VERSION,
        }
    }

    pub fn with_configured_path(mut self, path: Option<impl Into<String>>) -> Self {
        self.configured_path = path.map(Into::into);
        self
    }

    pub fn with_environment(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.environment_candidates.push(EnvironmentCandidate {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_minimum_major_version(mut self, version: u32) -> Self {
        self.minimum_major_version = version;
        self
    }

    /// Reads the configured path once and each candidate variable once.
    pub async fn from_sources(
        config: &dyn ConfigurationStore,
        env: &dyn Environment,
        settings: &JavaSettings,
    ) -> Self {
        let configured = config.get(&settings.home_key).await;
        let mut query = Self::new(SettingOrigin {
            key: settings.home_key.clone(),
            app_name: settings.app_name.clone(),
        })
        .with_configured_path(configured)
        .with_minimum_major_version(settings.minimum_major_version);

        for name in &settings.environment_variables {
            query = query.with_environment(name.clone(), env.var(name));
        }
        query
    }

    /// The explicit source to try, in priority order, before platform discovery.
    pub(crate) fn explicit_source(&self) -> Option<(PathSource, &str)> {
        if let Some(path) = self.configured_path.as_deref().filter(|p| !p.is_empty()) {
            return Some((self.setting.to_source(), path));
        }
        self.environment_candidates.iter().find_map(|candidate| {
            candidate
                .value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| {
                    (
                        PathSource::EnvironmentVariable {
                            name: candidate.name.clone(),
                        },
                        v,
                    )
                })
        })
    }
}

/// A verified JDK home and its major version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRuntime {
    pub home_directory: PathBuf,
    pub major_version: u32,
    /// `None` when the path came from platform discovery.
    #[serde(skip)]
    pub source: Option<PathSource>,
}

/// How the Java lookup is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JavaSettings {
    pub home_key: String,
    pub app_name: String,
    pub environment_variables: Vec<String>,
    pub minimum_major_version: u32,
    pub probe_timeout_ms: Option<u64>,
}

impl Default for JavaSettings {
    fn default() -> Self {
        Self {
            home_key: "java.home".to_string(),
            app_name: "Editor".to_string(),
            environment_variables: vec!["JDK_HOME".to_string(), "JAVA_HOME".to_string()],
            minimum_major_version: DEFAULT_MINIMUM_MAJOR_VERSION,
            probe_timeout_ms: None,
        }
    }
}

impl JavaSettings {
    /// Reads the object stored under `section`; absent fields keep their defaults.
    pub async fn from_configuration(
        config: &dyn ConfigurationStore,
        section: &str,
    ) -> Result<Self, serde_json::Error> {
        match config.get_value(section).await {
            Some(value) => serde_json::from_value(value),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> SettingOrigin {
        SettingOrigin {
            key: "java.home".to_string(),
            app_name: "Code".to_string(),
        }
    }

    #[test]
    fn configured_path_takes_priority() {
        let query = RuntimeQuery::new(origin())
            .with_configured_path(Some("/cfg/jdk"))
            .with_environment("JDK_HOME", Some("/env/jdk".to_string()));
        let (source, path) = query.explicit_source().unwrap();
        assert_eq!(path, "/cfg/jdk");
        assert_eq!(source, origin().to_source());
    }

    #[test]
    fn first_non_empty_environment_value_wins() {
        let query = RuntimeQuery::new(origin())
            .with_configured_path(Some(""))
            .with_environment("JDK_HOME", Some(String::new()))
            .with_environment("JAVA_HOME", Some("/env/java".to_string()));
        let (source, path) = query.explicit_source().unwrap();
        assert_eq!(path, "/env/java");
        assert_eq!(source.to_string(), "JAVA_HOME environment variable");
    }

    #[test]
    fn no_explicit_source_when_everything_is_blank() {
        let query = RuntimeQuery::new(origin())
            .with_configured_path(None::<String>)
            .with_environment("JDK_HOME", None)
            .with_environment("JAVA_HOME", None);
        assert!(query.explicit_source().is_none());
        assert_eq!(query.minimum_major_version, 8);
    }

    #[tokio::test]
    async fn settings_section_is_optional() {
        let empty = crate::config::MemoryConfiguration::new();
        let settings = JavaSettings::from_configuration(&empty, JAVA_SETTINGS_SECTION)
            .await
            .unwrap();
        assert_eq!(settings, JavaSettings::default());

        let config = crate::config::MemoryConfiguration::new().with(
            JAVA_SETTINGS_SECTION,
            serde_json::json!({"appName": "Code", "probeTimeoutMs": 2000}),
        );
        let settings = JavaSettings::from_configuration(&config, JAVA_SETTINGS_SECTION)
            .await
            .unwrap();
        assert_eq!(settings.app_name, "Code");
        assert_eq!(settings.probe_timeout_ms, Some(2000));
        assert_eq!(settings.home_key, "java.home");
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: JavaSettings =
            serde_json::from_str(r#"{"homeKey": "spring.java.home", "minimumMajorVersion": 17}"#)
                .unwrap();
        assert_eq!(settings.home_key, "spring.java.home");
        assert_eq!(settings.minimum_major_version, 17);
        assert_eq!(settings.environment_variables, vec!["JDK_HOME", "JAVA_HOME"]);
    }
}
