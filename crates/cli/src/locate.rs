use clap::Args;
use extkit_api::ConfigurationStore;
use extkit_core::config::{JsonFileConfiguration, MemoryConfiguration};
use extkit_core::env::{
    JavaSettings, LocateOptions, ResolvedRuntime, RuntimeQuery, JAVA_SETTINGS_SECTION,
};
use extkit_core::ExtkitError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug, Clone, Default)]
pub struct LocateArgs {
    /// JDK home to check instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub java_home: Option<String>,

    /// JSON settings file holding the configured JDK home and the `extkit.java` section
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Environment variable to check, in order (repeatable); defaults to JDK_HOME then JAVA_HOME
    #[arg(long = "env", value_name = "NAME")]
    pub env: Vec<String>,

    /// Lowest acceptable Java major version
    #[arg(long, value_name = "N")]
    pub min_version: Option<u32>,

    /// Give up on `java -version` after this many milliseconds
    #[arg(long, value_name = "N")]
    pub timeout_ms: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Loads the settings file, if any, and the lookup settings stored in it.
pub(crate) async fn load_settings(
    path: Option<&Path>,
) -> Result<(JavaSettings, Box<dyn ConfigurationStore>), ExtkitError> {
    let config: Box<dyn ConfigurationStore> = match path {
        Some(path) => {
            info!("Reading settings from {}", path.display());
            Box::new(JsonFileConfiguration::load(path)?)
        }
        None => Box::new(MemoryConfiguration::new()),
    };
    let settings =
        JavaSettings::from_configuration(config.as_ref(), JAVA_SETTINGS_SECTION).await?;
    Ok((settings, config))
}

impl LocateArgs {
    /// Command-line flags win over the settings file.
    fn apply(&self, mut settings: JavaSettings) -> JavaSettings {
        if !self.env.is_empty() {
            settings.environment_variables = self.env.clone();
        }
        if let Some(min) = self.min_version {
            settings.minimum_major_version = min;
        }
        if let Some(ms) = self.timeout_ms {
            settings.probe_timeout_ms = Some(ms);
        }
        settings
    }
}

pub(crate) fn render(resolved: &ResolvedRuntime, json: bool) -> Result<String, ExtkitError> {
    if json {
        return Ok(serde_json::to_string_pretty(resolved)?);
    }
    Ok(format!(
        "Java {} at {}",
        resolved.major_version,
        resolved.home_directory.display()
    ))
}

pub async fn run(args: LocateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config) = load_settings(args.settings.as_deref()).await?;
    let settings = args.apply(settings);

    let locator = extkit_runtime::build_default_locator();
    let mut query =
        RuntimeQuery::from_sources(config.as_ref(), locator.environment(), &settings).await;
    if let Some(home) = &args.java_home {
        query = query.with_configured_path(Some(home.as_str()));
    }

    let mut options = LocateOptions::default();
    if let Some(ms) = settings.probe_timeout_ms {
        options = options.with_timeout(Duration::from_millis(ms));
    }

    let resolved = locator.locate_with(&query, &options).await?;
    if let Some(source) = &resolved.source {
        info!("JDK taken from the {}", source);
    }
    println!("{}", render(&resolved, args.json)?);
    Ok(())
}
