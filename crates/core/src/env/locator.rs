use super::discovery::PlatformDiscovery;
use super::error::{LocateError, PathSource};
use super::home::{expand_home_dir, home_dir};
use super::platform::{Environment, Platform};
use super::probe::{PathProbe, ProcessRunner};
use super::query::{ResolvedRuntime, RuntimeQuery};
use super::version::parse_major_version;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Bounds on the version probe. The default waits indefinitely.
#[derive(Debug, Clone, Default)]
pub struct LocateOptions {
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl LocateOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Resolves a usable JDK home and its major version.
///
/// Holds only injected capabilities; every call re-runs the whole pipeline, so one
/// locator can serve concurrent lookups.
#[derive(Clone)]
pub struct RuntimeLocator {
    platform: Platform,
    env: Arc<dyn Environment>,
    paths: Arc<dyn PathProbe>,
    runner: Arc<dyn ProcessRunner>,
    discovery: Arc<dyn PlatformDiscovery>,
}

impl RuntimeLocator {
    pub fn new(
        platform: Platform,
        env: Arc<dyn Environment>,
        paths: Arc<dyn PathProbe>,
        runner: Arc<dyn ProcessRunner>,
        discovery: Arc<dyn PlatformDiscovery>,
    ) -> Self {
        Self {
            platform,
            env,
            paths,
            runner,
            discovery,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// The environment candidate variables and `~` expansion are read from.
    pub fn environment(&self) -> &dyn Environment {
        self.env.as_ref()
    }

    pub async fn locate(&self, query: &RuntimeQuery) -> Result<ResolvedRuntime, LocateError> {
        self.locate_with(query, &LocateOptions::default()).await
    }

    pub async fn locate_with(
        &self,
        query: &RuntimeQuery,
        options: &LocateOptions,
    ) -> Result<ResolvedRuntime, LocateError> {
        let (home_directory, source) = match self.explicit_home(query) {
            Some((source, path)) => {
                self.verify(&source, &path)?;
                (path, Some(source))
            }
            None => {
                debug!("No explicit JDK path configured, falling back to platform discovery");
                let home = self.discovery.find().await.map_err(|e| {
                    warn!("Platform JDK discovery failed: {}", e);
                    LocateError::PlatformDiscoveryFailed
                })?;
                (home, None)
            }
        };

        let major_version = self.probe_version(&home_directory, options).await?;
        if major_version < query.minimum_major_version {
            return Err(LocateError::VersionTooLow {
                found: major_version,
                required: query.minimum_major_version,
            });
        }

        info!(
            "Using JDK {} at {}",
            major_version,
            home_directory.display()
        );
        Ok(ResolvedRuntime {
            home_directory,
            major_version,
            source,
        })
    }

    /// Picks the highest-priority explicit source and expands `~` in it.
    fn explicit_home(&self, query: &RuntimeQuery) -> Option<(PathSource, PathBuf)> {
        let (source, raw) = query.explicit_source()?;
        let home = home_dir(self.env.as_ref(), &self.platform);
        match expand_home_dir(raw, home.as_deref()) {
            Some(path) => {
                debug!("Checking JDK path {} from the {}", path.display(), source);
                Some((source, path))
            }
            None => {
                warn!(
                    "Cannot expand {} from the {}: home directory unknown",
                    raw, source
                );
                None
            }
        }
    }

    /// Confirms `path` is a JDK root. A failure here is final; no other source is tried.
    fn verify(&self, source: &PathSource, path: &Path) -> Result<(), LocateError> {
        if !self.paths.exists(path) {
            return Err(LocateError::MissingOrInaccessiblePath {
                origin: source.clone(),
                path: path.to_path_buf(),
            });
        }

        let javac = self.platform.compiler_executable();
        if self.paths.exists(&path.join("bin").join(&javac)) {
            return Ok(());
        }

        if self.paths.exists(&path.join(&javac)) {
            Err(LocateError::MisplacedBinSegment {
                origin: source.clone(),
                path: path.to_path_buf(),
            })
        } else {
            Err(LocateError::NotAJdk {
                origin: source.clone(),
                path: path.to_path_buf(),
            })
        }
    }

    async fn probe_version(
        &self,
        home: &Path,
        options: &LocateOptions,
    ) -> Result<u32, LocateError> {
        let program = home.join("bin").join(self.platform.runtime_executable());
        let run = self.runner.run(&program, &["-version"]);

        let bounded = async {
            match options.timeout {
                Some(limit) => tokio::time::timeout(limit, run)
                    .await
                    .map_err(|_| LocateError::ProbeTimedOut(limit)),
                None => Ok(run.await),
            }
        };

        let output = match &options.cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => return Err(LocateError::Cancelled),
                result = bounded => result?,
            },
            None => bounded.await?,
        };

        let output = output.map_err(|error| LocateError::ProbeFailed {
            program: program.clone(),
            error,
        })?;
        if !output.success {
            debug!("{} -version exited unsuccessfully", program.display());
        }

        // The banner goes to stderr
        Ok(parse_major_version(&output.stderr))
    }
}
