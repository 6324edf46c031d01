//! Last-resort JDK discovery when no explicit path is configured.
//!
//! Looks at:
//! - macOS `java_home` tool
//! - `javac` on `PATH` (symlinks resolved)
//! - Common installation directories and SDKMAN

use super::platform::{Platform, PlatformFamily};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

static FIRST_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("valid number regex"));

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("no JDK found in any known location")]
    NotFound,
    #[error("discovery task failed: {0}")]
    Task(String),
}

/// Platform-level search for a JDK home, used only as a fallback.
#[async_trait]
pub trait PlatformDiscovery: Send + Sync {
    async fn find(&self) -> Result<PathBuf, DiscoveryError>;
}

/// Searches the usual places a JDK gets installed.
#[derive(Debug, Clone)]
pub struct DefaultJdkDiscovery {
    platform: Platform,
    roots: Vec<PathBuf>,
    search_path: bool,
}

impl DefaultJdkDiscovery {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            roots: default_roots(&platform),
            search_path: true,
        }
    }

    /// Replaces the install directories to scan.
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.roots = roots;
        self
    }

    /// Enables or disables the `java_home` tool and `PATH` lookups.
    pub fn with_path_search(mut self, enabled: bool) -> Self {
        self.search_path = enabled;
        self
    }

    fn is_jdk_home(&self, home: &Path) -> bool {
        home.join("bin")
            .join(self.platform.compiler_executable())
            .is_file()
    }

    fn search(&self) -> Option<PathBuf> {
        if self.search_path {
            if let Some(home) = self.from_java_home_tool() {
                return Some(home);
            }
            if let Some(home) = self.from_path() {
                return Some(home);
            }
        }
        self.from_roots()
    }

    #[cfg(target_os = "macos")]
    fn from_java_home_tool(&self) -> Option<PathBuf> {
        let output = std::process::Command::new("/usr/libexec/java_home")
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let home = PathBuf::from(path_str);
        self.is_jdk_home(&home).then_some(home)
    }

    #[cfg(not(target_os = "macos"))]
    fn from_java_home_tool(&self) -> Option<PathBuf> {
        None
    }

    fn from_path(&self) -> Option<PathBuf> {
        let javac = which::which(self.platform.compiler_executable()).ok()?;
        // /usr/bin/javac is usually a chain of symlinks into the real JDK
        let javac = std::fs::canonicalize(&javac).unwrap_or(javac);
        let home = javac.parent()?.parent()?.to_path_buf();
        debug!("javac on PATH resolves to JDK home {}", home.display());
        self.is_jdk_home(&home).then_some(home)
    }

    fn from_roots(&self) -> Option<PathBuf> {
        for root in &self.roots {
            if !root.is_dir() {
                continue;
            }

            // The root itself may be a JDK (e.g. a Homebrew symlink)
            if self.is_jdk_home(root) {
                return Some(root.clone());
            }

            let Ok(entries) = std::fs::read_dir(root) else {
                continue;
            };
            let mut homes: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
            sort_newest_first(&mut homes);

            for mut home in homes {
                if home.join("Contents/Home").is_dir() {
                    home = home.join("Contents/Home");
                }
                if self.is_jdk_home(&home) {
                    return Some(home);
                }
            }
        }
        None
    }
}

/// First number in a directory name, e.g. 17 for `jdk-17.0.2` or `java-17-openjdk`.
fn name_version(home: &Path) -> Option<u32> {
    let name = home.file_name()?.to_str()?;
    FIRST_NUMBER.find(name)?.as_str().parse().ok()
}

/// Highest version number first; unnumbered names last; ties by name, descending.
fn sort_newest_first(homes: &mut [PathBuf]) {
    homes.sort_by(|a, b| {
        name_version(b)
            .cmp(&name_version(a))
            .then_with(|| b.cmp(a))
    });
}

impl Default for DefaultJdkDiscovery {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

fn default_roots(platform: &Platform) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    match platform.family() {
        PlatformFamily::Windows => {
            roots.push(PathBuf::from("C:\\Program Files\\Java\\"));
            roots.push(PathBuf::from("C:\\Program Files\\Eclipse Adoptium\\"));
        }
        PlatformFamily::Unix => {
            if cfg!(target_os = "macos") {
                roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines/"));
                roots.push(PathBuf::from("/opt/homebrew/opt/openjdk/"));
                roots.push(PathBuf::from("/usr/local/opt/openjdk/"));
            } else {
                roots.push(PathBuf::from("/usr/lib/jvm/"));
            }
        }
    }

    if let Some(mut sdkman) = dirs::home_dir() {
        sdkman.push(".sdkman/candidates/java/");
        roots.push(sdkman);
    }
    roots
}

#[async_trait]
impl PlatformDiscovery for DefaultJdkDiscovery {
    async fn find(&self) -> Result<PathBuf, DiscoveryError> {
        let discovery = self.clone();
        tokio::task::spawn_blocking(move || discovery.search())
            .await
            .map_err(|e| DiscoveryError::Task(e.to_string()))?
            .ok_or(DiscoveryError::NotFound)
    }
}
