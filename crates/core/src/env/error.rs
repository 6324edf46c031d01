use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Where a candidate JDK path came from. Rendered into error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    Setting { key: String, app_name: String },
    EnvironmentVariable { name: String },
}

impl fmt::Display for PathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSource::Setting { key, app_name } => {
                write!(f, "{key} variable defined in {app_name} settings")
            }
            PathSource::EnvironmentVariable { name } => write!(f, "{name} environment variable"),
        }
    }
}

/// Why no usable JDK could be resolved. Every variant is terminal.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("The {origin} points to a missing or inaccessible folder ({})", .path.display())]
    MissingOrInaccessiblePath { origin: PathSource, path: PathBuf },

    #[error("'bin' should be removed from the {origin} ({})", .path.display())]
    MisplacedBinSegment { origin: PathSource, path: PathBuf },

    #[error("The {origin} ({}) does not point to a JDK.", .path.display())]
    NotAJdk { origin: PathSource, path: PathBuf },

    #[error("Java runtime (JDK, not JRE) could not be located")]
    PlatformDiscoveryFailed,

    #[error(
        "Java {required} or more recent is required to run (found {found}). Please download and install a recent JDK"
    )]
    VersionTooLow { found: u32, required: u32 },

    #[error("Failed to run {}: {error}", .program.display())]
    ProbeFailed {
        program: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("Java version probe timed out after {0:?}")]
    ProbeTimedOut(Duration),

    #[error("Java runtime lookup was cancelled")]
    Cancelled,
}

impl LocateError {
    /// The source the failing path came from, when one was selected.
    pub fn origin(&self) -> Option<&PathSource> {
        match self {
            LocateError::MissingOrInaccessiblePath { origin, .. }
            | LocateError::MisplacedBinSegment { origin, .. }
            | LocateError::NotAJdk { origin, .. } => Some(origin),
            _ => None,
        }
    }
}
