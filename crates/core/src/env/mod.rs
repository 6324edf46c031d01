//! Java runtime discovery and version negotiation.

pub mod discovery;
pub mod error;
pub mod home;
pub mod locator;
pub mod platform;
pub mod probe;
pub mod query;
pub mod version;

pub use discovery::{DefaultJdkDiscovery, DiscoveryError, PlatformDiscovery};
pub use error::{LocateError, PathSource};
pub use home::{expand_home_dir, home_dir};
pub use locator::{LocateOptions, RuntimeLocator};
pub use platform::{Environment, MapEnvironment, Platform, PlatformFamily, SystemEnvironment};
pub use probe::{PathProbe, ProcessOutput, ProcessRunner, SystemPathProbe, TokioProcessRunner};
pub use query::{
    DEFAULT_MINIMUM_MAJOR_VERSION, EnvironmentCandidate, JAVA_SETTINGS_SECTION, JavaSettings,
    ResolvedRuntime, RuntimeQuery, SettingOrigin,
};
pub use version::parse_major_version;
