use extkit_core::env::{
    DefaultJdkDiscovery, Platform, RuntimeLocator, SystemEnvironment, SystemPathProbe,
    TokioProcessRunner,
};
use std::sync::Arc;

/// Bootstraps a locator wired to the real machine, falling back to the platform's
/// usual JDK install locations.
pub fn build_default_locator() -> RuntimeLocator {
    let platform = Platform::current();
    tracing::debug!("Building runtime locator for {:?}", platform.family());
    RuntimeLocator::new(
        platform,
        Arc::new(SystemEnvironment),
        Arc::new(SystemPathProbe),
        Arc::new(TokioProcessRunner),
        Arc::new(DefaultJdkDiscovery::new(platform)),
    )
}

/// Initializes the logging system for a specific component.
/// Only the CLI mirrors logs to stderr; the LSP server owns stdout and stdin.
pub fn init_logging(component: &str) -> Option<impl Drop> {
    let to_stderr = component == "cli";
    Some(extkit_core::logging::init_logging(component, to_stderr))
}
