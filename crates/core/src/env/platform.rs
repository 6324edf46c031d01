//! Platform-specific naming, kept apart so the locator can run against a fake platform.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Unix,
}

/// Describes the conventions of the platform the locator inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    family: PlatformFamily,
}

impl Platform {
    pub const fn new(family: PlatformFamily) -> Self {
        Self { family }
    }

    pub const fn windows() -> Self {
        Self::new(PlatformFamily::Windows)
    }

    pub const fn unix() -> Self {
        Self::new(PlatformFamily::Unix)
    }

    /// The platform this binary was built for.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::windows()
        } else {
            Self::unix()
        }
    }

    pub fn family(&self) -> PlatformFamily {
        self.family
    }

    /// File name of an executable, e.g. `javac` or `javac.exe`.
    pub fn executable_name(&self, base: &str) -> String {
        match self.family {
            PlatformFamily::Windows => format!("{base}.exe"),
            PlatformFamily::Unix => base.to_string(),
        }
    }

    /// Environment variable holding the current user's home directory.
    pub fn home_variable(&self) -> &'static str {
        match self.family {
            PlatformFamily::Windows => "USERPROFILE",
            PlatformFamily::Unix => "HOME",
        }
    }

    pub fn compiler_executable(&self) -> String {
        self.executable_name("javac")
    }

    pub fn runtime_executable(&self) -> String {
        self.executable_name("java")
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Named variable lookup over some process environment.
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// A fixed set of variables, for tests and embedding hosts.
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
