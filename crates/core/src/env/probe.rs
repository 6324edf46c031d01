//! Filesystem and process capabilities the locator is built on.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;

/// Synchronous existence/access check.
pub trait PathProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

/// Checks the real filesystem. Unreadable entries count as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPathProbe;

impl PathProbe for SystemPathProbe {
    fn exists(&self, path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }
}

/// Captured result of one external process run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs an external executable to completion and captures its output.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[&str]) -> std::io::Result<ProcessOutput>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &Path, args: &[&str]) -> std::io::Result<ProcessOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(ProcessOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_probe_sees_real_entries() {
        let temp = tempfile::tempdir().unwrap();
        let probe = SystemPathProbe;
        assert!(probe.exists(temp.path()));
        assert!(!probe.exists(&temp.path().join("missing")));
    }

    #[tokio::test]
    async fn tokio_runner_reports_spawn_failures() {
        let temp = tempfile::tempdir().unwrap();
        let result = TokioProcessRunner
            .run(&temp.path().join("no-such-binary"), &["-version"])
            .await;
        assert!(result.is_err());
    }
}
