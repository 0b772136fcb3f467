//! Lifecycle hooks for the prepare pipeline
//!
//! The single asynchronous boundary of the sync: before the source
//! list is rebuilt, every script under `<app_root>/hooks/pre-package/`
//! runs as a subprocess with the resolved web-asset root and platform
//! tags in its environment. Scripts run in file-name order; the first
//! failure aborts the sync (fail-fast, no retries).

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Events the pipeline fires hooks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Before the source list is rebuilt and the package assembled.
    PrePackage,
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrePackage => write!(f, "pre-package"),
        }
    }
}

/// Payload handed to every hook script via its environment.
#[derive(Debug, Clone)]
pub struct HookPayload {
    /// The reconciled web-asset root (`APPX_ASSET_ROOT`).
    pub asset_root: PathBuf,
    /// Platform tags being prepared (`APPX_PLATFORMS`, comma-joined).
    pub platforms: Vec<String>,
}

/// Outcome of one hook script.
#[derive(Debug)]
pub struct HookResult {
    pub script: PathBuf,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Runs hook scripts from an application's `hooks/` directory.
#[derive(Debug, Clone)]
pub struct HookRunner {
    app_root: PathBuf,
}

impl HookRunner {
    pub fn new(app_root: &Path) -> Self {
        Self {
            app_root: app_root.to_path_buf(),
        }
    }

    /// Fire `event`, running every script under
    /// `hooks/<event>/` in file-name order.
    ///
    /// A missing hooks directory means no hooks are configured and is
    /// not an error. A script exiting non-zero stops execution and is
    /// surfaced as [`Error::HookFailed`] with its stderr.
    pub fn fire(&self, event: HookEvent, payload: &HookPayload) -> Result<Vec<HookResult>> {
        let event_dir = self.app_root.join("hooks").join(event.to_string());
        if !event_dir.is_dir() {
            tracing::debug!(%event, "no hooks directory, skipping");
            return Ok(Vec::new());
        }

        let mut scripts: Vec<PathBuf> = std::fs::read_dir(&event_dir)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.path())
            .collect();
        scripts.sort();

        let mut results = Vec::new();
        for script in scripts {
            tracing::debug!(script = %script.display(), %event, "running hook");
            let result = self.execute(&script, payload)?;

            if !result.success {
                let stderr_snippet = result.stderr.trim();
                let message = if stderr_snippet.is_empty() {
                    format!("exit code {:?}", result.exit_code)
                } else {
                    format!("exit code {:?}: {}", result.exit_code, stderr_snippet)
                };
                return Err(Error::HookFailed {
                    event: event.to_string(),
                    command: script.display().to_string(),
                    message,
                });
            }

            results.push(result);
        }

        Ok(results)
    }

    fn execute(&self, script: &Path, payload: &HookPayload) -> Result<HookResult> {
        let output = Command::new(script)
            .current_dir(&self.app_root)
            .env("APPX_ASSET_ROOT", &payload.asset_root)
            .env("APPX_PLATFORMS", payload.platforms.join(","))
            .output()?;

        Ok(HookResult {
            script: script.to_path_buf(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        })
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, body: &str) {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn payload(root: &Path) -> HookPayload {
        HookPayload {
            asset_root: root.join("www"),
            platforms: vec!["windows".to_string()],
        }
    }

    #[test]
    fn test_fire_without_hooks_dir_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let runner = HookRunner::new(temp.path());
        let results = runner
            .fire(HookEvent::PrePackage, &payload(temp.path()))
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_fire_executes_scripts_with_payload_env() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("marker.txt");
        write_script(
            &temp.path().join("hooks/pre-package"),
            "10-record.sh",
            &format!("echo \"$APPX_ASSET_ROOT|$APPX_PLATFORMS\" > '{}'", marker.display()),
        );

        let runner = HookRunner::new(temp.path());
        let results = runner
            .fire(HookEvent::PrePackage, &payload(temp.path()))
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].success);
        let recorded = fs::read_to_string(&marker).unwrap();
        assert!(recorded.contains("www|windows"), "got: {recorded}");
    }

    #[test]
    fn test_fire_runs_scripts_in_name_order() {
        let temp = TempDir::new().unwrap();
        let log = temp.path().join("order.log");
        let dir = temp.path().join("hooks/pre-package");
        write_script(&dir, "20-second.sh", &format!("echo second >> '{}'", log.display()));
        write_script(&dir, "10-first.sh", &format!("echo first >> '{}'", log.display()));

        let runner = HookRunner::new(temp.path());
        runner
            .fire(HookEvent::PrePackage, &payload(temp.path()))
            .unwrap();

        assert_eq!(fs::read_to_string(&log).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_failing_hook_is_fatal_and_fail_fast() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("ran-after.txt");
        let dir = temp.path().join("hooks/pre-package");
        write_script(&dir, "10-fail.sh", "echo 'broken hook' >&2; exit 3");
        write_script(&dir, "20-after.sh", &format!("touch '{}'", marker.display()));

        let runner = HookRunner::new(temp.path());
        let err = runner
            .fire(HookEvent::PrePackage, &payload(temp.path()))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("pre-package"), "got: {message}");
        assert!(message.contains("broken hook"), "got: {message}");
        assert!(!marker.exists(), "later hooks must not run after a failure");
    }
}
