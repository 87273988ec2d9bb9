//! Concrete package-manager adapters.
//!
//! The engines are written against [`crate::di::PackageManager`];
//! this module provides the npm and yarn implementations and the
//! lockfile-based choice between them.

pub mod npm;
pub mod yarn;

use crate::di::PackageManager;
use std::path::Path;
use std::sync::Arc;
use tokio::process::Command;
use tracing::debug;

/// Pick the package manager for a host project.
///
/// A yarn.lock next to the host manifest selects yarn; everything
/// else gets npm.
pub fn detect(project_root: &Path) -> Arc<dyn PackageManager> {
    if project_root.join("yarn.lock").exists() {
        Arc::new(yarn::Yarn::new(project_root))
    } else {
        Arc::new(npm::Npm::new(project_root))
    }
}

/// Run a command to completion and capture stdout.
///
/// Non-zero exit or spawn failure comes back as descriptive text with
/// the subprocess's stderr, for the caller to wrap in the right error
/// variant.
pub(crate) async fn run_capture(cmd: &mut Command) -> Result<String, String> {
    let program = cmd.as_std().get_program().to_string_lossy().to_string();
    debug!(command = ?cmd.as_std(), "running package manager");

    let output = cmd
        .output()
        .await
        .map_err(|e| format!("failed to run {}: {}", program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
