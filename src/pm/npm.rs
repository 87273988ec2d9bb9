//! npm adapter.

use super::run_capture;
use crate::core::{TetherError, TetherResult};
use crate::di::PackageManager;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub struct Npm {
    project_root: PathBuf,
}

impl Npm {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

#[async_trait]
impl PackageManager for Npm {
    fn name(&self) -> &'static str {
        "npm"
    }

    async fn pack(&self, source_dir: &Path, out_dir: &Path) -> TetherResult<PathBuf> {
        // npm prints the created tarball filename on stdout.
        let mut cmd = Command::new("npm");
        cmd.arg("pack").arg(source_dir).current_dir(out_dir);

        let stdout = run_capture(&mut cmd).await.map_err(TetherError::Pack)?;
        let filename = stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .next_back()
            .ok_or_else(|| {
                TetherError::Pack(format!(
                    "npm pack produced no archive for {}",
                    source_dir.display()
                ))
            })?;

        Ok(out_dir.join(filename))
    }

    async fn install(&self, archives: &[PathBuf], dev: bool) -> TetherResult<()> {
        let mut cmd = Command::new("npm");
        cmd.arg("install").current_dir(&self.project_root);
        for archive in archives {
            cmd.arg(format!("file:{}", archive.display()));
        }
        if dev {
            cmd.arg("--save-dev");
        }

        run_capture(&mut cmd).await.map_err(TetherError::Install)?;
        Ok(())
    }

    async fn install_pinned(&self, pins: &[(String, String)], dev: bool) -> TetherResult<()> {
        let mut cmd = Command::new("npm");
        cmd.arg("install").current_dir(&self.project_root);
        for (name, version) in pins {
            cmd.arg(format!("{}@{}", name, version));
        }
        if dev {
            cmd.arg("--save-dev");
        }

        run_capture(&mut cmd).await.map_err(TetherError::Install)?;
        Ok(())
    }

    async fn remove(&self, names: &[String]) -> TetherResult<()> {
        let mut cmd = Command::new("npm");
        cmd.arg("uninstall")
            .args(names)
            .current_dir(&self.project_root);

        run_capture(&mut cmd).await.map_err(TetherError::Install)?;
        Ok(())
    }
}
