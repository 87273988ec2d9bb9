//! yarn adapter.

use super::run_capture;
use crate::core::{TetherError, TetherResult};
use crate::di::PackageManager;
use crate::engine::sanitize_name;
use crate::manifest::PackageManifest;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub struct Yarn {
    project_root: PathBuf,
}

impl Yarn {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
        }
    }
}

#[async_trait]
impl PackageManager for Yarn {
    fn name(&self) -> &'static str {
        "yarn"
    }

    async fn pack(&self, source_dir: &Path, out_dir: &Path) -> TetherResult<PathBuf> {
        // yarn pack has no filename convention of its own; derive one
        // from the source manifest and pass it explicitly.
        let manifest = PackageManifest::load(source_dir)?;
        let archive = out_dir.join(format!(
            "{}-{}.tgz",
            sanitize_name(&manifest.name),
            manifest.version
        ));

        let mut cmd = Command::new("yarn");
        cmd.arg("pack")
            .arg("--cwd")
            .arg(source_dir)
            .arg("--filename")
            .arg(&archive);

        run_capture(&mut cmd).await.map_err(TetherError::Pack)?;
        Ok(archive)
    }

    async fn install(&self, archives: &[PathBuf], dev: bool) -> TetherResult<()> {
        let mut cmd = Command::new("yarn");
        cmd.arg("add").current_dir(&self.project_root);
        for archive in archives {
            cmd.arg(format!("file:{}", archive.display()));
        }
        if dev {
            cmd.arg("--dev");
        }

        run_capture(&mut cmd).await.map_err(TetherError::Install)?;
        Ok(())
    }

    async fn install_pinned(&self, pins: &[(String, String)], dev: bool) -> TetherResult<()> {
        let mut cmd = Command::new("yarn");
        cmd.arg("add").current_dir(&self.project_root);
        for (name, version) in pins {
            cmd.arg(format!("{}@{}", name, version));
        }
        if dev {
            cmd.arg("--dev");
        }

        run_capture(&mut cmd).await.map_err(TetherError::Install)?;
        Ok(())
    }

    async fn remove(&self, names: &[String]) -> TetherResult<()> {
        let mut cmd = Command::new("yarn");
        cmd.arg("remove")
            .args(names)
            .current_dir(&self.project_root);

        run_capture(&mut cmd).await.map_err(TetherError::Install)?;
        Ok(())
    }
}
