//! Trait definitions for dependency injection

use crate::core::TetherResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Capability surface of a shell package manager.
///
/// Two concrete variants exist (npm and yarn); the engines only ever
/// see this trait. Implementations should be thread-safe (Send + Sync).
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Binary name, for log output.
    fn name(&self) -> &'static str;

    /// Pack `source_dir` into an installable archive placed in
    /// `out_dir`, returning the archive path.
    async fn pack(&self, source_dir: &Path, out_dir: &Path) -> TetherResult<PathBuf>;

    /// Install local archives into the host project, all in one
    /// invocation.
    async fn install(&self, archives: &[PathBuf], dev: bool) -> TetherResult<()>;

    /// Install exact `name@version` pins, all in one invocation.
    async fn install_pinned(&self, pins: &[(String, String)], dev: bool) -> TetherResult<()>;

    /// Uninstall dependencies by name, all in one invocation.
    async fn remove(&self, names: &[String]) -> TetherResult<()>;
}
