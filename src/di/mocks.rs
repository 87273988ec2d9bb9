//! Mock implementations of service traits for testing

use super::traits::PackageManager;
use crate::core::{TetherError, TetherResult};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded call against [`MockPackageManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PmCall {
    Pack { source_dir: PathBuf },
    Install { archives: Vec<PathBuf>, dev: bool },
    InstallPinned { pins: Vec<String>, dev: bool },
    Remove { names: Vec<String> },
}

/// Mock package manager for testing
///
/// Records every call and fabricates real archive files on `pack`,
/// so the engine's rename path is exercised. Failures can be injected
/// per operation.
///
/// # Example
///
/// ```
/// use tether::di::mocks::MockPackageManager;
///
/// let pm = MockPackageManager::new();
/// pm.fail_installs();
/// assert!(pm.calls().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct MockPackageManager {
    calls: Arc<Mutex<Vec<PmCall>>>,
    pack_seq: Arc<AtomicU64>,
    fail_pack: Arc<Mutex<bool>>,
    fail_install: Arc<Mutex<bool>>,
    fail_remove: Arc<Mutex<bool>>,
    pack_delay: Arc<Mutex<Option<Duration>>>,
}

impl MockPackageManager {
    /// Create a new mock package manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PmCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Count recorded calls of a given shape
    pub fn count<F: Fn(&PmCall) -> bool>(&self, pred: F) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    /// Make subsequent `pack` calls fail
    pub fn fail_packs(&self) {
        *self.fail_pack.lock().unwrap() = true;
    }

    /// Make subsequent `install`/`install_pinned` calls fail
    pub fn fail_installs(&self) {
        *self.fail_install.lock().unwrap() = true;
    }

    /// Make subsequent `remove` calls fail
    pub fn fail_removes(&self) {
        *self.fail_remove.lock().unwrap() = true;
    }

    /// Make every `pack` call sleep before completing
    pub fn delay_packs(&self, delay: Duration) {
        *self.pack_delay.lock().unwrap() = Some(delay);
    }
}

#[async_trait]
impl PackageManager for MockPackageManager {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn pack(&self, source_dir: &Path, out_dir: &Path) -> TetherResult<PathBuf> {
        self.calls.lock().unwrap().push(PmCall::Pack {
            source_dir: source_dir.to_path_buf(),
        });

        let delay = *self.pack_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if *self.fail_pack.lock().unwrap() {
            return Err(TetherError::Pack(format!(
                "mock pack failure for {}",
                source_dir.display()
            )));
        }

        let seq = self.pack_seq.fetch_add(1, Ordering::SeqCst);
        let archive = out_dir.join(format!("mock-pack-{}.tgz", seq));
        fs::create_dir_all(out_dir)?;
        fs::write(&archive, b"mock tarball")?;
        Ok(archive)
    }

    async fn install(&self, archives: &[PathBuf], dev: bool) -> TetherResult<()> {
        self.calls.lock().unwrap().push(PmCall::Install {
            archives: archives.to_vec(),
            dev,
        });

        if *self.fail_install.lock().unwrap() {
            return Err(TetherError::Install("mock install failure".to_string()));
        }
        Ok(())
    }

    async fn install_pinned(&self, pins: &[(String, String)], dev: bool) -> TetherResult<()> {
        self.calls.lock().unwrap().push(PmCall::InstallPinned {
            pins: pins
                .iter()
                .map(|(name, version)| format!("{}@{}", name, version))
                .collect(),
            dev,
        });

        if *self.fail_install.lock().unwrap() {
            return Err(TetherError::Install(
                "mock pinned install failure".to_string(),
            ));
        }
        Ok(())
    }

    async fn remove(&self, names: &[String]) -> TetherResult<()> {
        self.calls.lock().unwrap().push(PmCall::Remove {
            names: names.to_vec(),
        });

        if *self.fail_remove.lock().unwrap() {
            return Err(TetherError::Install("mock remove failure".to_string()));
        }
        Ok(())
    }
}
