//! Restoring pre-link dependency declarations.

use crate::core::path::cache_dir;
use crate::core::{TetherError, TetherResult};
use crate::di::PackageManager;
use crate::registry::{DeclaredVersion, DependencyKind, LinkRegistry};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

pub struct ResetEngine {
    registry: Arc<Mutex<LinkRegistry>>,
    manager: Arc<dyn PackageManager>,
    project_root: PathBuf,
}

impl ResetEngine {
    pub fn new(
        registry: Arc<Mutex<LinkRegistry>>,
        manager: Arc<dyn PackageManager>,
        project_root: &Path,
    ) -> Self {
        Self {
            registry,
            manager,
            project_root: project_root.to_path_buf(),
        }
    }

    /// Restore every linked dependency to its link-time declaration,
    /// then erase the registry store and the pack cache.
    ///
    /// Dependencies that were never declared are removed instead of
    /// restored. Each bucket is one batched package-manager call;
    /// a failing bucket is reported and does not stop the others.
    /// Cleanup is best-effort and always attempted; the first bucket
    /// error becomes the result.
    pub async fn reset(&self) -> TetherResult<()> {
        let records = {
            let registry = self.lock_registry();
            registry.all()
        };

        let mut restore_normal: Vec<(String, String)> = Vec::new();
        let mut restore_dev: Vec<(String, String)> = Vec::new();
        let mut to_remove: Vec<String> = Vec::new();

        for record in &records {
            println!("Resetting {}...", record.name);
            match &record.snapshot.version {
                DeclaredVersion::Pinned(version) => {
                    let pin = (record.name.clone(), version.clone());
                    match record.snapshot.kind {
                        DependencyKind::Normal => restore_normal.push(pin),
                        DependencyKind::Dev => restore_dev.push(pin),
                    }
                }
                DeclaredVersion::Unpublished => to_remove.push(record.name.clone()),
            }
        }

        let mut first_err: Option<TetherError> = None;

        if !restore_normal.is_empty() {
            match self.manager.install_pinned(&restore_normal, false).await {
                Ok(()) => println!("✓ Restored {} dependencies", restore_normal.len()),
                Err(e) => {
                    eprintln!("✗ Failed to restore dependencies: {}", e);
                    first_err.get_or_insert(e);
                }
            }
        }

        if !restore_dev.is_empty() {
            match self.manager.install_pinned(&restore_dev, true).await {
                Ok(()) => println!("✓ Restored {} dev dependencies", restore_dev.len()),
                Err(e) => {
                    eprintln!("✗ Failed to restore dev dependencies: {}", e);
                    first_err.get_or_insert(e);
                }
            }
        }

        if !to_remove.is_empty() {
            match self.manager.remove(&to_remove).await {
                Ok(()) => println!("✓ Removed {} unpublished dependencies", to_remove.len()),
                Err(e) => {
                    eprintln!("✗ Failed to remove unpublished dependencies: {}", e);
                    first_err.get_or_insert(e);
                }
            }
        }

        self.cleanup();

        match first_err {
            Some(e) => Err(e),
            None => {
                println!("✓ Reset done");
                Ok(())
            }
        }
    }

    /// Erase the registry store and pack cache, even after a partial
    /// restore failure.
    fn cleanup(&self) {
        {
            let mut registry = self.lock_registry();
            if let Err(e) = registry.clear() {
                warn!(error = %e, "failed to clear registry store");
            }
        }

        let cache = cache_dir(&self.project_root);
        if cache.exists() {
            if let Err(e) = fs::remove_dir_all(&cache) {
                warn!(error = %e, "failed to remove pack cache");
            }
        }
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, LinkRegistry> {
        match self.registry.lock() {
            Ok(registry) => registry,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
