//! Pack-then-install reconciliation.
//!
//! One `reconcile` call drives a batch of link records through
//! pack -> install, with a per-record single-flight guard. The same
//! entry point serves the one-shot `connect` command and every
//! watch-triggered re-run.

use crate::core::path::{cache_dir, ensure_dir};
use crate::core::{TetherError, TetherResult};
use crate::di::PackageManager;
use crate::registry::{DependencyKind, LinkRecord, LinkRegistry};
use chrono::Utc;
use futures_util::future::try_join_all;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

static PACK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Strip path-unsafe characters from a package name so it can be
/// embedded in an archive filename (`@scope/pkg` -> `scope-pkg`).
pub fn sanitize_name(name: &str) -> String {
    name.trim_start_matches('@').replace('/', "-")
}

/// A token that differs between any two packs, even within the same
/// millisecond: wall-clock millis plus a process-local sequence.
fn unique_token() -> String {
    let seq = PACK_SEQ.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", Utc::now().timestamp_millis(), seq)
}

/// Clears the `running` flag of every claimed record on every exit
/// path, so a failed run can never deadlock a record.
struct RunningGuard {
    registry: Arc<Mutex<LinkRegistry>>,
    names: Vec<String>,
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        let mut registry = match self.registry.lock() {
            Ok(registry) => registry,
            Err(poisoned) => poisoned.into_inner(),
        };
        for name in &self.names {
            if let Err(e) = registry.set_running(name, false) {
                warn!(name = %name, error = %e, "failed to release running flag");
            }
        }
    }
}

pub struct ReconciliationEngine {
    registry: Arc<Mutex<LinkRegistry>>,
    manager: Arc<dyn PackageManager>,
    cache_dir: PathBuf,
}

impl ReconciliationEngine {
    pub fn new(
        registry: Arc<Mutex<LinkRegistry>>,
        manager: Arc<dyn PackageManager>,
        project_root: &Path,
    ) -> Self {
        Self {
            registry,
            manager,
            cache_dir: cache_dir(project_root),
        }
    }

    /// Reconcile every record currently in the registry.
    pub async fn reconcile_all(&self) -> TetherResult<()> {
        let names: Vec<String> = {
            let registry = self.lock_registry();
            registry.all().into_iter().map(|r| r.name).collect()
        };
        self.reconcile(&names).await
    }

    /// Run the pack -> install cycle for a batch of link names.
    ///
    /// Records already mid-run are skipped (a no-op, not an error).
    /// The first pack failure aborts the whole call; archives from
    /// other records in the batch are discarded. Install calls are
    /// batched: at most one normal and one dev install per call.
    pub async fn reconcile(&self, names: &[String]) -> TetherResult<()> {
        ensure_dir(&self.cache_dir)?;

        // Claim phase: mark everything we will work on before the
        // first suspension point.
        let claimed: Vec<LinkRecord> = {
            let mut registry = self.lock_registry();
            let mut claimed: Vec<LinkRecord> = Vec::new();
            for name in names {
                match registry.get(name).cloned() {
                    Some(record) if record.running => {
                        println!("Connect already running for {}, skipped.", name);
                    }
                    Some(record) => {
                        if let Err(e) = registry.set_running(name, true) {
                            for prior in &claimed {
                                let _ = registry.set_running(&prior.name, false);
                            }
                            return Err(e);
                        }
                        claimed.push(record);
                    }
                    None => {
                        debug!(name = %name, "no link record, skipping");
                    }
                }
            }
            claimed
        };

        if claimed.is_empty() {
            return Ok(());
        }

        let _guard = RunningGuard {
            registry: Arc::clone(&self.registry),
            names: claimed.iter().map(|r| r.name.clone()).collect(),
        };

        for record in &claimed {
            println!("Connecting {}...", record.name);
        }

        // Pack the whole batch before any install starts.
        let archives =
            try_join_all(claimed.iter().map(|record| self.pack_record(record))).await?;

        let mut normal = Vec::new();
        let mut dev = Vec::new();
        for (kind, archive) in archives {
            match kind {
                DependencyKind::Normal => normal.push(archive),
                DependencyKind::Dev => dev.push(archive),
            }
        }

        if !normal.is_empty() {
            self.manager.install(&normal, false).await?;
        }
        if !dev.is_empty() {
            self.manager.install(&dev, true).await?;
        }

        for record in &claimed {
            println!("✓ Connected {}", record.name);
        }

        Ok(())
    }

    async fn pack_record(
        &self,
        record: &LinkRecord,
    ) -> TetherResult<(DependencyKind, PathBuf)> {
        let packed = self
            .manager
            .pack(&record.source_path, &self.cache_dir)
            .await?;

        // Rename to something the package manager has never seen, so
        // a watcher-triggered rebuild is never served from its cache.
        let unique = self.cache_dir.join(format!(
            "{}-{}-{}.tgz",
            sanitize_name(&record.name),
            record.version,
            unique_token()
        ));
        fs::rename(&packed, &unique).map_err(|e| {
            TetherError::Pack(format!(
                "failed to stage archive for {}: {}",
                record.name, e
            ))
        })?;

        Ok((record.snapshot.kind, unique))
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, LinkRegistry> {
        match self.registry.lock() {
            Ok(registry) => registry,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
