//! Link resolution: populating the registry from the host manifest.

use crate::core::path::{cache_dir, ensure_dir};
use crate::core::{TetherError, TetherResult};
use crate::manifest::{HostManifest, PackageManifest};
use crate::registry::{DeclaredVersion, DependencyKind, LinkRecord, LinkRegistry, Snapshot};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Register local source directories as linked dependencies.
///
/// Each path is resolved independently: a path without a package
/// manifest is reported and skipped, the rest of the batch continues.
/// Returns an error only after the whole batch, if any path failed.
pub fn link_paths(
    project_root: &Path,
    host: &HostManifest,
    registry: &mut LinkRegistry,
    paths: &[PathBuf],
) -> TetherResult<()> {
    ensure_dir(&cache_dir(project_root))?;

    let mut failed = 0usize;

    for path in paths {
        match link_one(project_root, host, registry, path) {
            Ok(record) => {
                let declared = match &record.snapshot.version {
                    DeclaredVersion::Pinned(version) => version.clone(),
                    DeclaredVersion::Unpublished => "unpublished".to_string(),
                };
                println!(
                    "✓ Linked {} -> {} ({})",
                    record.name,
                    record.source_path.display(),
                    declared
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("✗ {}: {}", path.display(), e);
            }
        }
    }

    if failed > 0 {
        return Err(TetherError::Link(format!(
            "{} of {} paths could not be linked",
            failed,
            paths.len()
        )));
    }

    Ok(())
}

fn link_one(
    project_root: &Path,
    host: &HostManifest,
    registry: &mut LinkRegistry,
    path: &Path,
) -> TetherResult<LinkRecord> {
    let source_path = resolve_source(project_root, path)?;
    let manifest = PackageManifest::load(&source_path)?;

    // Snapshot the declaration as it exists right now; reconciliation
    // never refreshes it, so reset restores exactly this state.
    let snapshot = match host.lookup(&manifest.name) {
        Some((kind, version)) => Snapshot {
            version: DeclaredVersion::Pinned(version.to_string()),
            kind,
        },
        None => Snapshot {
            version: DeclaredVersion::Unpublished,
            kind: DependencyKind::Normal,
        },
    };

    debug!(name = %manifest.name, path = %source_path.display(), "linking");

    let record = LinkRecord {
        name: manifest.name,
        source_path,
        version: manifest.version,
        watch_pattern: LinkRecord::default_watch_pattern(),
        snapshot,
        running: false,
    };

    registry.put(record.clone())?;
    Ok(record)
}

fn resolve_source(project_root: &Path, path: &Path) -> TetherResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    };

    fs::canonicalize(&joined).map_err(|_| TetherError::SourceNotFound(joined))
}
