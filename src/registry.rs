//! Link-state registry.
//!
//! The registry is the persistent record of which local source
//! directories are linked to which declared dependencies. It is a
//! JSON file scoped to the host project root, so separate host
//! projects never collide. Every mutation writes through to disk;
//! each key belongs to one dependency name, so last-writer-wins is
//! the only merge semantics needed.

use crate::core::path::registry_file;
use crate::core::{TetherError, TetherResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Which manifest section a linked dependency was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Normal,
    Dev,
}

/// The version string a dependency had in the host manifest at link
/// time, or `Unpublished` if it was not declared anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredVersion {
    Pinned(String),
    Unpublished,
}

/// The declared version/kind captured once at link time.
///
/// Never refreshed by reconciliation, so `reset` always restores the
/// pre-link state no matter how many reconciliations ran in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: DeclaredVersion,
    pub kind: DependencyKind,
}

/// One linked dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Package identifier, unique key in the registry.
    pub name: String,

    /// Absolute path to the local source directory.
    pub source_path: PathBuf,

    /// The linked package's own version, used for archive naming.
    pub version: String,

    /// Glob scoped to `source_path` that triggers re-reconciliation.
    #[serde(default = "default_watch_pattern")]
    pub watch_pattern: String,

    pub snapshot: Snapshot,

    /// Single-flight guard: true while a reconciliation pass for this
    /// record is in flight.
    #[serde(default)]
    pub running: bool,
}

fn default_watch_pattern() -> String {
    "**/*".to_string()
}

impl LinkRecord {
    /// Default watch pattern: all files recursively.
    pub fn default_watch_pattern() -> String {
        default_watch_pattern()
    }
}

/// File-backed mapping from dependency name to [`LinkRecord`].
#[derive(Debug)]
pub struct LinkRegistry {
    store_path: PathBuf,
    records: BTreeMap<String, LinkRecord>,
}

impl LinkRegistry {
    /// Open (or create) the registry for a host project.
    ///
    /// `running` flags are normalized to false on load: a flag left
    /// set by a crashed process must not wedge its record forever.
    pub fn open(project_root: &Path) -> TetherResult<Self> {
        let store_path = registry_file(project_root);

        let mut records: BTreeMap<String, LinkRecord> = if store_path.exists() {
            let content = fs::read_to_string(&store_path)?;
            serde_json::from_str(&content).map_err(|e| {
                TetherError::Registry(format!(
                    "failed to parse {}: {}",
                    store_path.display(),
                    e
                ))
            })?
        } else {
            BTreeMap::new()
        };

        for record in records.values_mut() {
            record.running = false;
        }

        Ok(Self {
            store_path,
            records,
        })
    }

    /// Insert or overwrite a record. Last link wins.
    pub fn put(&mut self, record: LinkRecord) -> TetherResult<()> {
        self.records.insert(record.name.clone(), record);
        self.persist()
    }

    pub fn get(&self, name: &str) -> Option<&LinkRecord> {
        self.records.get(name)
    }

    pub fn all(&self) -> Vec<LinkRecord> {
        self.records.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Flip the in-flight marker for a record.
    pub fn set_running(&mut self, name: &str, running: bool) -> TetherResult<()> {
        let record = self.records.get_mut(name).ok_or_else(|| {
            TetherError::Registry(format!("no link record for '{}'", name))
        })?;
        record.running = running;
        self.persist()
    }

    /// Erase the store. Irreversible; used only after a reset pass.
    pub fn clear(&mut self) -> TetherResult<()> {
        self.records.clear();
        if self.store_path.exists() {
            fs::remove_file(&self.store_path)?;
        }
        Ok(())
    }

    fn persist(&self) -> TetherResult<()> {
        let content = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.store_path, content)?;
        Ok(())
    }
}
