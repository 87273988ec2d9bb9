//! Host and source package manifests.
//!
//! The host manifest is the `package.json` of the project that consumes
//! linked dependencies. Its dependency sections are modelled as explicit
//! ordered mappings so lookups are keyed access, not enumeration.

use crate::core::{TetherError, TetherResult};
use crate::registry::DependencyKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The host project's package.json, reduced to the fields the
/// engine cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostManifest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl HostManifest {
    /// Load the host manifest from a project root.
    pub fn load(project_root: &Path) -> TetherResult<Self> {
        let path = project_root.join("package.json");
        let content = fs::read_to_string(&path).map_err(|e| {
            TetherError::Manifest(format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            TetherError::Manifest(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Look up a dependency name in the manifest sections.
    ///
    /// The normal section takes precedence when a name appears in both;
    /// npm tooling has always resolved the ambiguity this way.
    pub fn lookup(&self, name: &str) -> Option<(DependencyKind, &str)> {
        if let Some(version) = self.dependencies.get(name) {
            return Some((DependencyKind::Normal, version));
        }
        self.dev_dependencies
            .get(name)
            .map(|version| (DependencyKind::Dev, version.as_str()))
    }
}

/// The `name`/`version` pair of a linked source directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
}

impl PackageManifest {
    /// Load the manifest of a local source directory.
    ///
    /// A missing directory or missing package.json is `SourceNotFound`.
    pub fn load(source_dir: &Path) -> TetherResult<Self> {
        let path = source_dir.join("package.json");
        if !path.exists() {
            return Err(TetherError::SourceNotFound(source_dir.to_path_buf()));
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            TetherError::Manifest(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}
