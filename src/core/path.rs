use crate::core::error::{TetherError, TetherResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Registry store file name, scoped to the host project root.
pub const REGISTRY_FILE: &str = ".tether.json";

/// Pack cache directory name, scoped to the host project root.
pub const CACHE_DIR: &str = ".tether-cache";

/// Find the host project root by walking up from `start` looking for
/// a package.json.
///
/// Every command needs the host manifest; a missing one is fatal.
pub fn find_project_root(start: &Path) -> TetherResult<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join("package.json").exists() {
            return Ok(current);
        }

        if !current.pop() {
            return Err(TetherError::Manifest(format!(
                "no package.json found in {} or any parent directory",
                start.display()
            )));
        }
    }
}

/// Get the registry store file path for a project (./.tether.json)
pub fn registry_file(project_root: &Path) -> PathBuf {
    project_root.join(REGISTRY_FILE)
}

/// Get the pack cache directory for a project (./.tether-cache)
pub fn cache_dir(project_root: &Path) -> PathBuf {
    project_root.join(CACHE_DIR)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> TetherResult<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
