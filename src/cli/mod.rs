//! Command handlers for the tether CLI.

pub mod connect;
pub mod link;
pub mod reset;
pub mod status;

use std::env;
use std::path::PathBuf;
use tether::core::path::find_project_root;
use tether::core::{TetherError, TetherResult};

/// Locate the host project root from the current directory.
pub fn project_root() -> TetherResult<PathBuf> {
    let cwd = env::current_dir()
        .map_err(|e| TetherError::Manifest(format!("failed to get current directory: {}", e)))?;
    find_project_root(&cwd)
}
