use super::project_root;
use std::path::PathBuf;
use tether::core::TetherResult;
use tether::link::link_paths;
use tether::manifest::HostManifest;
use tether::registry::LinkRegistry;

pub async fn run(paths: Vec<PathBuf>) -> TetherResult<()> {
    let root = project_root()?;
    let host = HostManifest::load(&root)?;
    let mut registry = LinkRegistry::open(&root)?;

    link_paths(&root, &host, &mut registry, &paths)
}
