use super::project_root;
use std::sync::{Arc, Mutex};
use tether::core::TetherResult;
use tether::manifest::HostManifest;
use tether::pm;
use tether::registry::LinkRegistry;
use tether::reset::ResetEngine;

pub async fn run() -> TetherResult<()> {
    let root = project_root()?;
    HostManifest::load(&root)?;

    let registry = LinkRegistry::open(&root)?;
    if registry.is_empty() {
        println!("Nothing to reset.");
        return Ok(());
    }

    let manager = pm::detect(&root);
    ResetEngine::new(Arc::new(Mutex::new(registry)), manager, &root)
        .reset()
        .await
}
