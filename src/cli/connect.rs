use super::project_root;
use std::sync::{Arc, Mutex};
use tether::core::TetherResult;
use tether::engine::ReconciliationEngine;
use tether::manifest::HostManifest;
use tether::pm;
use tether::registry::LinkRegistry;
use tether::watch::WatchScheduler;

pub async fn run(watch: bool) -> TetherResult<()> {
    let root = project_root()?;
    HostManifest::load(&root)?;

    let registry = LinkRegistry::open(&root)?;
    if registry.is_empty() {
        println!("No linked dependencies. Run 'tether link <path>' first.");
        return Ok(());
    }

    let records = registry.all();
    let manager = pm::detect(&root);
    let engine = Arc::new(ReconciliationEngine::new(
        Arc::new(Mutex::new(registry)),
        manager,
        &root,
    ));

    if watch {
        WatchScheduler::new(engine).run(records).await
    } else {
        engine.reconcile_all().await
    }
}
