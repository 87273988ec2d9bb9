use super::project_root;
use tether::core::TetherResult;
use tether::registry::{DeclaredVersion, DependencyKind, LinkRegistry};

pub fn run() -> TetherResult<()> {
    let root = project_root()?;
    let registry = LinkRegistry::open(&root)?;

    if registry.is_empty() {
        println!("No linked dependencies.");
        return Ok(());
    }

    println!("Linked dependencies ({}):", registry.len());
    for record in registry.all() {
        let kind = match record.snapshot.kind {
            DependencyKind::Normal => "dependencies",
            DependencyKind::Dev => "devDependencies",
        };
        let declared = match &record.snapshot.version {
            DeclaredVersion::Pinned(version) => format!("was {}", version),
            DeclaredVersion::Unpublished => "unpublished".to_string(),
        };
        println!(
            "  {} <- {} ({}, {})",
            record.name,
            record.source_path.display(),
            kind,
            declared
        );
    }

    Ok(())
}
