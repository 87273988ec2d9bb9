//! Tether: link local packages into a host project without publishing.
//!
//! This crate repackages a local directory into an installable archive,
//! installs that archive into the host project's dependency tree, and
//! can re-run that cycle automatically whenever the directory changes,
//! restoring the original dependency declaration on demand.

pub use self::core::{TetherError, TetherResult};
pub use self::registry::{DeclaredVersion, DependencyKind, LinkRecord, LinkRegistry, Snapshot};

/// Error taxonomy and store paths.
pub mod core;

/// Dependency injection infrastructure.
pub mod di;

/// Pack-then-install reconciliation.
pub mod engine;

/// Link resolution (populating the registry).
pub mod link;

/// Host and source package manifests.
pub mod manifest;

/// Concrete package-manager adapters (npm, yarn).
pub mod pm;

/// Link-state registry.
pub mod registry;

/// Restoring pre-link dependency declarations.
pub mod reset;

/// Watch scheduling for automatic re-reconciliation.
pub mod watch;
