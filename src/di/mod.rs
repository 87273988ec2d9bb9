//! Dependency injection infrastructure.
//!
//! The reconciliation and reset engines are written against the
//! capability traits here, never against a concrete package-manager
//! binary. Production implementations live in [`crate::pm`]; mock
//! implementations for testing live in [`mocks`].

pub mod mocks;
pub mod traits;

pub use traits::PackageManager;
