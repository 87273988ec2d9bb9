use std::path::PathBuf;
use thiserror::Error;

pub type TetherResult<T> = Result<T, TetherError>;

#[derive(Error, Debug)]
pub enum TetherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A link path has no resolvable package manifest.
    /// Recovered per path; the rest of the batch continues.
    #[error("no package manifest found at {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The host project manifest is missing or unreadable.
    /// Fatal at startup for any command that needs the registry.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Archive creation failed. Fatal to the reconciliation call
    /// that issued the pack.
    #[error("Pack error: {0}")]
    Pack(String),

    /// A package-manager install/remove invocation failed.
    #[error("Install error: {0}")]
    Install(String),

    #[error("Registry error: {0}")]
    Registry(String),

    /// A watch subscription failed. Recovered; other subscriptions
    /// are unaffected.
    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Link error: {0}")]
    Link(String),
}
