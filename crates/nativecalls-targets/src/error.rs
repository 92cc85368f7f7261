//! Catalog error types.

use std::path::PathBuf;

/// Errors raised while loading, validating or querying a platform catalog.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("invalid catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot serialize catalog: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("cannot read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog path does not exist.
    #[error("no catalog at {}", path.display())]
    NotFound { path: PathBuf },

    /// A requested platform id is not in the catalog.
    #[error("unknown platform '{id}'")]
    UnknownPlatform { id: String },

    /// The catalog parsed but describes an unusable platform set.
    #[error("invalid catalog: {detail}")]
    Validation { detail: String },
}

/// Result alias for catalog operations.
pub type Result<T> = std::result::Result<T, TargetError>;
