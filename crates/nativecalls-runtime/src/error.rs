//! Runtime configuration error types.

/// Errors raised while reading the native option table.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    /// The table pointer was null.
    #[error("configuration table pointer is null")]
    NullTable,

    /// An option name is not valid UTF-8.
    #[error("option {index} has a non UTF-8 name")]
    InvalidName { index: usize },

    /// The same option name appears twice.
    #[error("option '{name}' appears more than once")]
    DuplicateOption { name: String },

    /// A setting needs an option the table does not contain.
    #[error("missing configuration option '{name}'")]
    MissingOption { name: String },
}

/// Result type alias for runtime configuration operations.
pub type Result<T> = std::result::Result<T, RuntimeConfigError>;
