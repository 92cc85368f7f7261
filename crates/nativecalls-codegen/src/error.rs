//! Codegen error types.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::definition::DefinitionError;
use crate::writer::WriterError;

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A prototype line does not match the supported grammar.
    #[error("line {line}: {source}: `{text}`")]
    InvalidDefinition {
        /// 1-based line number in the prototypes file.
        line: usize,
        /// The offending line, trimmed.
        text: String,
        #[source]
        source: DefinitionError,
    },

    /// Two prototypes declare the same symbol.
    #[error("line {line}: duplicate definition of '{name}' (first declared on line {first_line})")]
    DuplicateDefinition {
        /// The repeated function name.
        name: String,
        /// Line of the first declaration.
        first_line: usize,
        /// Line of the repeat.
        line: usize,
    },

    /// The emitter produced structurally unbalanced output.
    #[error("{file}: {source}")]
    Writer {
        /// Name of the file being emitted.
        file: String,
        #[source]
        source: WriterError,
    },

    /// Reading the input or writing an output file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A generator setting cannot be emitted safely.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Platform catalog error.
    #[error("target error: {0}")]
    Target(#[from] nativecalls_targets::TargetError),
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;
