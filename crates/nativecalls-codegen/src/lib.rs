//! Native call source generation.
//!
//! Turns a plain-text list of C prototypes into per-platform `DllImport`
//! bindings, a platform-neutral reference file and a linker export list.
//!
//! ## Modules
//!
//! - [`definition`]: prototype line parser
//! - [`writer`]: indentation-tracking line writer
//! - [`emit`]: binding, reference and export-list emitters
//! - [`config`]: generator settings
//! - [`generate`]: the end-to-end pipeline writing files to disk

pub mod config;
pub mod definition;
pub mod digest;
pub mod emit;
pub mod error;
pub mod generate;
pub mod writer;

pub use config::{ConfigError, ExportStyle, GeneratorConfig};
pub use definition::{load_definitions, parse_definitions, Definition, DefinitionError};
pub use emit::{BindingEmitter, EmittedFile, ExportListEmitter, ReferenceEmitter};
pub use error::{CodegenError, Result};
pub use generate::{generate, generate_exports, generate_from_file, FileKind, GeneratedFile, GenerationReport};
pub use writer::{CodeWriter, LineEnding, WriterError};
