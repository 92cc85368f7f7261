//! Source emitters.
//!
//! - [`binding`]: one `DllImport` file per platform
//! - [`reference`]: one platform-neutral file of throwing stubs
//! - [`exports`]: one linker export list
//!
//! Emitters are pure: they turn definitions into an [`EmittedFile`] and
//! leave writing to disk to [`crate::generate`].

pub mod binding;
pub mod exports;
pub mod reference;

pub use binding::BindingEmitter;
pub use exports::ExportListEmitter;
pub use reference::ReferenceEmitter;

use crate::config::GeneratorConfig;
use crate::error::{CodegenError, Result};
use crate::writer::{CodeWriter, WriterError};

/// A generated file that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    /// File name relative to the output directory.
    pub file_name: String,
    /// Complete file text, line endings included.
    pub contents: String,
}

impl EmittedFile {
    fn finish(file_name: String, writer: CodeWriter) -> Result<Self> {
        let contents = writer.finish().map_err(|source| CodegenError::Writer {
            file: file_name.clone(),
            source,
        })?;
        Ok(Self { file_name, contents })
    }
}

/// Open the guard, namespace and class shared by every C# file.
fn open_class(writer: &mut CodeWriter, config: &GeneratorConfig, guard: &str) {
    writer.line(&format!("#if {guard}"));
    writer.line("using System.Runtime.InteropServices;");
    writer.line(&format!("namespace {}", config.namespace));
    writer.open_block();
    writer.line(&format!("internal static class {}", config.class_name));
    writer.open_block();
}

fn close_class(writer: &mut CodeWriter) -> std::result::Result<(), WriterError> {
    writer.close_block()?;
    writer.close_block()?;
    writer.line("#endif");
    Ok(())
}
