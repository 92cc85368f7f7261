//! Platform-neutral reference stubs.
//!
//! Every stub carries the real signature and a body that throws, so the API
//! surface compiles and documents without any native library present.

use super::{close_class, open_class, EmittedFile};
use crate::config::GeneratorConfig;
use crate::definition::Definition;
use crate::error::{CodegenError, Result};
use crate::writer::CodeWriter;

/// Writes `<prefix>.ref.cs`, gated by the reference symbol.
pub struct ReferenceEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ReferenceEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// One throwing stub per definition, in input order.
    pub fn emit(&self, definitions: &[Definition]) -> Result<EmittedFile> {
        let file_name = self.config.reference_file_name();

        let mut writer = CodeWriter::new(self.config.line_ending);
        open_class(&mut writer, self.config, &self.config.reference_symbol);
        for definition in definitions {
            writer.line(&format!("public static unsafe {} => throw null;", definition.signature()));
        }
        close_class(&mut writer).map_err(|source| CodegenError::Writer {
            file: file_name.clone(),
            source,
        })?;

        EmittedFile::finish(file_name, writer)
    }
}
