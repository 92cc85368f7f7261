//! Per-platform `DllImport` bindings.

use nativecalls_targets::PlatformDescriptor;

use super::{close_class, open_class, EmittedFile};
use crate::config::GeneratorConfig;
use crate::definition::Definition;
use crate::error::{CodegenError, Result};
use crate::writer::CodeWriter;

/// Emits one binding file per platform descriptor.
pub struct BindingEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> BindingEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Guard expression: the platform symbol and not the reference build.
    pub fn guard(&self, platform: &PlatformDescriptor) -> String {
        format!(
            "{} && !{}",
            platform.conditional_symbol(),
            self.config.reference_symbol
        )
    }

    /// Generate the binding file for `platform`.
    ///
    /// Definitions are emitted in input order; their text is trusted as parsed.
    pub fn emit(&self, platform: &PlatformDescriptor, definitions: &[Definition]) -> Result<EmittedFile> {
        let file_name = self.config.binding_file_name(platform);
        let library = platform.library_file_name(&self.config.library_stem);

        let mut writer = CodeWriter::new(self.config.line_ending);
        open_class(&mut writer, self.config, &self.guard(platform));
        for definition in definitions {
            writer.line(&format!(
                r#"[DllImport("{library}", EntryPoint = "{}", CallingConvention = CallingConvention.Cdecl)]"#,
                definition.name()
            ));
            writer.line(&format!("public static extern unsafe {};", definition.signature()));
        }
        close_class(&mut writer).map_err(|source| CodegenError::Writer {
            file: file_name.clone(),
            source,
        })?;

        EmittedFile::finish(file_name, writer)
    }
}
