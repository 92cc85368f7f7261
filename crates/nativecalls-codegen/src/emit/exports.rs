//! Linker export list for the consolidated native shim.

use super::EmittedFile;
use crate::config::GeneratorConfig;
use crate::definition::Definition;
use crate::error::Result;
use crate::writer::CodeWriter;

/// Writes the linker export list named by `export_file`.
pub struct ExportListEmitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> ExportListEmitter<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// One directive per definition, in input order. Names are not deduplicated.
    pub fn emit(&self, definitions: &[Definition]) -> Result<EmittedFile> {
        let mut writer = CodeWriter::new(self.config.line_ending);
        for definition in definitions {
            writer.line(&self.config.export_style.directive(definition.name()));
        }
        EmittedFile::finish(self.config.export_file.clone(), writer)
    }
}
