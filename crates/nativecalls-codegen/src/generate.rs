//! End-to-end generation: definitions in, files on disk out.
//!
//! Files are written one after another in a fixed order (bindings in
//! platform order, then the reference file, then the export list). Existing
//! files are replaced. A failure stops the run; files written before it
//! stay on disk.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::definition::{load_definitions, Definition};
use crate::digest::sha256_hex;
use crate::emit::{BindingEmitter, EmittedFile, ExportListEmitter, ReferenceEmitter};
use crate::error::{CodegenError, Result};

/// What a generated file contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FileKind {
    Binding { platform: String },
    Reference,
    ExportList,
}

/// One file written by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub kind: FileKind,
    /// Hex SHA-256 of the written bytes.
    pub sha256: String,
}

/// Summary of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Number of definitions emitted into each file.
    pub definitions: usize,
    /// Files in the order they were written.
    pub files: Vec<GeneratedFile>,
}

impl GenerationReport {
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }
}

/// Write every binding file, the reference file and the export list into `out_dir`.
pub fn generate(definitions: &[Definition], out_dir: &Path, config: &GeneratorConfig) -> Result<GenerationReport> {
    config.validate()?;
    create_out_dir(out_dir)?;

    let mut files = Vec::with_capacity(config.platforms.len() + 2);

    let bindings = BindingEmitter::new(config);
    for platform in &config.platforms {
        let emitted = bindings.emit(platform, definitions)?;
        files.push(write_file(
            out_dir,
            emitted,
            FileKind::Binding {
                platform: platform.id.clone(),
            },
        )?);
    }

    let reference = ReferenceEmitter::new(config).emit(definitions)?;
    files.push(write_file(out_dir, reference, FileKind::Reference)?);

    let exports = ExportListEmitter::new(config).emit(definitions)?;
    files.push(write_file(out_dir, exports, FileKind::ExportList)?);

    tracing::info!(
        out_dir = %out_dir.display(),
        definitions = definitions.len(),
        files = files.len(),
        "generation complete"
    );

    Ok(GenerationReport {
        definitions: definitions.len(),
        files,
    })
}

/// Load a prototypes file and run [`generate`] on it.
pub fn generate_from_file(input: &Path, out_dir: &Path, config: &GeneratorConfig) -> Result<GenerationReport> {
    let definitions = load_definitions(input, config.allow_duplicates)?;
    generate(&definitions, out_dir, config)
}

/// Write only the linker export list.
pub fn generate_exports(definitions: &[Definition], out_dir: &Path, config: &GeneratorConfig) -> Result<GeneratedFile> {
    config.validate()?;
    create_out_dir(out_dir)?;
    let exports = ExportListEmitter::new(config).emit(definitions)?;
    write_file(out_dir, exports, FileKind::ExportList)
}

fn create_out_dir(out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir).map_err(|e| CodegenError::io(out_dir, e))
}

fn write_file(out_dir: &Path, emitted: EmittedFile, kind: FileKind) -> Result<GeneratedFile> {
    let path = out_dir.join(&emitted.file_name);
    std::fs::write(&path, emitted.contents.as_bytes()).map_err(|e| CodegenError::io(&path, e))?;
    tracing::debug!(path = %path.display(), bytes = emitted.contents.len(), "wrote generated file");

    Ok(GeneratedFile {
        sha256: sha256_hex(emitted.contents.as_bytes()),
        path,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    fn defs(lines: &[&str]) -> Vec<Definition> {
        lines.iter().map(|l| Definition::parse(l).unwrap()).collect()
    }

    #[test]
    fn writes_all_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("obj").join("generated");
        let config = GeneratorConfig::default();

        let report = generate(&defs(&["int br_get_config()"]), &out, &config).unwrap();

        let names: Vec<_> = report
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "NativeCalls.win-x86.cs",
                "NativeCalls.win-x64.cs",
                "NativeCalls.linux-x86.cs",
                "NativeCalls.linux-x64.cs",
                "NativeCalls.osx-x64.cs",
                "NativeCalls.ref.cs",
                "linkcommands",
            ]
        );
        assert_eq!(report.definitions, 1);
        assert!(report.paths().iter().all(|p| p.is_file()));
        assert_eq!(
            report.files[1].kind,
            FileKind::Binding {
                platform: "win-x64".into()
            }
        );
    }

    #[test]
    fn digest_matches_written_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let report = generate(&defs(&["void br_foo(x, y)"]), dir.path(), &GeneratorConfig::default()).unwrap();
        for file in &report.files {
            let bytes = std::fs::read(&file.path).unwrap();
            assert_eq!(file.sha256, sha256_hex(&bytes));
        }
    }

    #[test]
    fn overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::default();
        std::fs::write(dir.path().join("linkcommands"), "export stale_symbol\nexport other\n").unwrap();

        generate(&defs(&["int br_get_config()"]), dir.path(), &config).unwrap();

        let exports = std::fs::read_to_string(dir.path().join("linkcommands")).unwrap();
        assert_eq!(exports, "export br_get_config\n");
    }

    #[test]
    fn exports_only() {
        let dir = tempfile::tempdir().unwrap();
        let file = generate_exports(&defs(&["int br_a()", "int br_b()"]), dir.path(), &GeneratorConfig::default())
            .unwrap();
        assert_eq!(file.kind, FileKind::ExportList);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(std::fs::read_to_string(&file.path).unwrap(), "export br_a\nexport br_b\n");
    }

    #[test]
    fn out_dir_blocked_by_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = generate(&[], &blocker, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, CodegenError::Io { .. }));
    }

    #[test]
    fn invalid_symbols_fail_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let config = GeneratorConfig {
            reference_symbol: String::new(),
            namespace: "Bear SSL".into(),
            ..GeneratorConfig::default()
        };

        let err = generate(&defs(&["int br_get_config()"]), &out, &config).unwrap_err();
        assert!(matches!(err, CodegenError::Config(ConfigError::InvalidSymbol { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn export_file_cannot_escape_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let config = GeneratorConfig {
            export_file: "../escaped".into(),
            ..GeneratorConfig::default()
        };
        let definitions = defs(&["int br_get_config()"]);

        let err = generate(&definitions, &out, &config).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Config(ConfigError::InvalidFileName { key: "export-file", .. })
        ));
        assert!(generate_exports(&definitions, &out, &config).is_err());
        assert!(!dir.path().join("escaped").exists());
        assert!(!out.exists());
    }
}
