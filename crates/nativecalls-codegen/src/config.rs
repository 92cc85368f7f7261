//! Generator settings.
//!
//! The defaults reproduce the BearSSL.NET layout: namespace `BearSSL`,
//! class `NativeCalls`, libraries named `bearssl.<os>.<arch>.<ext>` and the
//! full built-in platform catalog.

use nativecalls_targets::{builtin_catalog, PlatformDescriptor};
use serde::{Deserialize, Serialize};

use crate::definition::is_ident;
use crate::writer::LineEnding;

/// A generator setting that would produce uncompilable source or write
/// outside the output directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The value is emitted as C# source and must be an identifier
    /// (dot-separated identifiers for `namespace`).
    #[error("{key} '{value}' is not a valid identifier")]
    InvalidSymbol {
        /// Setting name as spelled in the manifest.
        key: &'static str,
        value: String,
    },

    /// The value names an output file and must be a single path component.
    #[error("{key} '{value}' must be a plain file name")]
    InvalidFileName {
        /// Setting name as spelled in the manifest.
        key: &'static str,
        value: String,
    },
}

/// Shape of each line in the export list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    /// `export <name>`
    #[default]
    Plain,
    /// `/link /export:<name>` (MSVC linker command line)
    Msvc,
}

impl ExportStyle {
    /// The export line for one symbol.
    pub fn directive(self, name: &str) -> String {
        match self {
            ExportStyle::Plain => format!("export {name}"),
            ExportStyle::Msvc => format!("/link /export:{name}"),
        }
    }
}

/// Everything a generation run needs besides the definitions themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Namespace wrapping the generated class.
    pub namespace: String,
    /// Name of the generated static class.
    pub class_name: String,
    /// Prefix of generated source file names.
    pub file_prefix: String,
    /// Symbol selecting the reference (stub) variant.
    pub reference_symbol: String,
    /// File name of the linker export list.
    pub export_file: String,
    /// Directive format of the export list.
    pub export_style: ExportStyle,
    /// Line terminator of every generated file.
    pub line_ending: LineEnding,
    /// Stem of the native library file name.
    pub library_stem: String,
    /// Keep duplicate symbol names instead of rejecting the input.
    pub allow_duplicates: bool,
    /// Platforms to emit bindings for, in emission order.
    pub platforms: Vec<PlatformDescriptor>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: "BearSSL".into(),
            class_name: "NativeCalls".into(),
            file_prefix: "NativeCalls".into(),
            reference_symbol: "REFERENCE_ASSEMBLY".into(),
            export_file: "linkcommands".into(),
            export_style: ExportStyle::Plain,
            line_ending: LineEnding::Lf,
            library_stem: "bearssl".into(),
            allow_duplicates: false,
            platforms: builtin_catalog().to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// `<prefix>.<platform id>.cs`
    pub fn binding_file_name(&self, platform: &PlatformDescriptor) -> String {
        format!("{}.{}.cs", self.file_prefix, platform.id)
    }

    /// `<prefix>.ref.cs`
    pub fn reference_file_name(&self) -> String {
        format!("{}.ref.cs", self.file_prefix)
    }

    /// Check the settings that are pasted into generated source or joined
    /// onto the output directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.namespace.split('.').all(is_ident) {
            return Err(ConfigError::InvalidSymbol {
                key: "namespace",
                value: self.namespace.clone(),
            });
        }
        for (key, value) in [("class", &self.class_name), ("reference-symbol", &self.reference_symbol)] {
            if !is_ident(value) {
                return Err(ConfigError::InvalidSymbol {
                    key,
                    value: value.clone(),
                });
            }
        }
        for (key, value) in [("file-prefix", &self.file_prefix), ("export-file", &self.export_file)] {
            if !is_file_name(value) {
                return Err(ConfigError::InvalidFileName {
                    key,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

fn is_file_name(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', ':', '\0'])
}
