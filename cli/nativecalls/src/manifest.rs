//! `nativecalls.toml` parsing and generator configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nativecalls_codegen::{ExportStyle, GeneratorConfig, LineEnding};
use nativecalls_targets::parse::{load_catalog_toml, select_platforms};
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "nativecalls.toml";

/// The top-level manifest. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub targets: TargetsConfig,
}

/// Names and formats of the generated files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Namespace of the generated class; dotted names allowed.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Name of the generated static class.
    #[serde(default)]
    pub class: Option<String>,
    /// Prefix of `<prefix>.<platform>.cs` and `<prefix>.ref.cs`.
    #[serde(default)]
    pub file_prefix: Option<String>,
    /// Conditional-compilation symbol of the reference build.
    #[serde(default)]
    pub reference_symbol: Option<String>,
    /// File name of the linker export list.
    #[serde(default)]
    pub export_file: Option<String>,
    /// `plain` or `msvc`.
    #[serde(default)]
    pub export_style: Option<ExportStyle>,
    /// `lf` or `crlf`.
    #[serde(default)]
    pub line_ending: Option<LineEnding>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LibraryConfig {
    /// Native library stem (e.g., "bearssl").
    #[serde(default)]
    pub stem: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InputConfig {
    /// Keep repeated function names instead of failing.
    #[serde(default)]
    pub allow_duplicates: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetsConfig {
    /// Platform ids to generate; all catalog entries when absent.
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    /// Custom catalog file, relative to the manifest directory.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl Manifest {
    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing nativecalls.toml")
    }

    /// Load a manifest from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Search upward from `start_dir` for a `nativecalls.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                return Ok(Some((Self::load(&candidate)?, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Overlay the manifest on the default generator configuration.
    ///
    /// `base_dir` resolves a relative catalog path.
    pub fn to_generator_config(&self, base_dir: &Path) -> Result<GeneratorConfig> {
        let mut config = GeneratorConfig::default();
        let out = &self.output;

        if let Some(v) = &out.namespace {
            config.namespace = v.clone();
        }
        if let Some(v) = &out.class {
            config.class_name = v.clone();
        }
        if let Some(v) = &out.file_prefix {
            config.file_prefix = v.clone();
        }
        if let Some(v) = &out.reference_symbol {
            config.reference_symbol = v.clone();
        }
        if let Some(v) = &out.export_file {
            config.export_file = v.clone();
        }
        if let Some(v) = out.export_style {
            config.export_style = v;
        }
        if let Some(v) = out.line_ending {
            config.line_ending = v;
        }
        if let Some(v) = &self.library.stem {
            config.library_stem = v.clone();
        }
        if let Some(v) = self.input.allow_duplicates {
            config.allow_duplicates = v;
        }

        if let Some(catalog) = &self.targets.catalog {
            let path = base_dir.join(catalog);
            config.platforms =
                load_catalog_toml(&path).with_context(|| format!("loading catalog {}", path.display()))?;
        }
        if let Some(ids) = &self.targets.platforms {
            config.platforms = select_platforms(&config.platforms, ids)?;
        }
        config.validate()?;

        tracing::debug!(
            platforms = config.platforms.len(),
            namespace = %config.namespace,
            "resolved generator configuration"
        );
        Ok(config)
    }
}
