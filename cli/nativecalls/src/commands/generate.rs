//! `nativecalls generate` and `nativecalls exports`.

use std::path::Path;

use anyhow::{Context, Result};
use nativecalls_codegen::{generate_exports, generate_from_file, load_definitions, GeneratorConfig};

/// Generate every binding file, the reference file and the export list.
///
/// Prints the generated paths one per line, or the full report as JSON.
pub fn run(input: &Path, out_dir: &Path, config: &GeneratorConfig, json: bool) -> Result<()> {
    let report = generate_from_file(input, out_dir, config)
        .with_context(|| format!("generating native calls from {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for path in report.paths() {
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Generate only the linker export list.
pub fn exports(input: &Path, out_dir: &Path, config: &GeneratorConfig) -> Result<()> {
    let definitions = load_definitions(input, config.allow_duplicates)
        .with_context(|| format!("reading definitions from {}", input.display()))?;
    let file = generate_exports(&definitions, out_dir, config)
        .with_context(|| format!("writing export list to {}", out_dir.display()))?;
    println!("{}", file.path.display());
    Ok(())
}
