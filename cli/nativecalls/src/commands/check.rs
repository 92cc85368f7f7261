//! `nativecalls check`: validate a prototypes file without writing anything.

use std::path::Path;

use anyhow::{Context, Result};
use nativecalls_codegen::{load_definitions, Definition, GeneratorConfig};

/// Parse and validate `input`, returning the definitions on success.
pub fn run(input: &Path, config: &GeneratorConfig) -> Result<Vec<Definition>> {
    let definitions = load_definitions(input, config.allow_duplicates)
        .with_context(|| format!("checking {}", input.display()))?;
    println!(
        "{}: {} definition(s), {} platform(s)",
        input.display(),
        definitions.len(),
        config.platforms.len()
    );
    Ok(definitions)
}
