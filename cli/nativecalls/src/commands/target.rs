//! `nativecalls target`: platform listing and description.

use anyhow::{bail, Result};
use nativecalls_codegen::GeneratorConfig;
use nativecalls_targets::find_platform;
use nativecalls_targets::parse::catalog_to_toml;

/// List the configured platforms in generation order.
pub fn list(config: &GeneratorConfig) -> Result<()> {
    if config.platforms.is_empty() {
        println!("No platforms configured; only the reference file will be generated.");
        return Ok(());
    }

    println!("Platforms:");
    println!();
    for p in &config.platforms {
        println!(
            "  {:<12} {:<12} {}",
            p.id,
            p.conditional_symbol(),
            p.library_file_name(&config.library_stem)
        );
    }
    println!();
    println!("Use 'nativecalls target describe <id>' for details.");
    Ok(())
}

/// Describe one platform, as text or as a TOML catalog entry.
pub fn describe(id: &str, config: &GeneratorConfig, format: Option<&str>) -> Result<()> {
    let platform = match find_platform(&config.platforms, id) {
        Ok(p) => p,
        Err(_) => bail!("unknown target: '{id}'. Use 'nativecalls target list' to see available targets."),
    };

    match format {
        Some("toml") => {
            print!("{}", catalog_to_toml(std::slice::from_ref(platform))?);
        }
        Some(other) => bail!("unknown format '{other}' (expected 'toml')"),
        None => {
            println!("=== Platform: {} ===", platform.id);
            println!("  Name:        {}", platform.class_name);
            println!("  Family:      {} ({})", platform.family, platform.family.id);
            println!("  Arch:        {}", platform.arch());
            println!("  Symbol:      {}", platform.conditional_symbol());
            println!("  Library:     {}", platform.library_file_name(&config.library_stem));
            println!("  Output file: {}", config.binding_file_name(platform));
        }
    }
    Ok(())
}
