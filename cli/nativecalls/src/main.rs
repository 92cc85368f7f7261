//! nativecalls CLI: generates P/Invoke bindings from a list of C prototypes.

mod commands;
mod logging;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use nativecalls_codegen::GeneratorConfig;

use manifest::Manifest;

#[derive(Parser)]
#[command(name = "nativecalls", version, about = "Native call binding generator")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file (default: nearest nativecalls.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate bindings, reference stubs and the export list
    Generate {
        /// Prototypes file, one declaration per line
        input: PathBuf,
        /// Output directory (created if absent)
        out_dir: PathBuf,
        /// Print the generation report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate only the linker export list
    Exports {
        /// Prototypes file, one declaration per line
        input: PathBuf,
        /// Output directory (created if absent)
        out_dir: PathBuf,
    },
    /// Validate a prototypes file without writing output
    Check {
        /// Prototypes file, one declaration per line
        input: PathBuf,
    },
    /// Inspect target platforms
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List configured target platforms
    List,
    /// Show details of a target platform
    Describe {
        /// Platform id (e.g., win-x64)
        id: String,
        /// Output format (default: human-readable, "toml" for a catalog entry)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Generate { input, out_dir, json } => commands::generate::run(&input, &out_dir, &config, json),
        Commands::Exports { input, out_dir } => commands::generate::exports(&input, &out_dir, &config),
        Commands::Check { input } => commands::check::run(&input, &config).map(|_| ()),
        Commands::Target { action } => match action {
            TargetAction::List => commands::target::list(&config),
            TargetAction::Describe { id, format } => commands::target::describe(&id, &config, format.as_deref()),
        },
    }
}

/// Resolve the generator configuration.
///
/// An explicit `--config` file must exist; otherwise the nearest
/// `nativecalls.toml` above `cwd` is used, falling back to the defaults.
fn load_config(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<GeneratorConfig> {
    match explicit {
        Some(path) => {
            let manifest = Manifest::load(path)?;
            let base_dir = path.parent().unwrap_or(cwd);
            manifest
                .to_generator_config(base_dir)
                .with_context(|| format!("applying {}", path.display()))
        }
        None => match Manifest::find_and_load(cwd)? {
            Some((manifest, dir)) => {
                tracing::debug!(dir = %dir.display(), "using {}", manifest::MANIFEST_FILE);
                manifest.to_generator_config(&dir)
            }
            None => Ok(GeneratorConfig::default()),
        },
    }
}
