//! Replays touch scripts against a simulated tracked scene
//!
//! Usage:
//!   ar-demo                          # Built-in tabletop walkthrough
//!   ar-demo --script drag.toml       # Custom touch script
//!   ar-demo --config tuning.toml -v  # Custom thresholds, debug logging
//!
//! Without `--config`, `config.toml` in the platform config directory is
//! used when it exists.

mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ar_interaction_core::InteractionConfig;
use clap::Parser;
use directories::ProjectDirs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::script::Script;

#[derive(Parser)]
#[command(name = "ar-demo")]
#[command(about = "Drive the AR interaction coordinator from a touch script")]
struct Cli {
    /// Interaction settings (TOML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Touch script (TOML); defaults to the built-in tabletop walkthrough
    #[arg(long, short)]
    script: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let script = match &cli.script {
        Some(path) => Script::from_file(path)?,
        None => Script::builtin()?,
    };

    script::run(&script, &config)?;
    Ok(())
}

/// `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<InteractionConfig> {
    if let Some(path) = explicit {
        return InteractionConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Using config {}", path.display());
            InteractionConfig::from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        _ => {
            debug!("No config file found, using defaults");
            Ok(InteractionConfig::default())
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ar-demo")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
