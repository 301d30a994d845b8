//! Init command implementation
//!
//! Writes a starter configuration file, either the defaults or a seeded
//! random configuration.

use anyhow::{Context, Result};
use colored::Colorize;
use rosefield_spec::RoseConfig;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

/// Run the init command
///
/// # Arguments
/// * `out` - Path of the configuration file to write
/// * `seed` - Seed for a random configuration; `None` writes the defaults
/// * `force` - Overwrite an existing file
pub fn run(out: &str, seed: Option<u64>, force: bool) -> Result<ExitCode> {
    let path = Path::new(out);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", out);
    }

    let config = match seed {
        Some(seed) => RoseConfig::random(seed),
        None => RoseConfig::default(),
    };
    let json = config
        .to_json_pretty()
        .context("Failed to serialize config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write config file: {}", out))?;
    info!(path = out, seed = ?seed, "wrote config");

    match seed {
        Some(seed) => println!(
            "{} {} (random, seed {})",
            "Created:".green().bold(),
            out,
            seed
        ),
        None => println!("{} {}", "Created:".green().bold(), out),
    }
    Ok(ExitCode::SUCCESS)
}
