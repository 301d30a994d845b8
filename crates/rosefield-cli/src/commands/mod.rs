//! CLI command implementations

pub mod animate;
pub mod init;
pub mod json_output;
pub mod live;
pub mod render;
pub mod trace;
pub mod validate;

use anyhow::{Context, Result};
use colored::Colorize;
use rosefield_backend_canvas::Viewport;
use rosefield_spec::{validate_config, RoseConfig};
use std::path::Path;

use crate::input::load_config;

/// Loads a configuration and refuses to continue if it has validation errors.
///
/// Warnings are printed and do not stop the command.
pub(crate) fn load_checked(config_path: &str) -> Result<RoseConfig> {
    let loaded = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;

    let result = validate_config(&loaded.config);
    for warning in &result.warnings {
        eprintln!("  {} [{}] {}", "!".yellow(), warning.code.to_string().yellow(), warning.message);
    }
    if let Some(error) = result.errors.first() {
        anyhow::bail!(
            "{} has {} validation error(s), first: {}",
            config_path,
            result.errors.len(),
            error
        );
    }

    Ok(loaded.config)
}

/// Builds a viewport, rejecting zero sizes.
pub(crate) fn viewport(width: u32, height: u32) -> Result<Viewport> {
    if width == 0 || height == 0 {
        anyhow::bail!("viewport must be at least 1x1, got {}x{}", width, height);
    }
    Ok(Viewport::new(width, height))
}
