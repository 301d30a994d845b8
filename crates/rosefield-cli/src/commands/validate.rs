//! Validate command implementation
//!
//! Checks a configuration file and reports errors and warnings.

use anyhow::{Context, Result};
use colored::Colorize;
use rosefield_spec::{validate_config, ValidationResult};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use super::json_output::{
    config_error_to_json, validation_error_to_json, validation_warning_to_json, ValidateOutput,
};
use crate::input::{load_config, LoadResult};

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config_path)
    } else {
        run_human(config_path)
    }
}

fn run_human(config_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), config_path);

    let LoadResult {
        config,
        source_hash,
    } = load_config(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    println!("{} {}", "Source:".dimmed(), &source_hash[..16]);

    let result = validate_config(&config);
    debug!(errors = result.errors.len(), warnings = result.warnings.len(), "validated config");
    print_validation_results(&result);

    if result.is_ok() {
        println!("\n{} Config is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Config has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(config_path: &str) -> Result<ExitCode> {
    let output = match load_config(Path::new(config_path)) {
        Ok(LoadResult {
            config,
            source_hash,
        }) => {
            let result = validate_config(&config);
            ValidateOutput {
                success: result.is_ok(),
                errors: result.errors.iter().map(validation_error_to_json).collect(),
                warnings: result.warnings.iter().map(validation_warning_to_json).collect(),
                source_hash: Some(source_hash),
            }
        }
        Err(e) => ValidateOutput {
            success: false,
            errors: vec![config_error_to_json(&e, config_path)],
            warnings: Vec::new(),
            source_hash: None,
        },
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Print validation results to the console
fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
