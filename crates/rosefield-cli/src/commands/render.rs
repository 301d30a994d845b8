//! Render command implementation
//!
//! Renders a run of frames to numbered PNG files and reports each file's
//! BLAKE3 hash. Identical configs and frame indices give identical hashes.

use anyhow::{Context, Result};
use colored::Colorize;
use rosefield_backend_canvas::png::{write_rgba_to_vec_with_hash, PngConfig};
use rosefield_backend_canvas::{Animator, RasterSurface};
use rosefield_spec::{validate_config, RoseConfig};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

use super::json_output::{
    config_error_to_json, validation_error_to_json, validation_warning_to_json, JsonError,
    JsonWarning, RenderOutput, RenderedFrame,
};
use super::{load_checked, viewport};
use crate::input::load_config;

/// Frame selection and output size for `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub frames: u32,
    pub start_frame: u64,
    pub width: u32,
    pub height: u32,
}

/// File name for frame `index`.
pub fn frame_file_name(index: u64) -> String {
    format!("frame_{:05}.png", index)
}

/// Run the render command
pub fn run(
    config_path: &str,
    out_dir: &str,
    options: RenderOptions,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let (config, warnings) = if json_output {
        match load_for_json(config_path) {
            Ok(loaded) => loaded,
            Err(errors) => {
                print_json(&RenderOutput {
                    success: false,
                    frames: Vec::new(),
                    errors,
                    warnings: Vec::new(),
                })?;
                return Ok(ExitCode::from(1));
            }
        }
    } else {
        (load_checked(config_path)?, Vec::new())
    };
    let viewport = viewport(options.width, options.height)?;

    let out_dir = Path::new(out_dir);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    if !json_output {
        println!(
            "{} {} frame(s) from {} at {}x{}",
            "Rendering:".cyan().bold(),
            options.frames,
            config_path,
            options.width,
            options.height
        );
    }

    let mut animator = Animator::new(config);
    animator.skip_frames(options.start_frame);
    let png_config = PngConfig::default();
    let mut surface = RasterSurface::new(viewport.width, viewport.height);
    let mut written = Vec::with_capacity(options.frames as usize);

    for _ in 0..options.frames {
        let report = animator.render_onto(&mut surface, viewport);
        let (data, hash) = write_rgba_to_vec_with_hash(surface.buffer(), &png_config)
            .with_context(|| format!("Failed to encode frame {}", report.frame))?;

        let path = out_dir.join(frame_file_name(report.frame));
        std::fs::write(&path, &data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(frame = report.frame, hash = %hash, "wrote frame");

        if !json_output {
            println!(
                "  {} {} {}",
                "+".green(),
                path.display(),
                hash[..16].dimmed()
            );
        }
        written.push(RenderedFrame {
            frame: report.frame,
            path: path.to_string_lossy().into_owned(),
            hash,
        });
    }

    if json_output {
        print_json(&RenderOutput {
            success: true,
            frames: written,
            errors: Vec::new(),
            warnings,
        })?;
    } else {
        println!(
            "\n{} Wrote {} frame(s) ({}ms)",
            "SUCCESS".green().bold(),
            written.len(),
            start.elapsed().as_millis()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Loads and validates a config, collecting failures as JSON errors.
fn load_for_json(
    config_path: &str,
) -> std::result::Result<(RoseConfig, Vec<JsonWarning>), Vec<JsonError>> {
    let loaded = load_config(Path::new(config_path))
        .map_err(|e| vec![config_error_to_json(&e, config_path)])?;

    let result = validate_config(&loaded.config);
    if !result.is_ok() {
        return Err(result.errors.iter().map(validation_error_to_json).collect());
    }
    let warnings = result.warnings.iter().map(validation_warning_to_json).collect();
    Ok((loaded.config, warnings))
}

fn print_json(output: &RenderOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
