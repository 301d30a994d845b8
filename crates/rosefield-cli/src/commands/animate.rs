//! Animate command implementation
//!
//! Renders consecutive frames into a looping GIF.

use anyhow::{Context, Result};
use colored::Colorize;
use rosefield_backend_canvas::{Animator, GifWriter, RasterSurface};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

use super::{load_checked, viewport};

/// Frame count, playback rate and size for `animate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimateOptions {
    pub frames: u32,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

/// Run the animate command
pub fn run(config_path: &str, out: &str, options: AnimateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let config = load_checked(config_path)?;
    let viewport = viewport(options.width, options.height)?;
    if options.frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }

    println!(
        "{} {} frame(s) at {} fps -> {}",
        "Animating:".cyan().bold(),
        options.frames,
        options.fps,
        out
    );

    let path = Path::new(out);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", out))?;
    let mut gif = GifWriter::new(BufWriter::new(file), viewport.width, viewport.height, options.fps)
        .context("Failed to start GIF")?;

    let mut animator = Animator::new(config);
    let mut surface = RasterSurface::new(viewport.width, viewport.height);
    for _ in 0..options.frames {
        let report = animator.render_onto(&mut surface, viewport);
        gif.write_frame(surface.buffer())
            .with_context(|| format!("Failed to encode frame {}", report.frame))?;
        debug!(frame = report.frame, "encoded gif frame");
    }

    let frames = gif.frame_count();
    let mut writer = gif.finish().context("Failed to finish GIF")?;
    writer.flush().with_context(|| format!("Failed to write {}", out))?;

    println!(
        "\n{} Wrote {} frame(s) to {} ({}ms)",
        "SUCCESS".green().bold(),
        frames,
        out,
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}
