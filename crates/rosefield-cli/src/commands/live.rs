//! Live command implementation
//!
//! Runs the paced animation loop and rewrites a preview PNG every frame.
//! The config file acts as the control surface: when it changes on disk it
//! is reloaded and the next frame picks it up without resetting the clock.

use anyhow::{Context, Result};
use colored::Colorize;
use rosefield_backend_canvas::png::{write_rgba, PngConfig};
use rosefield_backend_canvas::{Driver, HeadlessHost, PixelBuffer, RasterSurface, TickOutcome};
use rosefield_spec::{validate_config, RoseConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::SystemTime;
use tracing::{debug, info, warn};

use super::{load_checked, viewport};
use crate::input::load_config;

/// Pacing, budget and size for `live`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveOptions {
    pub fps: f64,
    /// Frames to render; 0 runs until interrupted.
    pub frames: u64,
    pub width: u32,
    pub height: u32,
}

/// Reloads a config file when its modification time changes.
#[derive(Debug)]
pub struct ConfigWatcher {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl ConfigWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let modified = modified_time(&path);
        Self { path, modified }
    }

    /// Returns the new config if the file changed and still validates.
    pub fn poll(&mut self) -> Option<RoseConfig> {
        let modified = modified_time(&self.path);
        if modified.is_none() || modified == self.modified {
            return None;
        }
        self.modified = modified;

        let loaded = match load_config(&self.path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable config change");
                return None;
            }
        };
        let result = validate_config(&loaded.config);
        if let Some(error) = result.errors.first() {
            warn!(path = %self.path.display(), %error, "ignoring invalid config change");
            return None;
        }
        Some(loaded.config)
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Replaces `out` with the frame, via a temporary file so readers never see
/// a partial image.
fn write_preview(buffer: &PixelBuffer, out: &Path, config: &PngConfig) -> Result<()> {
    let tmp = out.with_extension("png.tmp");
    write_rgba(buffer, &tmp, config)
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, out).with_context(|| format!("Failed to replace {}", out.display()))?;
    Ok(())
}

/// Run the live command
pub fn run(config_path: &str, out: &str, options: LiveOptions) -> Result<ExitCode> {
    let config = load_checked(config_path)?;
    let viewport = viewport(options.width, options.height)?;
    let out = Path::new(out);

    let mut host = HeadlessHost::new(RasterSurface::new(viewport.width, viewport.height), viewport)
        .with_pacing(options.fps);
    if options.frames > 0 {
        host = host.with_frame_limit(options.frames);
    }
    let mut driver = Driver::new(host, config);
    let mut watcher = ConfigWatcher::new(config_path);

    println!(
        "{} {} at {} fps -> {}",
        "Live:".cyan().bold(),
        config_path,
        options.fps,
        out.display()
    );

    driver.start()?;
    let result = drive(&mut driver, &mut watcher, out);
    driver.stop();
    let rendered = result?;

    println!("\n{} Rendered {} frame(s)", "DONE".green().bold(), rendered);
    Ok(ExitCode::SUCCESS)
}

fn drive(
    driver: &mut Driver<HeadlessHost<RasterSurface>>,
    watcher: &mut ConfigWatcher,
    out: &Path,
) -> Result<u64> {
    let png_config = PngConfig::fast();
    let mut rendered = 0;

    loop {
        if let Some(config) = watcher.poll() {
            info!("config changed, applying on next frame");
            driver.animator_mut().apply_config(config);
        }

        match driver.tick() {
            TickOutcome::Rendered(report) => {
                if let Some(surface) = driver.host().surface_ref() {
                    write_preview(surface.buffer(), out, &png_config)?;
                }
                debug!(frame = report.frame, clock = report.clock, "preview updated");
                rendered += 1;
            }
            TickOutcome::Skipped => {}
            TickOutcome::Exhausted | TickOutcome::NotRunning => break,
        }
    }

    Ok(rendered)
}
