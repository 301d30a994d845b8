//! Trace command implementation
//!
//! Dumps one frame's resolved parameters and every drawing call it makes as
//! JSON, for inspecting what the synthesizer does at a given clock.

use anyhow::{Context, Result};
use rosefield_backend_canvas::{Animator, CommandRecorder};
use std::process::ExitCode;

use super::json_output::TraceOutput;
use super::{load_checked, viewport};

/// Builds the trace for frame `frame` of a fresh session.
pub fn trace_frame(
    config: rosefield_spec::RoseConfig,
    frame: u64,
    width: u32,
    height: u32,
) -> Result<TraceOutput> {
    let viewport = viewport(width, height)?;
    let mut animator = Animator::new(config);
    animator.skip_frames(frame);

    let mut recorder = CommandRecorder::new();
    let report = animator.render_onto(&mut recorder, viewport);
    Ok(TraceOutput {
        report,
        commands: recorder.into_commands(),
    })
}

/// Run the trace command
pub fn run(
    config_path: &str,
    frame: u64,
    width: u32,
    height: u32,
    out: Option<&str>,
) -> Result<ExitCode> {
    let config = load_checked(config_path)?;
    let trace = trace_frame(config, frame, width, height)?;
    let json = serde_json::to_string_pretty(&trace).context("Failed to serialize trace")?;

    match out {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write trace: {}", path))?,
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}
