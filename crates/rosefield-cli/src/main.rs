//! Rosefield CLI - render animated layered rose curves
//!
//! This binary provides commands for writing, validating, and rendering
//! Rosefield configurations.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use rosefield_cli::commands;
use rosefield_cli::commands::animate::AnimateOptions;
use rosefield_cli::commands::live::LiveOptions;
use rosefield_cli::commands::render::RenderOptions;

/// Rosefield - animated polar rose curves
#[derive(Parser)]
#[command(name = "rosefield")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file
    Validate {
        /// Path to the config file (JSON)
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write a starter config file
    Init {
        /// Output file path
        #[arg(short, long)]
        out: String,

        /// Write a random config instead of the defaults
        #[arg(long)]
        random: bool,

        /// Seed for --random (default: 0)
        #[arg(long, requires = "random")]
        seed: Option<u64>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Render frames to numbered PNG files
    Render {
        /// Path to the config file (JSON)
        #[arg(short, long)]
        config: String,

        /// Output directory
        #[arg(long)]
        out_dir: String,

        /// Number of frames to render
        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Index of the first frame
        #[arg(long, default_value_t = 0)]
        start_frame: u64,

        /// Frame width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render frames into a looping GIF
    Animate {
        /// Path to the config file (JSON)
        #[arg(short, long)]
        config: String,

        /// Output GIF path
        #[arg(short, long)]
        out: String,

        /// Number of frames
        #[arg(long, default_value_t = 120)]
        frames: u32,

        /// Playback rate
        #[arg(long, default_value_t = 30.0)]
        fps: f64,

        /// Frame width in pixels
        #[arg(long, default_value_t = 400)]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value_t = 400)]
        height: u32,
    },

    /// Dump one frame's resolved state and draw calls as JSON
    Trace {
        /// Path to the config file (JSON)
        #[arg(short, long)]
        config: String,

        /// Frame index to trace
        #[arg(long, default_value_t = 0)]
        frame: u64,

        /// Frame width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Run the animation loop, rewriting a preview PNG each frame
    Live {
        /// Path to the config file (JSON); edits are picked up while running
        #[arg(short, long)]
        config: String,

        /// Preview PNG path
        #[arg(short, long)]
        out: String,

        /// Target frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Frames to render (0 = until interrupted)
        #[arg(long, default_value_t = 0)]
        frames: u64,

        /// Frame width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Frame height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,
    },
}

fn parse_level(name: &str) -> Level {
    match name {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {}", e);
    }

    let result = match cli.command {
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Init {
            out,
            random,
            seed,
            force,
        } => {
            let seed = random.then(|| seed.unwrap_or(0));
            commands::init::run(&out, seed, force)
        }
        Commands::Render {
            config,
            out_dir,
            frames,
            start_frame,
            width,
            height,
            json,
        } => commands::render::run(
            &config,
            &out_dir,
            RenderOptions {
                frames,
                start_frame,
                width,
                height,
            },
            json,
        ),
        Commands::Animate {
            config,
            out,
            frames,
            fps,
            width,
            height,
        } => commands::animate::run(
            &config,
            &out,
            AnimateOptions {
                frames,
                fps,
                width,
                height,
            },
        ),
        Commands::Trace {
            config,
            frame,
            width,
            height,
            out,
        } => commands::trace::run(&config, frame, width, height, out.as_deref()),
        Commands::Live {
            config,
            out,
            fps,
            frames,
            width,
            height,
        } => commands::live::run(
            &config,
            &out,
            LiveOptions {
                fps,
                frames,
                width,
                height,
            },
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from(["rosefield", "validate", "--config", "rose.json"]).unwrap();
        match cli.command {
            Commands::Validate { config, json } => {
                assert_eq!(config, "rose.json");
                assert!(!json);
            }
            _ => panic!("expected validate command"),
        }
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_cli_parses_global_log_level() {
        let cli = Cli::try_parse_from([
            "rosefield",
            "validate",
            "-c",
            "rose.json",
            "--json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, "debug");
        assert_eq!(parse_level(&cli.log_level), Level::DEBUG);
    }

    #[test]
    fn test_cli_parses_init_random() {
        let cli = Cli::try_parse_from([
            "rosefield", "init", "--out", "rose.json", "--random", "--seed", "42",
        ])
        .unwrap();
        match cli.command {
            Commands::Init {
                out,
                random,
                seed,
                force,
            } => {
                assert_eq!(out, "rose.json");
                assert!(random);
                assert_eq!(seed, Some(42));
                assert!(!force);
            }
            _ => panic!("expected init command"),
        }
    }

    #[test]
    fn test_cli_rejects_seed_without_random() {
        assert!(Cli::try_parse_from(["rosefield", "init", "--out", "a.json", "--seed", "1"]).is_err());
    }

    #[test]
    fn test_cli_parses_render_defaults() {
        let cli = Cli::try_parse_from([
            "rosefield", "render", "--config", "rose.json", "--out-dir", "frames",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                frames,
                start_frame,
                width,
                height,
                json,
                ..
            } => {
                assert_eq!(frames, 1);
                assert_eq!(start_frame, 0);
                assert_eq!((width, height), (800, 800));
                assert!(!json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_animate() {
        let cli = Cli::try_parse_from([
            "rosefield", "animate", "-c", "rose.json", "-o", "rose.gif", "--frames", "60", "--fps",
            "24",
        ])
        .unwrap();
        match cli.command {
            Commands::Animate {
                out, frames, fps, ..
            } => {
                assert_eq!(out, "rose.gif");
                assert_eq!(frames, 60);
                assert_eq!(fps, 24.0);
            }
            _ => panic!("expected animate command"),
        }
    }

    #[test]
    fn test_cli_parses_trace_and_live() {
        let cli = Cli::try_parse_from([
            "rosefield", "trace", "-c", "rose.json", "--frame", "12",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Trace {
                frame: 12,
                out: None,
                ..
            }
        ));

        let cli = Cli::try_parse_from([
            "rosefield", "live", "-c", "rose.json", "-o", "preview.png",
        ])
        .unwrap();
        match cli.command {
            Commands::Live { fps, frames, .. } => {
                assert_eq!(fps, 60.0);
                assert_eq!(frames, 0);
            }
            _ => panic!("expected live command"),
        }
    }

    #[test]
    fn test_parse_level_falls_back_to_warn() {
        assert_eq!(parse_level("verbose"), Level::WARN);
        assert_eq!(parse_level("trace"), Level::TRACE);
    }
}
