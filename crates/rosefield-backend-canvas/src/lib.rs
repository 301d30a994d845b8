//! Rosefield Canvas Backend
//!
//! This crate turns a [`rosefield_spec::RoseConfig`] into animated frames of
//! layered polar rose curves. Rendering is deterministic: the same
//! configuration and frame index always produce the same draw calls, and the
//! software rasterizer turns those into the same pixels.
//!
//! # Pipeline
//!
//! - **Oscillators**: periodic waves sweep each animatable quantity between a
//!   minimum and maximum, optionally with a meta oscillator driving the speed
//! - **Frame resolution**: the config and clock resolve into a [`FrameState`]
//! - **Synthesis**: every shape and layer slot is stroked as a closed rose
//!   curve onto a [`DrawSurface`], with connectors between adjacent layers
//! - **Driver**: [`Driver`] schedules frames over a [`FrameHost`] and threads
//!   the clock and rotation between them
//! - **Export**: [`RasterSurface`] pixels go out as PNG or animated GIF
//!
//! # Example
//!
//! ```
//! use rosefield_backend_canvas::{Animator, CommandRecorder, Viewport};
//! use rosefield_spec::RoseConfig;
//!
//! let mut animator = Animator::new(RoseConfig::default());
//! let mut recorder = CommandRecorder::new();
//! let report = animator
//!     .render_frame(Some(&mut recorder), Viewport::new(400, 400))
//!     .unwrap();
//!
//! assert_eq!(report.frame, 0);
//! assert!(recorder.stroke_count() > 0);
//! ```

pub mod color;
pub mod driver;
pub mod error;
pub mod frame;
pub mod gif;
pub mod oscillator;
pub mod palette;
pub mod png;
pub mod raster;
pub mod still;
pub mod surface;
pub mod synth;
pub mod wave;

pub use color::{Color, Hsla};
pub use driver::{
    AnimationState, Animator, Driver, DriverError, FrameHandle, FrameHost, FrameReport,
    HeadlessHost, LoopControl, TickOutcome, Viewport, CLOCK_STEP, ROTATION_STEP,
};
pub use error::ExportError;
pub use frame::{resolve_frame, FrameState};
pub use gif::GifWriter;
pub use png::PngConfig;
pub use raster::{PixelBuffer, RasterSurface};
pub use still::{render_still, Still};
pub use surface::{CommandRecorder, DrawCommand, DrawSurface};
pub use synth::{synthesize, Point, SynthStats};
