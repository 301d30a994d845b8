//! Drawing-surface abstraction.
//!
//! The synthesizer only talks to a [`DrawSurface`], which mirrors the subset
//! of a 2D canvas context it needs. [`CommandRecorder`] captures the calls
//! as data; [`crate::raster::RasterSurface`] turns them into pixels.

use serde::{Deserialize, Serialize};

use crate::color::Hsla;

/// 2D drawing target for one frame's path and stroke operations.
pub trait DrawSurface {
    /// Clears a rectangle to the surface background.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Sets the color and line width used by the next [`stroke`](Self::stroke).
    fn set_stroke_style(&mut self, color: Hsla, width: f64);
    /// Discards the current path.
    fn begin_path(&mut self);
    /// Starts a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);
    /// Extends the current subpath with a straight segment.
    fn line_to(&mut self, x: f64, y: f64);
    /// Closes the current subpath back to its first point.
    fn close_path(&mut self);
    /// Strokes the current path with the current style.
    fn stroke(&mut self);
    /// Resizes the drawing target to the viewport.
    fn resize(&mut self, width: u32, height: u32);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    SetStrokeStyle { color: Hsla, width: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Stroke,
    Resize { width: u32, height: u32 },
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Consumes the recorder, returning its commands.
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Number of `stroke` calls recorded.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count()
    }

    /// The stroke styles set, in order.
    pub fn stroke_styles(&self) -> Vec<(Hsla, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetStrokeStyle { color, width } => Some((*color, *width)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for CommandRecorder {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_stroke_style(&mut self, color: Hsla, width: f64) {
        self.commands.push(DrawCommand::SetStrokeStyle { color, width });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }
}
