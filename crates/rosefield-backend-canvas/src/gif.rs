//! Animated GIF export.

use std::io::Write;

use gif::{Encoder, Frame, Repeat};

use crate::error::ExportError;
use crate::raster::PixelBuffer;

/// Quantizer speed handed to the GIF encoder (1 is best, 30 is fastest).
const QUANTIZE_SPEED: i32 = 10;

/// Writes frames into a looping GIF.
pub struct GifWriter<W: Write> {
    encoder: Encoder<W>,
    width: u16,
    height: u16,
    delay: u16,
    frames: usize,
}

impl<W: Write> GifWriter<W> {
    /// Starts a GIF that loops forever at `fps`.
    pub fn new(writer: W, width: u32, height: u32, fps: f64) -> Result<Self, ExportError> {
        let (width, height) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => {
                return Err(ExportError::InvalidDimensions(format!(
                    "GIF frames must be 1..=65535 pixels per side, got {width}x{height}"
                )))
            }
        };

        let mut encoder = Encoder::new(writer, width, height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        Ok(Self {
            encoder,
            width,
            height,
            delay: frame_delay(fps),
            frames: 0,
        })
    }

    /// Appends one frame. It must match the GIF's dimensions.
    pub fn write_frame(&mut self, buffer: &PixelBuffer) -> Result<(), ExportError> {
        if buffer.width != u32::from(self.width) || buffer.height != u32::from(self.height) {
            return Err(ExportError::InvalidDimensions(format!(
                "frame is {}x{}, animation is {}x{}",
                buffer.width, buffer.height, self.width, self.height
            )));
        }

        let mut pixels = buffer.to_rgba8();
        let mut frame = Frame::from_rgba_speed(self.width, self.height, &mut pixels, QUANTIZE_SPEED);
        frame.delay = self.delay;
        self.encoder.write_frame(&frame)?;
        self.frames += 1;
        Ok(())
    }

    /// Frames written so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Finishes the file and returns the writer.
    pub fn finish(self) -> Result<W, ExportError> {
        Ok(self.encoder.into_inner()?)
    }
}

/// Per-frame delay in centiseconds for `fps`, at least 1.
pub fn frame_delay(fps: f64) -> u16 {
    if !fps.is_finite() || fps <= 0.0 {
        return 1;
    }
    (100.0 / fps).round().clamp(1.0, u16::MAX as f64) as u16
}
