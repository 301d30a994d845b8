//! Offscreen rendering of single frames.

use rosefield_spec::RoseConfig;

use crate::color::Color;
use crate::driver::{Animator, FrameReport, Viewport};
use crate::raster::{PixelBuffer, RasterSurface};

/// A rendered frame's pixels and report.
#[derive(Debug, Clone)]
pub struct Still {
    pub buffer: PixelBuffer,
    pub report: FrameReport,
}

/// Renders frame number `frame` of a session that starts at a zero clock.
pub fn render_still(config: &RoseConfig, viewport: Viewport, frame: u64, background: Color) -> Still {
    let mut animator = Animator::new(config.clone());
    animator.skip_frames(frame);
    let mut surface = RasterSurface::with_background(viewport.width, viewport.height, background);
    let report = animator.render_onto(&mut surface, viewport);
    Still {
        buffer: surface.into_buffer(),
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_matches_animated_frame() {
        let config = RoseConfig::default();
        let viewport = Viewport::new(64, 64);
        let still = render_still(&config, viewport, 3, Color::black());

        let mut animator = Animator::new(config);
        let mut surface = RasterSurface::new(64, 64);
        let mut report = animator.render_onto(&mut surface, viewport);
        for _ in 0..3 {
            report = animator.render_onto(&mut surface, viewport);
        }

        assert_eq!(still.report, report);
        assert_eq!(still.buffer.data, surface.buffer().data);
    }

    #[test]
    fn test_still_draws_something() {
        let still = render_still(&RoseConfig::default(), Viewport::new(320, 320), 0, Color::black());
        assert!(still.buffer.data.iter().any(|c| *c != Color::black()));
    }
}
