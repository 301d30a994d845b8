//! Software rasterizer behind the [`DrawSurface`] trait.

use crate::color::{Color, Hsla};
use crate::surface::DrawSurface;

/// A 2D RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGBA, row-major).
    pub data: Vec<Color>,
}

impl PixelBuffer {
    /// Create a new buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[self.index(x, y)]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.data[idx] = color;
    }

    /// Composites `color` onto the pixel at `(x, y)`; out-of-bounds writes are dropped.
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: &Color, coverage: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.data[idx] = color.over(&self.data[idx], coverage);
    }

    /// Fills an axis-aligned rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return;
        }
        let x0 = x.max(0.0).floor() as u32;
        let y0 = y.max(0.0).floor() as u32;
        let x1 = ((x + width).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((y + height).ceil().max(0.0) as u32).min(self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.set(px, py, color);
            }
        }
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

#[derive(Debug, Clone, Default)]
struct Subpath {
    points: Vec<(f64, f64)>,
    closed: bool,
}

/// Rasterizes strokes into a [`PixelBuffer`] with antialiased lines.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    buffer: PixelBuffer,
    background: Color,
    stroke_color: Color,
    stroke_width: f64,
    path: Vec<Subpath>,
}

impl RasterSurface {
    /// Creates a surface cleared to opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Color::black())
    }

    /// Creates a surface whose `clear_rect` fills with `background`.
    pub fn with_background(width: u32, height: u32, background: Color) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height, background),
            background,
            stroke_color: Color::black(),
            stroke_width: 1.0,
            path: Vec::new(),
        }
    }

    /// The rendered pixels.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Consumes the surface, returning its pixels.
    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64)) {
        let finite = from.0.is_finite() && from.1.is_finite() && to.0.is_finite() && to.1.is_finite();
        if !finite || self.stroke_width <= 0.0 {
            return;
        }

        // Thin lines get one pass at reduced intensity; thick lines get
        // parallel passes one pixel apart.
        let passes = self.stroke_width.ceil().max(1.0) as usize;
        let intensity = (self.stroke_width / passes as f64).min(1.0);

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        let (nx, ny) = if len > 0.0 { (-dy / len, dx / len) } else { (0.0, 0.0) };

        for pass in 0..passes {
            let offset = pass as f64 - (passes - 1) as f64 / 2.0;
            let (ox, oy) = (nx * offset, ny * offset);
            self.draw_line(from.0 + ox, from.1 + oy, to.0 + ox, to.1 + oy, intensity);
        }
    }

    /// Wu-style antialiased line over the half-open major-axis span.
    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, intensity: f64) {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let gradient = if dx.abs() < f64::EPSILON {
            0.0
        } else {
            (y1 - y0) / dx
        };

        let major_limit = if steep {
            self.buffer.height
        } else {
            self.buffer.width
        } as i64;
        let start = (x0.round() as i64).max(-1);
        let end = (x1.round() as i64).min(major_limit + 1);

        let color = self.stroke_color;
        for major in start..end {
            let minor = y0 + gradient * (major as f64 - x0);
            let floor = minor.floor();
            let frac = minor - floor;
            let minor = floor as i64;
            let (near, far) = ((1.0 - frac) * intensity, frac * intensity);
            if steep {
                self.buffer.blend(minor, major, &color, near);
                self.buffer.blend(minor + 1, major, &color, far);
            } else {
                self.buffer.blend(major, minor, &color, near);
                self.buffer.blend(major, minor + 1, &color, far);
            }
        }
    }
}

impl DrawSurface for RasterSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let background = self.background;
        self.buffer.fill_rect(x, y, width, height, background);
    }

    fn set_stroke_style(&mut self, color: Hsla, width: f64) {
        self.stroke_color = color.to_color();
        self.stroke_width = width;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(Subpath {
            points: vec![(x, y)],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(subpath) if !subpath.closed => {
                subpath.points.push((x, y));
                return;
            }
            _ => {}
        }
        // line_to without an open subpath starts one, as on a canvas
        self.move_to(x, y);
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.path.last_mut() {
            subpath.closed = true;
        }
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        for subpath in &path {
            for pair in subpath.points.windows(2) {
                self.stroke_segment(pair[0], pair[1]);
            }
            if subpath.closed && subpath.points.len() > 2 {
                let first = subpath.points[0];
                let last = subpath.points[subpath.points.len() - 1];
                self.stroke_segment(last, first);
            }
        }
        self.path = path;
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width != self.buffer.width || height != self.buffer.height {
            self.buffer = PixelBuffer::new(width, height, self.background);
        }
    }
}
