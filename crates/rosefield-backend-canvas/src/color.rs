//! Color utilities for stroking and compositing.

use serde::{Deserialize, Serialize};

/// RGBA color with f64 components (0.0 to 1.0 range), straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Create fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Create a color from HSL values.
    /// - h: hue in degrees (any value, reduced mod 360)
    /// - s: saturation (0-1)
    /// - l: lightness (0-1)
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Self::rgb(l, l, l);
        }

        let h = h.rem_euclid(360.0) / 60.0;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h.floor() as i32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Self::rgb(r + m, g + m, b + m)
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGBA.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0] as f64 / 255.0,
            g: rgba[1] as f64 / 255.0,
            b: rgba[2] as f64 / 255.0,
            a: rgba[3] as f64 / 255.0,
        }
    }

    /// Composite `self` over `dst` (source-over), scaling source alpha by `coverage`.
    pub fn over(&self, dst: &Color, coverage: f64) -> Color {
        let src_a = (self.a * coverage).clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return *dst;
        }

        let out_a = src_a + dst.a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Color::transparent();
        }

        let blend = |s: f64, d: f64| (s * src_a + d * dst.a * (1.0 - src_a)) / out_a;
        Color {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a: out_a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Stroke color in canvas `hsla()` terms.
///
/// Saturation and lightness are percentages; the hue is always stored
/// reduced into `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation percent.
    pub s: f64,
    /// Lightness percent.
    pub l: f64,
    /// Opacity, `[0, 1]`.
    pub a: f64,
}

impl Hsla {
    /// Creates a color, reducing the hue mod 360 and clamping the rest.
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        let h = h.rem_euclid(360.0);
        Self {
            // rem_euclid rounds tiny negative hues up to exactly 360
            h: if h >= 360.0 { 0.0 } else { h },
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Converts to an RGBA color.
    pub fn to_color(&self) -> Color {
        let rgb = Color::from_hsl(self.h, self.s / 100.0, self.l / 100.0);
        Color { a: self.a, ..rgb }
    }

    /// Formats as a CSS `hsla(...)` string.
    pub fn to_css(&self) -> String {
        format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(approx(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(approx(Color::from_hsl(120.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 0.0)));
        assert!(approx(Color::from_hsl(240.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
        assert!(approx(Color::from_hsl(-120.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsla_reduces_hue() {
        let c = Hsla::new(400.0, 70.0, 60.0, 0.5);
        assert!((c.h - 40.0).abs() < 1e-9);
        let c = Hsla::new(-30.0, 70.0, -5.0, 2.0);
        assert!((c.h - 330.0).abs() < 1e-9);
        assert_eq!(c.l, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_over_opaque_source_replaces() {
        let out = Color::rgb(1.0, 0.0, 0.0).over(&Color::black(), 1.0);
        assert!(approx(out, Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn test_over_half_coverage_mixes() {
        let out = Color::rgb(1.0, 1.0, 1.0).over(&Color::black(), 0.5);
        assert!(approx(out, Color::rgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn test_over_zero_coverage_keeps_destination() {
        let dst = Color::rgba(0.2, 0.3, 0.4, 0.5);
        assert_eq!(Color::rgb(1.0, 1.0, 1.0).over(&dst, 0.0), dst);
    }

    #[test]
    fn test_css_format() {
        assert_eq!(Hsla::new(10.0, 70.0, 60.0, 1.0).to_css(), "hsla(10, 70%, 60%, 1)");
    }
}
