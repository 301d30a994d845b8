//! Curve synthesizer.
//!
//! Draws one frame: for every shape slot and every layer slot, a closed rose
//! curve `r(θ) = base + amplitude * wave(petals * θ)` plus connector
//! segments to the next layer out. Fractional shape and layer counts fade the
//! last slot in with a sub-linear power curve.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::color::Hsla;
use crate::frame::FrameState;
use crate::palette;
use crate::surface::DrawSurface;
use crate::wave;

/// Segments per closed curve (the curve has one more point than this).
pub const CURVE_SEGMENTS: usize = 360;
/// Connector segments per unit of petal count.
pub const CONNECTORS_PER_PETAL: f64 = 8.0;
/// Exponent applied to the fractional part of a fading slot.
pub const FADE_EXPONENT: f64 = 0.3;
/// Slots at or below this opacity are skipped.
pub const CULL_OPACITY: f64 = 0.01;
/// Line width of the rose curves.
pub const CURVE_LINE_WIDTH: f64 = 1.0;
/// Line width of the inter-layer connectors.
pub const CONNECTOR_LINE_WIDTH: f64 = 0.5;
/// Saturation percent of every stroke.
pub const SATURATION: f64 = 70.0;
/// Lightness percent of the innermost layer; each layer out is 5 darker.
pub const BASE_LIGHTNESS: f64 = 60.0;
/// Hue step between consecutive layers, degrees.
pub const LAYER_HUE_STEP: f64 = 30.0;
/// Hue shift of the connectors relative to their layer, degrees.
pub const CONNECTOR_HUE_SHIFT: f64 = 45.0;

/// A point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Radial extent of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerGeometry {
    /// Radius the wave oscillates around.
    pub base_radius: f64,
    /// Peak deviation from `base_radius`.
    pub amplitude: f64,
}

impl LayerGeometry {
    /// Geometry of `layer` out of `slots`, interpolating from 0.5x to 2.0x `radius`.
    pub fn new(radius: f64, layer: usize, slots: usize) -> Self {
        let progress = if slots > 1 {
            layer as f64 / (slots - 1) as f64
        } else {
            0.0
        };
        let base_radius = radius * (0.5 + progress * 1.5);
        Self {
            base_radius,
            amplitude: base_radius * 0.8,
        }
    }

    /// Polar radius at angle `theta`.
    #[inline]
    pub fn radius_at(&self, frame: &FrameState, theta: f64) -> f64 {
        self.base_radius + self.amplitude * wave::evaluate(frame.wave, frame.petal_count * theta)
    }
}

/// Counts of what a synthesis pass drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SynthStats {
    /// Shapes with at least one visible layer.
    pub shapes_drawn: usize,
    /// Curves stroked.
    pub curves_drawn: usize,
    /// Connector segments stroked.
    pub connectors_drawn: usize,
}

/// Opacity of slot `index` when `value` slots are visible.
///
/// Fully opaque once `value >= index + 1`, otherwise
/// `max(0, value - index) ^ 0.3`; exactly 0 at `value == index`.
#[inline]
pub fn fade_opacity(value: f64, index: usize) -> f64 {
    let index = index as f64;
    if value >= index + 1.0 {
        1.0
    } else {
        // f64::max maps NaN to 0
        (value - index).max(0.0).powf(FADE_EXPONENT)
    }
}

/// Opacity of shape `index` for this frame.
pub fn shape_opacity(frame: &FrameState, index: usize) -> f64 {
    match frame.shape_oscillation {
        Some(value) => fade_opacity(value, index),
        None => 1.0,
    }
}

/// Draws the frame's curves onto `surface`.
///
/// `rotation` is the global rotation angle and `center` the curve origin.
/// The surface is not cleared here.
pub fn synthesize(
    frame: &FrameState,
    center: Point,
    rotation: f64,
    surface: &mut dyn DrawSurface,
) -> SynthStats {
    let mut stats = SynthStats::default();
    let shape_slots = frame.shape_count as usize;
    let layer_slots = frame.layer_slots();

    for shape in 0..shape_slots {
        let opacity = shape_opacity(frame, shape);
        if opacity <= CULL_OPACITY {
            continue;
        }

        let angle = rotation + (shape as f64 / shape_slots as f64) * TAU;
        let shape_hue = palette::hue_offset(frame.palette, frame.base_hue, shape, shape_slots);
        let mut drew_layer = false;

        for layer in 0..layer_slots {
            let layer_opacity = if frame.layer_fade {
                opacity * fade_opacity(frame.layer_count, layer)
            } else {
                opacity
            };
            if layer_opacity <= CULL_OPACITY {
                continue;
            }

            let geometry = LayerGeometry::new(frame.radius, layer, layer_slots);
            let hue = (shape_hue + layer as f64 * LAYER_HUE_STEP).rem_euclid(360.0);
            let lightness = BASE_LIGHTNESS - layer as f64 * 5.0;

            surface.set_stroke_style(
                Hsla::new(hue, SATURATION, lightness, layer_opacity),
                CURVE_LINE_WIDTH,
            );
            trace_curve(frame, &geometry, center, angle, surface);
            stats.curves_drawn += 1;
            drew_layer = true;

            if layer + 1 < layer_slots {
                let outer = LayerGeometry::new(frame.radius, layer + 1, layer_slots);
                surface.set_stroke_style(
                    Hsla::new(
                        hue + CONNECTOR_HUE_SHIFT,
                        SATURATION,
                        lightness,
                        layer_opacity * 0.5,
                    ),
                    CONNECTOR_LINE_WIDTH,
                );
                stats.connectors_drawn +=
                    trace_connectors(frame, &geometry, &outer, center, angle, surface);
            }
        }

        if drew_layer {
            stats.shapes_drawn += 1;
        }
    }

    stats
}

/// Number of connector segments between two layers for this frame.
pub fn connector_count(frame: &FrameState) -> usize {
    (frame.petal_count * CONNECTORS_PER_PETAL).max(0.0).ceil() as usize
}

fn polar(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

fn trace_curve(
    frame: &FrameState,
    geometry: &LayerGeometry,
    center: Point,
    angle: f64,
    surface: &mut dyn DrawSurface,
) {
    surface.begin_path();
    for step in 0..=CURVE_SEGMENTS {
        let theta = step as f64 / CURVE_SEGMENTS as f64 * TAU;
        let p = polar(center, geometry.radius_at(frame, theta), theta + angle);
        if step == 0 {
            surface.move_to(p.x, p.y);
        } else {
            surface.line_to(p.x, p.y);
        }
    }
    surface.close_path();
    surface.stroke();
}

fn trace_connectors(
    frame: &FrameState,
    inner: &LayerGeometry,
    outer: &LayerGeometry,
    center: Point,
    angle: f64,
    surface: &mut dyn DrawSurface,
) -> usize {
    let count = connector_count(frame);
    if count == 0 {
        return 0;
    }

    surface.begin_path();
    for i in 0..count {
        let theta = i as f64 / count as f64 * TAU;
        let from = polar(center, inner.radius_at(frame, theta), theta + angle);
        let to = polar(center, outer.radius_at(frame, theta), theta + angle);
        surface.move_to(from.x, from.y);
        surface.line_to(to.x, to.y);
    }
    surface.stroke();
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandRecorder, DrawCommand};
    use rosefield_spec::{PaletteKind, WaveKind};

    fn frame() -> FrameState {
        FrameState {
            wave: WaveKind::Cosine,
            palette: PaletteKind::Monochrome,
            base_hue: 200.0,
            petal_count: 5.0,
            radius: 100.0,
            layer_count: 1.0,
            layer_fade: false,
            shape_count: 1,
            shape_oscillation: None,
        }
    }

    #[test]
    fn test_fade_boundaries() {
        assert_eq!(fade_opacity(2.0, 2), 0.0);
        assert_eq!(fade_opacity(3.0, 2), 1.0);
        assert_eq!(fade_opacity(0.5, 3), 0.0);
        assert!((fade_opacity(2.5, 2) - 0.5_f64.powf(0.3)).abs() < 1e-12);
        assert_eq!(fade_opacity(f64::NAN, 0), 0.0);
    }

    #[test]
    fn test_layer_geometry_interpolates() {
        let radii: Vec<f64> = (0..4)
            .map(|l| LayerGeometry::new(200.0, l, 4).base_radius)
            .collect();
        assert!((radii[0] - 100.0).abs() < 1e-9);
        assert!((radii[1] - 166.666_666_666).abs() < 1e-6);
        assert!((radii[2] - 233.333_333_333).abs() < 1e-6);
        assert!((radii[3] - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_layer_geometry() {
        let g = LayerGeometry::new(100.0, 0, 1);
        assert_eq!(g.base_radius, 50.0);
        assert_eq!(g.amplitude, 40.0);
    }

    #[test]
    fn test_single_curve_command_shape() {
        let mut rec = CommandRecorder::new();
        let stats = synthesize(&frame(), Point::new(0.0, 0.0), 0.0, &mut rec);

        assert_eq!(stats.curves_drawn, 1);
        assert_eq!(stats.connectors_drawn, 0);
        let cmds = rec.commands();
        // style, begin, move, 360 line_to, close, stroke
        assert_eq!(cmds.len(), 1 + 1 + 1 + CURVE_SEGMENTS + 1 + 1);
        assert!(matches!(cmds[cmds.len() - 2], DrawCommand::ClosePath));
        match cmds[2] {
            DrawCommand::MoveTo { x, y } => {
                assert!((x - 90.0).abs() < 1e-9);
                assert!(y.abs() < 1e-9);
            }
            ref other => panic!("expected move_to, got {other:?}"),
        }
    }

    #[test]
    fn test_connectors_between_layers() {
        let mut f = frame();
        f.layer_count = 2.0;
        f.petal_count = 2.3;
        let mut rec = CommandRecorder::new();
        let stats = synthesize(&f, Point::new(0.0, 0.0), 0.0, &mut rec);

        assert_eq!(stats.curves_drawn, 2);
        assert_eq!(stats.connectors_drawn, 19);
        let styles = rec.stroke_styles();
        assert_eq!(styles.len(), 3);
        let (curve, _) = styles[0];
        let (connector, width) = styles[1];
        assert_eq!(width, CONNECTOR_LINE_WIDTH);
        assert!((connector.h - (curve.h + 45.0)).abs() < 1e-9);
        assert!((connector.a - curve.a * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_layer_color_progression() {
        let mut f = frame();
        f.layer_count = 3.0;
        let mut rec = CommandRecorder::new();
        synthesize(&f, Point::new(0.0, 0.0), 0.0, &mut rec);
        let curves: Vec<Hsla> = rec
            .stroke_styles()
            .into_iter()
            .filter(|(_, w)| *w == CURVE_LINE_WIDTH)
            .map(|(c, _)| c)
            .collect();
        assert_eq!(curves.len(), 3);
        assert_eq!(curves[0].h, 200.0);
        assert_eq!(curves[1].h, 230.0);
        assert_eq!(curves[2].l, 50.0);
        assert!(curves.iter().all(|c| c.s == SATURATION));
    }

    #[test]
    fn test_fractional_layer_fade() {
        let mut f = frame();
        f.layer_fade = true;
        f.layer_count = 1.5;
        let mut rec = CommandRecorder::new();
        let stats = synthesize(&f, Point::new(0.0, 0.0), 0.0, &mut rec);
        assert_eq!(stats.curves_drawn, 2);
        let styles = rec.stroke_styles();
        let (outer, _) = styles[2];
        assert!((outer.a - 0.5_f64.powf(0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_shape_fade_culls_boundary_slot() {
        let mut f = frame();
        f.shape_count = 3;
        f.shape_oscillation = Some(2.0);
        let mut rec = CommandRecorder::new();
        let stats = synthesize(&f, Point::new(0.0, 0.0), 0.0, &mut rec);
        assert_eq!(stats.shapes_drawn, 2);
        assert!(rec.stroke_styles().iter().all(|(c, _)| c.a == 1.0));
    }

    #[test]
    fn test_zero_shapes_draw_nothing() {
        let mut f = frame();
        f.shape_count = 0;
        let mut rec = CommandRecorder::new();
        let stats = synthesize(&f, Point::new(0.0, 0.0), 0.0, &mut rec);
        assert_eq!(stats, SynthStats::default());
        assert!(rec.commands().is_empty());
    }
}
