//! Frame parameter resolution.
//!
//! Turns a [`RoseConfig`] and the simulation clock into the immutable
//! [`FrameState`] consumed by the curve synthesizer.

use rosefield_spec::{PaletteKind, Quantity, RoseConfig, WaveKind};
use serde::Serialize;

use crate::oscillator::{effective_speed, sweep};

/// Fully resolved parameters for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameState {
    /// Wave evaluated along each curve.
    pub wave: WaveKind,
    /// Palette used for shape hues.
    pub palette: PaletteKind,
    /// Base hue in degrees.
    pub base_hue: f64,
    /// Petal multiplier (may be fractional).
    pub petal_count: f64,
    /// Base radius in pixels.
    pub radius: f64,
    /// Layer count (may be fractional).
    pub layer_count: f64,
    /// Whether layers beyond the fractional count fade out.
    pub layer_fade: bool,
    /// Number of shape slots to render.
    pub shape_count: u32,
    /// Fractional shape count while shape oscillation is enabled.
    pub shape_oscillation: Option<f64>,
}

impl FrameState {
    /// Number of layer slots per shape.
    pub fn layer_slots(&self) -> usize {
        // f64::max drops NaN, so a NaN count yields zero slots
        self.layer_count.max(0.0).ceil() as usize
    }
}

/// Resolves the frame state for `clock`.
///
/// Resolution order is fixed: hue, then the speeds of the petal, radius,
/// layer and shape oscillators, then their values, then the shape count.
/// An enabled oscillator always overrides its static counterpart.
pub fn resolve_frame(config: &RoseConfig, clock: f64) -> FrameState {
    let base_hue = resolve_quantity(config, Quantity::Hue, clock, None);

    let petal_speed = effective_speed(config.oscillation(Quantity::PetalCount), clock);
    let radius_speed = effective_speed(config.oscillation(Quantity::Radius), clock);
    let layer_speed = effective_speed(config.oscillation(Quantity::LayerCount), clock);
    let shape_speed = effective_speed(config.oscillation(Quantity::ShapeCount), clock);

    let petal_count = resolve_quantity(config, Quantity::PetalCount, clock, Some(petal_speed));
    let radius = resolve_quantity(config, Quantity::Radius, clock, Some(radius_speed));
    let layer_count = resolve_quantity(config, Quantity::LayerCount, clock, Some(layer_speed));

    let shapes = config.oscillation(Quantity::ShapeCount);
    let (shape_count, shape_oscillation) = if shapes.is_enabled() {
        let value = sweep(&shapes.spec, shape_speed, clock);
        // Always render the slot count at the range max so shapes fade in
        // instead of popping in.
        let (_, max) = shapes.spec.bounds();
        (max.max(0.0).ceil() as u32, Some(value))
    } else {
        (config.num_shapes, None)
    };

    FrameState {
        wave: config.wave_function,
        palette: config.color_palette,
        base_hue,
        petal_count,
        radius,
        layer_count,
        layer_fade: config.oscillation(Quantity::LayerCount).is_enabled(),
        shape_count,
        shape_oscillation,
    }
}

fn resolve_quantity(config: &RoseConfig, quantity: Quantity, clock: f64, speed: Option<f64>) -> f64 {
    let oscillation = config.oscillation(quantity);
    if !oscillation.is_enabled() {
        return config.static_value(quantity);
    }
    let speed = speed.unwrap_or_else(|| effective_speed(oscillation, clock));
    sweep(&oscillation.spec, speed, clock)
}
