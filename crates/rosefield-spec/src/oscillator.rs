//! Oscillator specifications.
//!
//! An [`OscillatorSpec`] describes one animatable value sweeping between
//! `min` and `max`. An [`Oscillation`] pairs a primary spec with an optional
//! `meta` spec whose output replaces the primary's `speed`. The meta spec is a
//! plain [`OscillatorSpec`], so speed modulation cannot nest further.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wave::WaveKind;

/// One oscillating quantity: wave shape, rate, and output range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OscillatorSpec {
    /// Whether the oscillator drives its quantity. When false the static value wins.
    pub enabled: bool,
    /// Wave used to sweep the range.
    pub wave: WaveKind,
    /// Phase rate, multiplied by the simulation clock.
    pub speed: f64,
    /// Lower bound of the output range.
    pub min: f64,
    /// Upper bound of the output range.
    pub max: f64,
}

impl OscillatorSpec {
    /// Creates an enabled oscillator.
    pub fn new(wave: WaveKind, speed: f64, min: f64, max: f64) -> Self {
        Self {
            enabled: true,
            wave,
            speed,
            min,
            max,
        }
    }

    /// Creates a disabled oscillator carrying the given range.
    pub fn disabled(wave: WaveKind, speed: f64, min: f64, max: f64) -> Self {
        Self {
            enabled: false,
            ..Self::new(wave, speed, min, max)
        }
    }

    /// Returns the effective `(min, max)` bounds.
    ///
    /// An inverted range collapses to `[min, min]`.
    pub fn bounds(&self) -> (f64, f64) {
        if self.max < self.min {
            (self.min, self.min)
        } else {
            (self.min, self.max)
        }
    }
}

impl Default for OscillatorSpec {
    fn default() -> Self {
        Self::disabled(WaveKind::Sine, 0.5, 0.0, 1.0)
    }
}

/// A primary oscillator with optional speed modulation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Oscillation {
    /// The oscillator driving the quantity itself.
    #[serde(flatten)]
    pub spec: OscillatorSpec,
    /// Oscillator whose output becomes `spec.speed` while enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<OscillatorSpec>,
}

impl Oscillation {
    /// Creates an oscillation with no meta oscillator.
    pub fn new(spec: OscillatorSpec) -> Self {
        Self { spec, meta: None }
    }

    /// Attaches a speed oscillator.
    pub fn with_meta(mut self, meta: OscillatorSpec) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Whether the primary oscillator is active.
    pub fn is_enabled(&self) -> bool {
        self.spec.enabled
    }

    /// The meta oscillator, if one is attached and enabled.
    pub fn active_meta(&self) -> Option<&OscillatorSpec> {
        self.meta.as_ref().filter(|meta| meta.enabled)
    }
}

/// The animatable quantities of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// Base hue fed into the palette.
    Hue,
    /// Number of rotated shape instances.
    ShapeCount,
    /// Petal multiplier of the rose curve.
    PetalCount,
    /// Base radius.
    Radius,
    /// Number of concentric layers per shape.
    LayerCount,
}

impl Quantity {
    /// Every quantity, in frame resolution order.
    pub const ALL: [Quantity; 5] = [
        Quantity::Hue,
        Quantity::PetalCount,
        Quantity::Radius,
        Quantity::LayerCount,
        Quantity::ShapeCount,
    ];

    /// Returns the name of the config field holding this quantity's oscillation.
    pub fn field_name(&self) -> &'static str {
        match self {
            Quantity::Hue => "hue_oscillation",
            Quantity::ShapeCount => "shape_oscillation",
            Quantity::PetalCount => "petal_oscillation",
            Quantity::Radius => "radius_oscillation",
            Quantity::LayerCount => "layer_oscillation",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Hue => "hue",
            Quantity::ShapeCount => "shape_count",
            Quantity::PetalCount => "petal_count",
            Quantity::Radius => "radius",
            Quantity::LayerCount => "layer_count",
        };
        f.write_str(name)
    }
}
