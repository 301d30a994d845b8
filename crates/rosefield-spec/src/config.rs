//! Top-level renderer configuration.

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::oscillator::{Oscillation, OscillatorSpec, Quantity};
use crate::palette::PaletteKind;
use crate::wave::WaveKind;

/// Everything the control surface can set.
///
/// Static values (`radius`, `petals`, `num_shapes`, `num_layers`, `base_hue`)
/// are used only while the matching oscillation is disabled; an enabled
/// oscillation always takes precedence.
///
/// Counts (`petals`, `num_shapes`, `num_layers` and the ranges of their
/// oscillations) are expected to stay at or below
/// [`MAX_COUNT`](crate::validation::MAX_COUNT). Larger values still render,
/// but per-frame work grows linearly with each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoseConfig {
    /// Wave evaluated along each rose curve.
    pub wave_function: WaveKind,
    /// Palette mapping shape index to hue.
    pub color_palette: PaletteKind,
    /// Base hue in degrees.
    pub base_hue: f64,
    /// Static base radius in pixels.
    pub radius: f64,
    /// Static petal multiplier.
    pub petals: f64,
    /// Static number of shapes.
    pub num_shapes: u32,
    /// Static number of concentric layers.
    pub num_layers: f64,
    /// Oscillation of the base hue.
    pub hue_oscillation: Oscillation,
    /// Oscillation of the shape count.
    pub shape_oscillation: Oscillation,
    /// Oscillation of the petal multiplier.
    pub petal_oscillation: Oscillation,
    /// Oscillation of the base radius.
    pub radius_oscillation: Oscillation,
    /// Oscillation of the layer count.
    pub layer_oscillation: Oscillation,
}

fn default_meta() -> OscillatorSpec {
    OscillatorSpec::disabled(WaveKind::Sine, 0.1, 0.1, 1.0)
}

impl Default for RoseConfig {
    fn default() -> Self {
        let group = |speed, min, max| {
            Oscillation::new(OscillatorSpec::disabled(WaveKind::Sine, speed, min, max))
                .with_meta(default_meta())
        };

        Self {
            wave_function: WaveKind::Cosine,
            color_palette: PaletteKind::Analogous,
            base_hue: 200.0,
            radius: 120.0,
            petals: 5.0,
            num_shapes: 3,
            num_layers: 3.0,
            hue_oscillation: group(0.2, 0.0, 360.0),
            shape_oscillation: group(0.3, 1.0, 6.0),
            petal_oscillation: group(0.25, 2.0, 9.0),
            radius_oscillation: group(0.5, 60.0, 180.0),
            layer_oscillation: group(0.2, 1.0, 5.0),
        }
    }
}

impl RoseConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the oscillation group driving `quantity`.
    pub fn oscillation(&self, quantity: Quantity) -> &Oscillation {
        match quantity {
            Quantity::Hue => &self.hue_oscillation,
            Quantity::ShapeCount => &self.shape_oscillation,
            Quantity::PetalCount => &self.petal_oscillation,
            Quantity::Radius => &self.radius_oscillation,
            Quantity::LayerCount => &self.layer_oscillation,
        }
    }

    /// Returns the oscillation group driving `quantity`, mutably.
    pub fn oscillation_mut(&mut self, quantity: Quantity) -> &mut Oscillation {
        match quantity {
            Quantity::Hue => &mut self.hue_oscillation,
            Quantity::ShapeCount => &mut self.shape_oscillation,
            Quantity::PetalCount => &mut self.petal_oscillation,
            Quantity::Radius => &mut self.radius_oscillation,
            Quantity::LayerCount => &mut self.layer_oscillation,
        }
    }

    /// Replaces the oscillation group driving `quantity` wholesale.
    pub fn set_oscillation(&mut self, quantity: Quantity, oscillation: Oscillation) {
        *self.oscillation_mut(quantity) = oscillation;
    }

    /// Static fallback for `quantity`, used while its oscillation is disabled.
    pub fn static_value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Hue => self.base_hue,
            Quantity::ShapeCount => self.num_shapes as f64,
            Quantity::PetalCount => self.petals,
            Quantity::Radius => self.radius,
            Quantity::LayerCount => self.num_layers,
        }
    }

    /// Builds a random configuration from a seed.
    ///
    /// The same seed always yields the same configuration.
    pub fn random(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut config = Self {
            wave_function: WaveKind::ALL[rng.gen_range(0..WaveKind::ALL.len())],
            color_palette: PaletteKind::ALL[rng.gen_range(0..PaletteKind::ALL.len())],
            base_hue: rng.gen_range(0.0..360.0_f64).round(),
            radius: rng.gen_range(60.0..200.0_f64).round(),
            petals: rng.gen_range(2..=12) as f64,
            num_shapes: rng.gen_range(1..=6),
            num_layers: rng.gen_range(1..=5) as f64,
            ..Self::default()
        };

        for quantity in Quantity::ALL {
            let enabled = rng.gen_bool(0.5);
            let wave = WaveKind::ALL[rng.gen_range(0..WaveKind::ALL.len())];
            let speed = rng.gen_range(0.05..1.0_f64);
            let osc = config.oscillation_mut(quantity);
            osc.spec.enabled = enabled;
            osc.spec.wave = wave;
            osc.spec.speed = (speed * 100.0).round() / 100.0;
            if let Some(meta) = osc.meta.as_mut() {
                meta.enabled = enabled && rng.gen_bool(0.3);
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_is_default() {
        let config = RoseConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RoseConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = RoseConfig::default();
        config.petals = 7.5;
        config.layer_oscillation.spec.enabled = true;
        let json = config.to_json_pretty().unwrap();
        let parsed = RoseConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RoseConfig::from_json_str(r#"{ "petal_count": 5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse(_)));
    }

    #[test]
    fn test_partial_oscillation_uses_defaults() {
        let config =
            RoseConfig::from_json_str(r#"{ "radius_oscillation": { "enabled": true } }"#).unwrap();
        assert!(config.radius_oscillation.spec.enabled);
        assert_eq!(config.radius_oscillation.spec.wave, WaveKind::Sine);
        assert!(config.radius_oscillation.meta.is_none());
    }

    #[test]
    fn test_set_oscillation_replaces_group() {
        let mut config = RoseConfig::default();
        let osc = Oscillation::new(OscillatorSpec::new(WaveKind::Square, 2.0, 1.0, 4.0));
        config.set_oscillation(Quantity::PetalCount, osc);
        assert_eq!(*config.oscillation(Quantity::PetalCount), osc);
    }

    #[test]
    fn test_static_values() {
        let config = RoseConfig::default();
        assert_eq!(config.static_value(Quantity::ShapeCount), 3.0);
        assert_eq!(config.static_value(Quantity::Hue), 200.0);
    }

    #[test]
    fn test_random_is_deterministic() {
        assert_eq!(RoseConfig::random(42), RoseConfig::random(42));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rose.json");
        std::fs::write(&path, r#"{ "num_shapes": 5 }"#).unwrap();
        let config = RoseConfig::from_json_file(&path).unwrap();
        assert_eq!(config.num_shapes, 5);
    }
}
