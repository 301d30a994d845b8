//! Shared configurations and render helpers for tests.

use rosefield_backend_canvas::png::{write_rgba_to_vec_with_hash, PngConfig};
use rosefield_backend_canvas::{render_still, Color, Viewport};
use rosefield_spec::{Oscillation, OscillatorSpec, Quantity, RoseConfig, WaveKind};

/// A config with every oscillation group and its meta oscillator enabled.
pub fn fully_animated() -> RoseConfig {
    let mut config = RoseConfig::default();
    for quantity in Quantity::ALL {
        let osc = config.oscillation_mut(quantity);
        osc.spec.enabled = true;
        if let Some(meta) = osc.meta.as_mut() {
            meta.enabled = true;
        }
    }
    config
}

/// A config whose shape count sweeps `min..=max` on a sine at speed 1.
pub fn shape_sweep(min: f64, max: f64) -> RoseConfig {
    let mut config = RoseConfig::default();
    config.set_oscillation(
        Quantity::ShapeCount,
        Oscillation::new(OscillatorSpec::new(WaveKind::Sine, 1.0, min, max)),
    );
    config
}

/// Encodes frame `frame` of `config` as PNG bytes.
pub fn render_png(config: &RoseConfig, frame: u64, size: u32) -> Vec<u8> {
    let still = render_still(config, Viewport::new(size, size), frame, Color::black());
    match write_rgba_to_vec_with_hash(&still.buffer, &PngConfig::default()) {
        Ok((data, _)) => data,
        Err(e) => panic!("failed to encode frame {frame}: {e}"),
    }
}
