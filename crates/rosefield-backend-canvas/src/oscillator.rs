//! Oscillator engine.
//!
//! Maps the simulation clock onto an [`OscillatorSpec`]'s range. All functions
//! are pure: the same spec and clock always give the same value.

use rosefield_spec::{Oscillation, OscillatorSpec};

use crate::wave;

/// Sweeps `spec`'s range at the given `speed`, ignoring `spec.enabled`.
///
/// The wave output is normalized to `[0, 1]` and mapped onto the oscillator's
/// bounds. An inverted range collapses to `min`.
pub fn sweep(spec: &OscillatorSpec, speed: f64, clock: f64) -> f64 {
    let (min, max) = spec.bounds();
    let phase = clock * speed;
    let normalized = ((wave::evaluate(spec.wave, phase) + 1.0) * 0.5).clamp(0.0, 1.0);
    // max/min instead of clamp: clamp panics on NaN bounds
    (min + normalized * (max - min)).max(min).min(max)
}

/// Resolves a single oscillator, falling back to `static_value` when disabled.
pub fn resolve(spec: &OscillatorSpec, clock: f64, static_value: f64) -> f64 {
    if !spec.enabled {
        return static_value;
    }
    sweep(spec, spec.speed, clock)
}

/// Speed the primary oscillator runs at for this clock.
///
/// With an enabled meta oscillator, its output (over its own range) is the
/// speed; otherwise the primary's static `speed` is used.
pub fn effective_speed(oscillation: &Oscillation, clock: f64) -> f64 {
    match oscillation.active_meta() {
        Some(meta) => sweep(meta, meta.speed, clock),
        None => oscillation.spec.speed,
    }
}

/// Resolves an oscillation group, including meta-oscillated speed.
pub fn resolve_oscillation(oscillation: &Oscillation, clock: f64, static_value: f64) -> f64 {
    if !oscillation.spec.enabled {
        return static_value;
    }
    sweep(&oscillation.spec, effective_speed(oscillation, clock), clock)
}
