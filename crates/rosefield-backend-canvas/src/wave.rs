//! Wave library: pure periodic functions with period 2π.
//!
//! Outputs are bipolar. Callers that need a `[0, 1]` value normalize with
//! `(v + 1) / 2` themselves.

use std::f64::consts::{PI, TAU};

use rosefield_spec::WaveKind;

/// Evaluates `kind` at `x`.
///
/// Every kind returns a value in `[-1, 1]` for finite input.
#[inline]
pub fn evaluate(kind: WaveKind, x: f64) -> f64 {
    match kind {
        WaveKind::Cosine => x.cos(),
        WaveKind::Sine => x.sin(),
        WaveKind::AbsSine => x.sin().abs(),
        WaveKind::AbsCosine => x.cos().abs(),
        WaveKind::Square => square(x),
        WaveKind::Sawtooth => sawtooth(x),
        WaveKind::Triangle => triangle(x),
    }
}

/// `+1` where `sin(x) >= 0`, `-1` elsewhere.
#[inline]
pub fn square(x: f64) -> f64 {
    if x.sin() >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Ramp in `[-1, 1)`, jumping at odd multiples of π.
#[inline]
pub fn sawtooth(x: f64) -> f64 {
    let cycles = x / TAU;
    2.0 * (cycles - (cycles + 0.5).floor())
}

/// Continuous ramp in `[-1, 1]`: `+1` at even multiples of π, `-1` at odd ones.
#[inline]
pub fn triangle(x: f64) -> f64 {
    // rem_euclid keeps negative inputs inside the same range
    ((x / PI).rem_euclid(2.0) - 1.0).abs() * 2.0 - 1.0
}
