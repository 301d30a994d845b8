//! Property-based tests for the wave, oscillator, palette and synthesis layers.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rosefield-tests --test proptest_engine
//! ```

use std::f64::consts::TAU;

use proptest::prelude::*;

use rosefield_backend_canvas::oscillator::{resolve, resolve_oscillation};
use rosefield_backend_canvas::palette::hue_offset;
use rosefield_backend_canvas::synth::fade_opacity;
use rosefield_backend_canvas::wave::evaluate;
use rosefield_backend_canvas::{
    resolve_frame, synthesize, CommandRecorder, Driver, DriverError, HeadlessHost, Hsla,
    LoopControl, Point, Viewport, CLOCK_STEP,
};
use rosefield_spec::{Oscillation, OscillatorSpec, PaletteKind, RoseConfig, WaveKind};

fn wave_kind() -> impl Strategy<Value = WaveKind> {
    prop::sample::select(WaveKind::ALL.to_vec())
}

fn palette_kind() -> impl Strategy<Value = PaletteKind> {
    prop::sample::select(PaletteKind::ALL.to_vec())
}

/// Enabled spec with a finite, ordered range and positive speed.
fn enabled_spec() -> impl Strategy<Value = OscillatorSpec> {
    (wave_kind(), 0.01f64..10.0, -500.0f64..500.0, 0.0f64..500.0)
        .prop_map(|(wave, speed, min, span)| OscillatorSpec::new(wave, speed, min, min + span))
}

/// True when `x` is far enough from a jump of `kind` that a period shift
/// cannot land on the other side of it through rounding.
fn away_from_jump(kind: WaveKind, x: f64) -> bool {
    match kind {
        WaveKind::Square => x.sin().abs() > 1e-6,
        WaveKind::Sawtooth => {
            let c = x / TAU + 0.5;
            (c - c.round()).abs() > 1e-6
        }
        _ => true,
    }
}

// ============================================================================
// 1. Wave library
// ============================================================================

proptest! {
    /// Every wave stays within [-1, 1] for finite input.
    #[test]
    fn wave_output_is_bounded(kind in wave_kind(), x in -1.0e6f64..1.0e6) {
        let v = evaluate(kind, x);
        prop_assert!((-1.0..=1.0).contains(&v), "{:?}({}) = {}", kind, x, v);
    }

    /// Every wave repeats after 2π away from its discontinuities.
    #[test]
    fn wave_is_periodic(kind in wave_kind(), x in -1.0e3f64..1.0e3) {
        prop_assume!(away_from_jump(kind, x));
        let a = evaluate(kind, x);
        let b = evaluate(kind, x + TAU);
        prop_assert!((a - b).abs() < 1e-6, "{:?}: f({}) = {}, f(x + 2π) = {}", kind, x, a, b);
    }

    /// Waves are pure.
    #[test]
    fn wave_is_deterministic(kind in wave_kind(), x in prop::num::f64::ANY) {
        let a = evaluate(kind, x);
        let b = evaluate(kind, x);
        prop_assert!(a == b || (a.is_nan() && b.is_nan()));
    }
}

// ============================================================================
// 2. Oscillator engine
// ============================================================================

proptest! {
    /// An enabled oscillator always lands inside its range.
    #[test]
    fn oscillator_stays_in_range(spec in enabled_spec(), clock in 0.0f64..1.0e4) {
        let v = resolve(&spec, clock, f64::NAN);
        prop_assert!(v >= spec.min && v <= spec.max, "{} outside [{}, {}]", v, spec.min, spec.max);
    }

    /// A disabled oscillator returns the static value untouched.
    #[test]
    fn disabled_oscillator_returns_static(
        spec in enabled_spec(),
        clock in 0.0f64..1.0e4,
        static_value in -1.0e6f64..1.0e6,
    ) {
        let spec = OscillatorSpec { enabled: false, ..spec };
        prop_assert_eq!(resolve(&spec, clock, static_value), static_value);
    }

    /// Meta-driven speed never pushes the primary out of range.
    #[test]
    fn meta_oscillation_stays_in_range(
        spec in enabled_spec(),
        meta in enabled_spec(),
        clock in 0.0f64..1.0e3,
    ) {
        let osc = Oscillation::new(spec).with_meta(meta);
        let v = resolve_oscillation(&osc, clock, 0.0);
        prop_assert!(v >= spec.min && v <= spec.max);
    }

    /// An inverted range collapses to its minimum.
    #[test]
    fn inverted_range_collapses(
        wave in wave_kind(),
        min in -100.0f64..100.0,
        gap in 0.001f64..100.0,
        clock in 0.0f64..100.0,
    ) {
        let spec = OscillatorSpec::new(wave, 1.0, min, min - gap);
        prop_assert_eq!(resolve(&spec, clock, 0.0), min);
    }

    /// Resolution is idempotent: same inputs, same output.
    #[test]
    fn resolve_is_idempotent(spec in enabled_spec(), clock in 0.0f64..1.0e4) {
        let osc = Oscillation::new(spec);
        prop_assert_eq!(resolve_oscillation(&osc, clock, 1.0), resolve_oscillation(&osc, clock, 1.0));
    }
}

// ============================================================================
// 3. Palette and fade laws
// ============================================================================

proptest! {
    /// Monochrome ignores the shape index.
    #[test]
    fn monochrome_is_constant(base in 0.0f64..360.0, index in 0usize..64, total in 0usize..64) {
        prop_assert_eq!(hue_offset(PaletteKind::Monochrome, base, index, total), base);
    }

    /// With a single shape, ratio-based palettes give the first slot's hue.
    #[test]
    fn single_shape_uses_first_hue(base in 0.0f64..360.0, index in 0usize..8) {
        for kind in [
            PaletteKind::Analogous,
            PaletteKind::Warm,
            PaletteKind::Cool,
            PaletteKind::Sunset,
            PaletteKind::Ocean,
            PaletteKind::Forest,
        ] {
            prop_assert_eq!(hue_offset(kind, base, index, 1), hue_offset(kind, base, 0, 1));
        }
    }

    /// Stroke hues always land in [0, 360).
    #[test]
    fn stroke_hue_is_reduced(
        kind in palette_kind(),
        base in -1.0e4f64..1.0e4,
        index in 0usize..16,
        total in 0usize..16,
    ) {
        let hsla = Hsla::new(hue_offset(kind, base, index, total), 70.0, 60.0, 1.0);
        prop_assert!((0.0..360.0).contains(&hsla.h));
    }

    /// Fade opacity is in [0, 1], zero at the slot index, and full one slot later.
    #[test]
    fn fade_law_bounds(value in -10.0f64..20.0, index in 0usize..16) {
        let opacity = fade_opacity(value, index);
        prop_assert!((0.0..=1.0).contains(&opacity));
        if value <= index as f64 {
            prop_assert_eq!(opacity, 0.0);
        }
        if value >= index as f64 + 1.0 {
            prop_assert_eq!(opacity, 1.0);
        }
    }

    /// Fade opacity never decreases as the count grows.
    #[test]
    fn fade_is_monotonic(a in 0.0f64..10.0, delta in 0.0f64..5.0, index in 0usize..10) {
        prop_assert!(fade_opacity(a + delta, index) >= fade_opacity(a, index));
    }
}

// ============================================================================
// 4. Synthesis and driver
// ============================================================================

fn arbitrary_config() -> impl Strategy<Value = RoseConfig> {
    (
        wave_kind(),
        palette_kind(),
        -720.0f64..720.0,
        -300.0f64..300.0,
        -12.0f64..12.0,
        0u32..5,
        -2.0f64..6.0,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(wave, palette, hue, radius, petals, shapes, layers, osc_shapes, osc_layers)| {
                let mut config = RoseConfig {
                    wave_function: wave,
                    color_palette: palette,
                    base_hue: hue,
                    radius,
                    petals,
                    num_shapes: shapes,
                    num_layers: layers,
                    ..RoseConfig::default()
                };
                config.shape_oscillation.spec.enabled = osc_shapes;
                config.layer_oscillation.spec.enabled = osc_layers;
                config
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Synthesis never draws more curves than there are slots.
    #[test]
    fn synthesis_respects_slot_counts(config in arbitrary_config(), clock in 0.0f64..100.0) {
        let frame = resolve_frame(&config, clock);
        let mut recorder = CommandRecorder::new();
        let stats = synthesize(&frame, Point::new(200.0, 200.0), 0.0, &mut recorder);

        let slots = frame.shape_count as usize * frame.layer_slots();
        prop_assert!(stats.curves_drawn <= slots);
        prop_assert!(stats.shapes_drawn <= frame.shape_count as usize);
        prop_assert!(recorder.stroke_count() >= stats.curves_drawn);
    }

    /// Every tick advances the clock by exactly one step.
    #[test]
    fn driver_clock_is_monotonic(frames in 1u64..120) {
        let host = HeadlessHost::new(CommandRecorder::new(), Viewport::new(64, 64))
            .with_frame_limit(frames);
        let mut driver = Driver::new(host, RoseConfig::default());

        let mut previous: Option<f64> = None;
        let mut steps_ok = true;
        let rendered = driver
            .run(|_, report| {
                if let Some(prev) = previous {
                    steps_ok &= report.clock == prev + CLOCK_STEP && report.clock > prev;
                }
                previous = Some(report.clock);
                Ok::<_, DriverError>(LoopControl::Continue)
            })
            .unwrap();

        prop_assert_eq!(rendered, frames);
        prop_assert!(steps_ok);
    }
}
