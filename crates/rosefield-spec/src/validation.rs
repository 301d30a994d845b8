//! Configuration validation.
//!
//! Validation is advisory. The renderer degrades gracefully on anything
//! reported here as a warning, and errors flag values that would make the
//! output meaningless (NaN geometry, frozen oscillators).

use crate::config::RoseConfig;
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::oscillator::{OscillatorSpec, Quantity};

/// Largest shape, layer or petal count that validation accepts silently.
pub const MAX_COUNT: f64 = 64.0;

/// Validates a configuration.
///
/// # Example
/// ```
/// use rosefield_spec::{RoseConfig, validate_config};
///
/// let mut config = RoseConfig::default();
/// config.radius = f64::NAN;
/// assert!(!validate_config(&config).is_ok());
/// ```
pub fn validate_config(config: &RoseConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    validate_static_values(config, &mut result);
    for quantity in Quantity::ALL {
        validate_oscillation(config, quantity, &mut result);
    }

    result
}

fn validate_static_values(config: &RoseConfig, result: &mut ValidationResult) {
    let statics = [
        ("base_hue", config.base_hue, false),
        ("radius", config.radius, true),
        ("petals", config.petals, true),
        ("num_layers", config.num_layers, true),
    ];

    for (name, value, non_negative) in statics {
        if !value.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteNumber,
                format!("{} must be finite, got {}", name, value),
                name,
            ));
        } else if non_negative && value < 0.0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::NegativeValue,
                format!("{} must be >= 0, got {}", name, value),
                name,
            ));
        }
    }

    let counts = [
        ("petals", config.petals),
        ("num_shapes", f64::from(config.num_shapes)),
        ("num_layers", config.num_layers),
    ];
    for (name, value) in counts {
        if value.is_finite() && value > MAX_COUNT {
            result.add_warning(out_of_scale(name, value, name.to_string()));
        }
    }
}

fn out_of_scale(name: &str, value: f64, path: String) -> ValidationWarning {
    ValidationWarning::with_path(
        WarningCode::OutOfScaleCount,
        format!("{} of {} exceeds {}, frames will be slow to draw", name, value, MAX_COUNT),
        path,
    )
}

fn validate_oscillation(config: &RoseConfig, quantity: Quantity, result: &mut ValidationResult) {
    let osc = config.oscillation(quantity);
    let field = quantity.field_name();

    validate_spec(&osc.spec, field, result);
    if let Some(meta) = &osc.meta {
        validate_spec(meta, &format!("{}.meta", field), result);
    }

    if !osc.spec.enabled {
        return;
    }

    if quantity != Quantity::Hue {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ShadowedStaticValue,
            format!(
                "static {} value {} is ignored while {} is enabled",
                quantity,
                config.static_value(quantity),
                field
            ),
            field,
        ));
    }

    let (_, max) = osc.spec.bounds();
    let is_count = matches!(
        quantity,
        Quantity::ShapeCount | Quantity::PetalCount | Quantity::LayerCount
    );
    if is_count && max.is_finite() && max > MAX_COUNT {
        result.add_warning(out_of_scale(field, max, format!("{}.max", field)));
    }

    let counts_visibility = matches!(quantity, Quantity::ShapeCount | Quantity::LayerCount);
    if counts_visibility && max <= 0.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::InvisibleRange,
            format!("{} never exceeds 0, nothing will be drawn", field),
            format!("{}.max", field),
        ));
    }
}

fn validate_spec(spec: &OscillatorSpec, path: &str, result: &mut ValidationResult) {
    for (name, value) in [("speed", spec.speed), ("min", spec.min), ("max", spec.max)] {
        if !value.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteNumber,
                format!("{} must be finite, got {}", name, value),
                format!("{}.{}", path, name),
            ));
        }
    }

    if spec.speed.is_finite() && spec.speed <= 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::NonPositiveSpeed,
            format!("speed must be > 0, got {}", spec.speed),
            format!("{}.speed", path),
        ));
    }

    if spec.min > spec.max {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::InvertedRange,
            format!(
                "range [{}, {}] is inverted and collapses to {}",
                spec.min, spec.max, spec.min
            ),
            path.to_string(),
        ));
    }
}
