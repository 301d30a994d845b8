//! Rosefield Configuration Library
//!
//! This crate provides the configuration model for the Rosefield renderer:
//! the wave and palette selectors, oscillator definitions, and the top-level
//! [`RoseConfig`] that a control surface hands to the renderer.
//!
//! # Overview
//!
//! A configuration is a JSON document. Every field has a default, so an empty
//! object `{}` is a valid configuration:
//!
//! - **Static parameters**: `radius`, `petals`, `num_shapes`, `num_layers`, `base_hue`
//! - **Selectors**: `wave_function` and `color_palette`
//! - **Oscillations**: one group per animatable [`Quantity`], each optionally
//!   carrying a `meta` oscillator that drives its speed
//!
//! # Example
//!
//! ```
//! use rosefield_spec::{RoseConfig, Quantity, WaveKind};
//! use rosefield_spec::validation::validate_config;
//!
//! let mut config = RoseConfig::from_json_str(r#"{ "petals": 7, "wave_function": "triangle" }"#).unwrap();
//! assert_eq!(config.wave_function, WaveKind::Triangle);
//!
//! config.oscillation_mut(Quantity::Radius).spec.enabled = true;
//! let result = validate_config(&config);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: The top-level configuration and its JSON round-tripping
//! - [`error`]: Error and warning types
//! - [`oscillator`]: Oscillator specifications and the quantity selector
//! - [`palette`]: Color palette selector
//! - [`validation`]: Advisory configuration checks
//! - [`wave`]: Periodic wave selector

pub mod config;
pub mod error;
pub mod oscillator;
pub mod palette;
pub mod validation;
pub mod wave;

pub use config::RoseConfig;
pub use error::{
    ConfigError, ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use oscillator::{Oscillation, OscillatorSpec, Quantity};
pub use palette::PaletteKind;
pub use validation::validate_config;
pub use wave::WaveKind;
