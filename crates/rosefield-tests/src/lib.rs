//! Rosefield End-to-End Test Infrastructure
//!
//! This crate holds the property tests for the oscillator engine and
//! configuration layer, and end-to-end determinism checks for rendering.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rosefield-tests
//! ```
//!
//! ## Determinism Testing
//!
//! ```rust,ignore
//! use rosefield_tests::determinism::verify_determinism;
//!
//! let result = verify_determinism(|| render_png(&config, 10, 96), 3);
//! result.assert_deterministic();
//! ```

pub mod determinism;
pub mod fixtures;
