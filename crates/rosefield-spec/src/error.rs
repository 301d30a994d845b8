//! Error types for configuration loading and validation.

use std::fmt;

use thiserror::Error;

/// Error codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E101: A numeric field is NaN or infinite
    NonFiniteNumber,
    /// E102: An oscillator speed is zero or negative
    NonPositiveSpeed,
    /// E103: A static count or radius is negative
    NegativeValue,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E101").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NonFiniteNumber => "E101",
            ErrorCode::NonPositiveSpeed => "E102",
            ErrorCode::NegativeValue => "E103",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W101: Oscillator range has min > max and collapses to min
    InvertedRange,
    /// W102: A static value is ignored because its oscillator is enabled
    ShadowedStaticValue,
    /// W103: Oscillator range never yields a visible shape or layer
    InvisibleRange,
    /// W104: A count exceeds the scale the renderer is tuned for
    OutOfScaleCount,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W101").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::InvertedRange => "W101",
            WarningCode::ShadowedStaticValue => "W102",
            WarningCode::InvisibleRange => "W103",
            WarningCode::OutOfScaleCount => "W104",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Dotted path to the field (e.g., "radius_oscillation.meta.speed").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Dotted path to the field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning with a field path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A wave or palette name that does not exist.
    #[error("unknown {kind} name '{name}'")]
    UnknownName {
        /// Which selector was being parsed.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },
}

/// Result of configuration validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if any warning carries the given code.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Returns true if any error carries the given code.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
