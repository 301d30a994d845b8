//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag on `validate` and `render`, and the dump
//! written by `trace`.

use rosefield_backend_canvas::{DrawCommand, FrameReport};
use rosefield_spec::{ConfigError, ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_003";
    /// Unknown wave or palette name
    pub const UNKNOWN_NAME: &str = "CLI_004";
    /// Export error (wraps PNG and GIF encoder errors)
    pub const EXPORT_ERROR: &str = "CLI_010";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E101")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W101")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Converts a config load error to a JSON error.
pub fn config_error_to_json(error: &ConfigError, file: &str) -> JsonError {
    let code = match error {
        ConfigError::Io(_) => error_codes::FILE_READ,
        ConfigError::JsonParse(_) => error_codes::JSON_PARSE,
        ConfigError::UnknownName { .. } => error_codes::UNKNOWN_NAME,
    };
    JsonError::new(code, error.to_string()).with_file(file)
}

/// Converts a validation error to a JSON error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    JsonError {
        code: error.code.to_string(),
        message: error.message.clone(),
        path: error.path.clone(),
        file: None,
    }
}

/// Converts a validation warning to a JSON warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warning.code.to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether the configuration is valid
    pub success: bool,
    /// Errors found
    pub errors: Vec<JsonError>,
    /// Warnings found
    pub warnings: Vec<JsonWarning>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// One written frame in `render` output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedFrame {
    /// Frame index within the session
    pub frame: u64,
    /// Output path
    pub path: String,
    /// BLAKE3 hash of the PNG bytes
    pub hash: String,
}

/// JSON output for the `render` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Whether every frame was written
    pub success: bool,
    /// Frames written, in order
    pub frames: Vec<RenderedFrame>,
    /// Load, validation or export errors; no frames are written when present
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
}

/// The dump written by `trace`.
#[derive(Debug, Clone, Serialize)]
pub struct TraceOutput {
    /// Resolved parameters and draw counts
    pub report: FrameReport,
    /// Every surface call made for the frame
    pub commands: Vec<DrawCommand>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rosefield_spec::ErrorCode;

    #[test]
    fn test_validation_error_carries_code_and_path() {
        let error = ValidationError::with_path(ErrorCode::NonFiniteNumber, "radius is NaN", "radius");
        let json = validation_error_to_json(&error);
        assert_eq!(json.code, ErrorCode::NonFiniteNumber.to_string());
        assert_eq!(json.path.as_deref(), Some("radius"));
    }

    #[test]
    fn test_optional_fields_are_skipped() {
        let json = serde_json::to_value(JsonError::new(error_codes::FILE_READ, "missing")).unwrap();
        assert!(json.get("path").is_none());
        assert!(json.get("file").is_none());
    }

    #[test]
    fn test_config_error_codes() {
        let err = ConfigError::UnknownName {
            kind: "wave",
            name: "zigzag".to_string(),
        };
        assert_eq!(config_error_to_json(&err, "a.json").code, error_codes::UNKNOWN_NAME);
    }

    #[test]
    fn test_failed_render_output_shape() {
        let output = RenderOutput {
            success: false,
            frames: Vec::new(),
            errors: vec![JsonError::new("E103", "radius must be >= 0")],
            warnings: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({
                "success": false,
                "frames": [],
                "errors": [{ "code": "E103", "message": "radius must be >= 0" }],
                "warnings": []
            })
        );
    }
}
