//! Export errors.

use thiserror::Error;

/// Errors from writing rendered frames to image files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("GIF encoding error: {0}")]
    Gif(#[from] gif::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}
