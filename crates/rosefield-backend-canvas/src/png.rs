//! Deterministic PNG writer.
//!
//! Fixed compression and filter settings keep the output byte-identical for
//! identical pixels, so a frame's BLAKE3 hash identifies its content.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::error::ExportError;
use crate::raster::PixelBuffer;

/// PNG export settings.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Fixed per config so output is reproducible.
    pub compression: Compression,
    /// Row filter.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Smallest files, slowest encode.
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Fastest encode, larger files.
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Writes a frame to a PNG file.
pub fn write_rgba(buffer: &PixelBuffer, path: &Path, config: &PngConfig) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);

    write_rgba_to_writer(buffer, writer, config)
}

/// Writes a frame as PNG to any writer.
pub fn write_rgba_to_writer<W: Write>(
    buffer: &PixelBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), ExportError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(ExportError::InvalidDimensions(format!(
            "cannot encode a {}x{} frame",
            buffer.width, buffer.height
        )));
    }

    let mut encoder = Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.to_rgba8())?;

    Ok(())
}

/// BLAKE3 hash of encoded PNG bytes, as hex.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Encodes a frame to memory and returns the bytes with their hash.
pub fn write_rgba_to_vec_with_hash(
    buffer: &PixelBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), ExportError> {
    let mut data = Vec::new();
    write_rgba_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}
