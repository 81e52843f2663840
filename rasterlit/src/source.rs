//! Source image container and decoding.
//!
//! A [`SourceImage`] carries the raw encoded bytes the caller read from an
//! upload or a file, together with the identifier the generated literal will
//! declare. Decoding happens inside the worker that processes the job, so a
//! corrupt file fails only its own job.

use image::RgbaImage;
use tracing::debug;

use crate::error::StageError;

/// One image awaiting conversion.
///
/// The name is derived from the original filename by the caller (see
/// [`name_from_filename`]); duplicate names are permitted and simply
/// produce duplicate declaration identifiers downstream.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Identifier for the generated declaration (pre-sanitization).
    pub name: String,

    /// Raw encoded bytes (PNG, JPEG, GIF or BMP).
    pub data: Vec<u8>,
}

impl SourceImage {
    /// Creates a source image with an explicit name.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Creates a source image named after a filename, extension stripped.
    pub fn from_filename(filename: &str, data: Vec<u8>) -> Self {
        Self::new(name_from_filename(filename), data)
    }

    /// Decodes the raw bytes into an RGBA bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::DecodeFailed`] when the bytes are corrupt or in
    /// an unsupported format.
    pub fn decode(&self) -> Result<RgbaImage, StageError> {
        let decoded = image::load_from_memory(&self.data)?;
        let rgba = decoded.to_rgba8();

        debug!(
            name = %self.name,
            width = rgba.width(),
            height = rgba.height(),
            "Decoded source image"
        );

        Ok(rgba)
    }
}

/// Derives the declaration name from a filename: everything before the
/// first `.`, matching how upload filenames are shortened.
pub fn name_from_filename(filename: &str) -> &str {
    filename.split('.').next().unwrap_or(filename)
}
