//! Per-image conversion configuration.
//!
//! An [`ImageConfig`] describes how one image is transformed and encoded.
//! It is owned by the caller and copied into each job at submission time;
//! the pipeline never mutates it. New configurations start from
//! [`ImageConfig::default`], the explicit stand-in for a per-batch template.

use crate::color::Color;

/// Default 1-bit threshold exposed to callers.
///
/// Carried on the configuration for API compatibility; the 1-bit encoder
/// currently applies a fixed darkness cutoff instead (see `encode::gray1`).
pub const DEFAULT_THRESHOLD: u8 = 128;

/// The pixel encoding emitted for an image.
///
/// Each variant maps to one literal format with its own element width,
/// packing rule and wrap width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelEncoding {
    /// 1 bit per pixel packed 8 pixels per byte, for monochrome OLEDs.
    #[default]
    Grayscale1Bit,
    /// 16-bit 5-6-5 color, one `uint16_t` per pixel.
    Rgb565,
    /// 24-bit color stored in a `uint32_t` per pixel.
    Rgb888,
    /// 32-bit color with alpha, one `uint32_t` per pixel.
    Rgba8888,
}

impl PixelEncoding {
    /// Stable lowercase name, used in results and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelEncoding::Grayscale1Bit => "grayscale",
            PixelEncoding::Rgb565 => "rgb565",
            PixelEncoding::Rgb888 => "rgb888",
            PixelEncoding::Rgba8888 => "rgba8888",
        }
    }
}

impl std::fmt::Display for PixelEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transform and encoding parameters for one image.
///
/// Field semantics:
/// - `canvas_width`/`canvas_height`: target dimensions. Both set (> 0) means
///   use them as-is; one set means derive the other from the source aspect
///   ratio; neither set means keep the source dimensions.
/// - `background_color`: fill for surface areas the drawn image does not
///   cover (visible after rotation).
/// - `rotation_degrees`: clockwise-positive rotation about the surface
///   center.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageConfig {
    /// Target width in pixels; 0 means unset.
    pub canvas_width: u32,

    /// Target height in pixels; 0 means unset.
    pub canvas_height: u32,

    /// Surface fill color.
    pub background_color: Color,

    /// Invert R, G and B after the transform; alpha is untouched.
    pub invert_colors: bool,

    /// Literal format to emit.
    pub pixel_encoding: PixelEncoding,

    /// 1-bit darkness threshold (0-255). Accepted but not applied; the
    /// 1-bit encoder uses its fixed cutoff.
    pub threshold: u8,

    /// Clockwise rotation in degrees.
    pub rotation_degrees: i32,

    /// Mirror across the vertical axis.
    pub flip_horizontal: bool,

    /// Mirror across the horizontal axis.
    pub flip_vertical: bool,
}

impl ImageConfig {
    /// Returns true when any of rotation or the two flips is active, i.e.
    /// the transform must go through the centered affine draw path.
    pub fn has_orientation_change(&self) -> bool {
        self.rotation_degrees != 0 || self.flip_horizontal || self.flip_vertical
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            canvas_width: 0,
            canvas_height: 0,
            background_color: Color::default(),
            invert_colors: false,
            pixel_encoding: PixelEncoding::default(),
            threshold: DEFAULT_THRESHOLD,
            rotation_degrees: 0,
            flip_horizontal: false,
            flip_vertical: false,
        }
    }
}
