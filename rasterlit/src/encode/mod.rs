//! Pixel encoders: RGBA buffer to array-literal text.
//!
//! One encoder per [`PixelEncoding`] variant. Every encoder is pure and
//! total on a well-formed buffer, and all of them share the
//! [`layout::LiteralWriter`] so declarations only differ in element type,
//! element width, wrap width and packing rule:
//!
//! | Encoding       | Element    | Per line | Packing                        |
//! |----------------|------------|----------|--------------------------------|
//! | Grayscale1Bit  | `uint8_t`  | 16       | 8 pixels/byte, luma cutoff     |
//! | Rgb565         | `uint16_t` | 12       | `R>>3 << 11 \| G>>2 << 5 \| B>>3` |
//! | Rgb888         | `uint32_t` | 10       | `R<<16 \| G<<8 \| B`           |
//! | Rgba8888       | `uint32_t` | 12       | `R<<24 \| G<<16 \| B<<8 \| A`  |

pub mod gray1;
mod layout;
pub mod rgb565;
pub mod rgb888;
pub mod rgba8888;

pub use layout::sanitize_identifier;

use image::RgbaImage;

use crate::config::PixelEncoding;

/// Encodes a transformed buffer into literal text for the given encoding.
pub fn encode(buffer: &RgbaImage, name: &str, encoding: PixelEncoding) -> String {
    match encoding {
        PixelEncoding::Grayscale1Bit => gray1::encode(buffer, name),
        PixelEncoding::Rgb565 => rgb565::encode(buffer, name),
        PixelEncoding::Rgb888 => rgb888::encode(buffer, name),
        PixelEncoding::Rgba8888 => rgba8888::encode(buffer, name),
    }
}
