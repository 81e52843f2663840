//! 1-bit grayscale packing for monochrome OLED framebuffers.
//!
//! Each row is split into groups of 8 columns; within a group, bit 7 (MSB)
//! corresponds to the leftmost column. A bit is set when the pixel's luma
//! falls below [`DARKNESS_CUTOFF`]. Columns past the image width inside the
//! last group stay clear but still occupy their bit position, so every row
//! packs to `ceil(width / 8)` bytes.

use image::RgbaImage;

use super::layout::LiteralWriter;

/// Fixed darkness cutoff: luma below this sets the bit.
///
/// The user-facing threshold setting is not consulted here; the cutoff is
/// a constant of the format.
pub const DARKNESS_CUTOFF: u8 = 69;

/// Elements per output line.
const ELEMENTS_PER_LINE: usize = 16;

/// Perceptual brightness of an RGB pixel, rounded to the nearest integer.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64).round() as u8
}

/// Encodes the buffer as a `uint8_t` PROGMEM declaration.
pub fn encode(buffer: &RgbaImage, name: &str) -> String {
    let width = buffer.width();
    let height = buffer.height();
    let bytes_per_row = width.div_ceil(8) as usize;
    let total = bytes_per_row * height as usize;

    let mut writer = LiteralWriter::new(name, "uint8_t", Some("PROGMEM"), ELEMENTS_PER_LINE, 2, total);

    for y in 0..height {
        for group in (0..width).step_by(8) {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = group + bit;
                if x < width {
                    let pixel = buffer.get_pixel(x, y).0;
                    if luma(pixel[0], pixel[1], pixel[2]) < DARKNESS_CUTOFF {
                        byte |= 1 << (7 - bit);
                    }
                }
            }
            writer.push(byte as u32);
        }
    }

    writer.finish()
}
