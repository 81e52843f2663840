//! 24-bit color packing, stored in 32-bit words.

use image::RgbaImage;

use super::layout::LiteralWriter;

/// Elements per output line.
const ELEMENTS_PER_LINE: usize = 10;

/// Packs one pixel into the low 24 bits of a word; alpha is ignored.
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Encodes the buffer as a `uint32_t` declaration, one word per pixel,
/// row-major. Elements are zero-extended to 8 hex digits.
pub fn encode(buffer: &RgbaImage, name: &str) -> String {
    let total = (buffer.width() * buffer.height()) as usize;
    let mut writer = LiteralWriter::new(name, "uint32_t", None, ELEMENTS_PER_LINE, 8, total);

    for pixel in buffer.pixels() {
        let [r, g, b, _] = pixel.0;
        writer.push(pack(r, g, b));
    }

    writer.finish()
}
