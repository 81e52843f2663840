//! 32-bit color-with-alpha packing.

use image::RgbaImage;

use super::layout::LiteralWriter;

/// Elements per output line.
const ELEMENTS_PER_LINE: usize = 12;

/// Packs one pixel into an RGBA word, red in the top byte.
pub fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32)
}

/// Encodes the buffer as a `uint32_t` declaration, one word per pixel,
/// row-major.
pub fn encode(buffer: &RgbaImage, name: &str) -> String {
    let total = (buffer.width() * buffer.height()) as usize;
    let mut writer = LiteralWriter::new(name, "uint32_t", None, ELEMENTS_PER_LINE, 8, total);

    for pixel in buffer.pixels() {
        let [r, g, b, a] = pixel.0;
        writer.push(pack(r, g, b, a));
    }

    writer.finish()
}
