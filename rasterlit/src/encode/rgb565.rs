//! 16-bit 5-6-5 color packing.

use image::RgbaImage;

use super::layout::LiteralWriter;

/// Elements per output line.
const ELEMENTS_PER_LINE: usize = 12;

/// Packs one pixel into a 5-6-5 word; alpha is ignored.
pub fn pack(r: u8, g: u8, b: u8) -> u16 {
    (((r >> 3) as u16) << 11) | (((g >> 2) as u16) << 5) | ((b >> 3) as u16)
}

/// Encodes the buffer as a `uint16_t` declaration, one word per pixel,
/// row-major.
pub fn encode(buffer: &RgbaImage, name: &str) -> String {
    let total = (buffer.width() * buffer.height()) as usize;
    let mut writer = LiteralWriter::new(name, "uint16_t", None, ELEMENTS_PER_LINE, 4, total);

    for pixel in buffer.pixels() {
        let [r, g, b, _] = pixel.0;
        writer.push(pack(r, g, b) as u32);
    }

    writer.finish()
}
