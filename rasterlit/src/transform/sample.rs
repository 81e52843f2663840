//! Source sampling and compositing for the draw paths.
//!
//! Both draw paths read the source through the same bilinear sampler and
//! composite with the same source-over rule, which is what keeps the plain
//! resize path and the oriented path pixel-identical when the orientation
//! transform is the identity.

use image::{Rgba, RgbaImage};

use crate::color::Color;

/// Samples the source bilinearly at texel coordinates `(x, y)`.
///
/// Coordinates follow the half-texel convention: `(0, 0)` is the center of
/// the top-left pixel. Out-of-range reads clamp to the edge. Channels are
/// returned unrounded so compositing can work at full precision.
pub(crate) fn sample_bilinear(src: &RgbaImage, x: f64, y: f64) -> [f64; 4] {
    let (w, h) = (src.width() as i64, src.height() as i64);

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;

    let clamp_x = |v: i64| v.clamp(0, w - 1) as u32;
    let clamp_y = |v: i64| v.clamp(0, h - 1) as u32;

    let x0i = x0 as i64;
    let y0i = y0 as i64;

    let p00 = src.get_pixel(clamp_x(x0i), clamp_y(y0i)).0;
    let p10 = src.get_pixel(clamp_x(x0i + 1), clamp_y(y0i)).0;
    let p01 = src.get_pixel(clamp_x(x0i), clamp_y(y0i + 1)).0;
    let p11 = src.get_pixel(clamp_x(x0i + 1), clamp_y(y0i + 1)).0;

    let mut out = [0.0f64; 4];
    for ch in 0..4 {
        out[ch] = p00[ch] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[ch] as f64 * fx * (1.0 - fy)
            + p01[ch] as f64 * (1.0 - fx) * fy
            + p11[ch] as f64 * fx * fy;
    }
    out
}

/// Composites a sampled source pixel over a background color (source-over).
pub(crate) fn composite_over(sample: [f64; 4], background: Color) -> Rgba<u8> {
    let src_alpha = sample[3] / 255.0;
    let bg_alpha = background.a as f64 / 255.0;
    let out_alpha = src_alpha + bg_alpha * (1.0 - src_alpha);

    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |src: f64, bg: u8| -> u8 {
        let v = (src * src_alpha + bg as f64 * bg_alpha * (1.0 - src_alpha)) / out_alpha;
        v.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(sample[0], background.r),
        blend(sample[1], background.g),
        blend(sample[2], background.b),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
