//! Geometric and color preprocessing of decoded bitmaps.
//!
//! [`transform`] turns a decoded source image plus an [`ImageConfig`] into
//! the canonical RGBA buffer the encoders consume. The step order is fixed:
//! output dimensions, background fill, draw (plain or oriented), then color
//! inversion. Outputs are bit-exact sensitive to this sequence.
//!
//! Two draw paths exist. The plain path scales the source onto the surface
//! directly. The oriented path runs the rendering sequence
//! translate-rotate-mirror-draw as one inverse-mapped affine transform
//! (see [`affine::Affine2`]); destination pixels the rotated source does
//! not cover keep the background fill. Both paths share one sampler, so an
//! identity orientation produces pixel-identical output to the plain path.

mod affine;
mod sample;

pub use affine::Affine2;

use image::RgbaImage;
use tracing::debug;

use crate::color::Color;
use crate::config::ImageConfig;
use sample::{composite_over, sample_bilinear};

/// Computes the output dimensions for a source of `src_w` x `src_h`.
///
/// Both canvas dimensions set: used as-is (non-uniform scaling permitted).
/// One set: the other preserves the source aspect ratio, rounded to the
/// nearest integer. Neither: the source's native dimensions.
pub fn output_dimensions(src_w: u32, src_h: u32, config: &ImageConfig) -> (u32, u32) {
    if config.canvas_width > 0 && config.canvas_height > 0 {
        (config.canvas_width, config.canvas_height)
    } else if config.canvas_width > 0 {
        let aspect = src_h as f64 / src_w as f64;
        let width = config.canvas_width;
        (width, (width as f64 * aspect).round() as u32)
    } else if config.canvas_height > 0 {
        let aspect = src_w as f64 / src_h as f64;
        let height = config.canvas_height;
        ((height as f64 * aspect).round() as u32, height)
    } else {
        (src_w, src_h)
    }
}

/// Applies the configured preprocessing to a decoded bitmap.
///
/// Returns an RGBA buffer of the dimensions reported by
/// [`output_dimensions`]. Pure given its inputs; decoding has already
/// happened, so this stage cannot fail.
pub fn transform(source: &RgbaImage, config: &ImageConfig) -> RgbaImage {
    let (out_w, out_h) = output_dimensions(source.width(), source.height(), config);

    let background = config.background_color;
    let mut surface = RgbaImage::from_pixel(out_w, out_h, background.to_pixel());

    if config.has_orientation_change() {
        let orientation = orientation_transform(config, out_w, out_h);
        draw_oriented(&mut surface, source, background, &orientation);
    } else {
        draw_scaled(&mut surface, source, background);
    }

    if config.invert_colors {
        invert_in_place(&mut surface);
    }

    debug!(
        src_width = source.width(),
        src_height = source.height(),
        out_width = out_w,
        out_height = out_h,
        oriented = config.has_orientation_change(),
        "Transformed image"
    );

    surface
}

/// Builds the forward orientation transform: mirror, then rotate, then
/// translate to the surface center. The draw rectangle is centered at the
/// origin before this transform applies.
fn orientation_transform(config: &ImageConfig, out_w: u32, out_h: u32) -> Affine2 {
    let sx = if config.flip_horizontal { -1.0 } else { 1.0 };
    let sy = if config.flip_vertical { -1.0 } else { 1.0 };

    Affine2::scale(sx, sy)
        .then(&Affine2::rotation_degrees(config.rotation_degrees as f64))
        .then(&Affine2::translation(
            out_w as f64 / 2.0,
            out_h as f64 / 2.0,
        ))
}

/// Plain path: source scaled to exactly fill the surface.
fn draw_scaled(surface: &mut RgbaImage, source: &RgbaImage, background: Color) {
    if source.width() == 0 || source.height() == 0 {
        return;
    }

    let (out_w, out_h) = (surface.width(), surface.height());
    let scale_x = source.width() as f64 / out_w as f64;
    let scale_y = source.height() as f64 / out_h as f64;

    for dy in 0..out_h {
        for dx in 0..out_w {
            let tx = (dx as f64 + 0.5) * scale_x - 0.5;
            let ty = (dy as f64 + 0.5) * scale_y - 0.5;
            let sampled = sample_bilinear(source, tx, ty);
            surface.put_pixel(dx, dy, composite_over(sampled, background));
        }
    }
}

/// Oriented path: inverse-maps every destination pixel through the
/// orientation transform into the centered draw rectangle; pixels that
/// land outside it keep the background fill.
fn draw_oriented(
    surface: &mut RgbaImage,
    source: &RgbaImage,
    background: Color,
    orientation: &Affine2,
) {
    if source.width() == 0 || source.height() == 0 {
        return;
    }

    let Some(inverse) = orientation.invert() else {
        // Rotations, mirrors and translations always invert; nothing to
        // draw if a degenerate transform slips through.
        return;
    };

    let (out_w, out_h) = (surface.width(), surface.height());
    let (w, h) = (out_w as f64, out_h as f64);
    let scale_x = source.width() as f64 / w;
    let scale_y = source.height() as f64 / h;

    for dy in 0..out_h {
        for dx in 0..out_w {
            let (lx, ly) = inverse.apply(dx as f64 + 0.5, dy as f64 + 0.5);

            // Position within the draw rectangle, origin at its top-left.
            let qx = lx + w / 2.0;
            let qy = ly + h / 2.0;

            if qx < 0.0 || qx >= w || qy < 0.0 || qy >= h {
                continue;
            }

            let sampled = sample_bilinear(source, qx * scale_x - 0.5, qy * scale_y - 0.5);
            surface.put_pixel(dx, dy, composite_over(sampled, background));
        }
    }
}

/// Inverts R, G and B in place; alpha is untouched.
fn invert_in_place(surface: &mut RgbaImage) {
    for pixel in surface.pixels_mut() {
        pixel.0[0] = 255 - pixel.0[0];
        pixel.0[1] = 255 - pixel.0[1];
        pixel.0[2] = 255 - pixel.0[2];
    }
}
