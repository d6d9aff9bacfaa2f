//! Source-over compositing into straight-alpha RGBA buffers.

use image::{Rgba, RgbaImage};
use tiny_skia::Mask;

/// Composite `color` through `mask` onto `dst` with the mask's top-left
/// corner at buffer position `origin`.
///
/// Pixels with zero coverage, and mask pixels falling outside `dst`, are
/// untouched.
pub(crate) fn draw_mask(dst: &mut RgbaImage, mask: &Mask, origin: (u32, u32), color: [u8; 4]) {
    let (dst_width, dst_height) = dst.dimensions();
    let width = mask.width();
    for (i, &coverage) in mask.data().iter().enumerate() {
        if coverage == 0 {
            continue;
        }
        let (x, y) = (origin.0 + i as u32 % width, origin.1 + i as u32 / width);
        if x >= dst_width || y >= dst_height {
            continue;
        }
        blend_over(dst.get_pixel_mut(x, y), color, coverage);
    }
}

/// Blend a straight-alpha color scaled by `coverage` over `dst`.
pub(crate) fn blend_over(dst: &mut Rgba<u8>, color: [u8; 4], coverage: u8) {
    let alpha = color[3] as f32 / 255.0 * (coverage as f32 / 255.0);
    blend_premultiplied(
        dst,
        [
            color[0] as f32 / 255.0 * alpha,
            color[1] as f32 / 255.0 * alpha,
            color[2] as f32 / 255.0 * alpha,
            alpha,
        ],
    );
}

/// Blend a premultiplied color (components in `0..=1`) over `dst`.
pub(crate) fn blend_premultiplied(dst: &mut Rgba<u8>, src: [f32; 4]) {
    let src_alpha = src[3].clamp(0.0, 1.0);
    if src_alpha <= 0.0 {
        return;
    }
    let dst_alpha = dst[3] as f32 / 255.0;
    let keep = dst_alpha * (1.0 - src_alpha);
    let out_alpha = src_alpha + keep;

    for c in 0..3 {
        let premul = src[c].clamp(0.0, src_alpha) + dst[c] as f32 / 255.0 * keep;
        dst[c] = to_u8(premul / out_alpha);
    }
    dst[3] = to_u8(out_alpha);
}

fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
