//! Affine image resampling with a Catmull-Rom filter.

use super::composite::blend_premultiplied;
use image::RgbaImage;
use kurbo::{Affine, Rect};

/// Kernel radius in source pixels at 1:1 scale.
const SUPPORT: f64 = 2.0;

/// Catmull-Rom cubic (B = 0, C = 0.5).
pub(crate) fn catmull_rom(t: f64) -> f64 {
    let t = t.abs();
    if t < 1.0 {
        (1.5 * t - 2.5) * t * t + 1.0
    } else if t < SUPPORT {
        ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
    } else {
        0.0
    }
}

/// Copy of `image` with a transparent border of `margin` pixels.
pub(crate) fn pad_transparent(image: &RgbaImage, margin: u32) -> RgbaImage {
    let mut padded = RgbaImage::new(image.width() + 2 * margin, image.height() + 2 * margin);
    image::imageops::replace(&mut padded, image, margin as i64, margin as i64);
    padded
}

/// Composite `src` over `dst`, mapping source pixel coordinates to
/// destination pixel coordinates with `s2d`.
///
/// Every destination pixel whose center maps inside the source is resampled.
/// When the map shrinks the image the kernel is widened accordingly.
pub(crate) fn transform_over(dst: &mut RgbaImage, s2d: Affine, src: &RgbaImage) {
    let (src_width, src_height) = src.dimensions();
    let (dst_width, dst_height) = dst.dimensions();
    if src_width == 0 || src_height == 0 {
        return;
    }
    if s2d.determinant().abs() < 1e-12 || !s2d.is_finite() {
        log::trace!("Skipping image with singular transform {:?}", s2d);
        return;
    }

    let area = s2d.transform_rect_bbox(Rect::new(0.0, 0.0, src_width as f64, src_height as f64));
    let x_range = area.x0.floor().clamp(0.0, dst_width as f64) as u32
        ..area.x1.ceil().clamp(0.0, dst_width as f64) as u32;
    let y_range = area.y0.floor().clamp(0.0, dst_height as f64) as u32
        ..area.y1.ceil().clamp(0.0, dst_height as f64) as u32;

    let d2s = s2d.inverse();
    let [a, b, c, d, e, f] = d2s.as_coeffs();
    let x_scale = a.abs().max(c.abs()).max(1.0);
    let y_scale = b.abs().max(d.abs()).max(1.0);

    let mut x_weights = Vec::new();
    let mut y_weights = Vec::new();
    for dy in y_range {
        let py = dy as f64 + 0.5;
        for dx in x_range.clone() {
            let px = dx as f64 + 0.5;
            let sx = a * px + c * py + e;
            let sy = b * px + d * py + f;
            if !(0.0..src_width as f64).contains(&sx) || !(0.0..src_height as f64).contains(&sy) {
                continue;
            }

            let x0 = kernel_weights(sx - 0.5, x_scale, src_width, &mut x_weights);
            let y0 = kernel_weights(sy - 0.5, y_scale, src_height, &mut y_weights);

            let mut sum = [0.0f64; 4];
            for (j, &wy) in y_weights.iter().enumerate() {
                if wy == 0.0 {
                    continue;
                }
                for (i, &wx) in x_weights.iter().enumerate() {
                    let w = wx * wy;
                    if w == 0.0 {
                        continue;
                    }
                    let p = src.get_pixel(x0 + i as u32, y0 + j as u32);
                    let alpha = p[3] as f64 / 255.0;
                    sum[0] += p[0] as f64 / 255.0 * alpha * w;
                    sum[1] += p[1] as f64 / 255.0 * alpha * w;
                    sum[2] += p[2] as f64 / 255.0 * alpha * w;
                    sum[3] += alpha * w;
                }
            }

            // Negative lobes can push the alpha sum outside 0..=1; take the
            // color relative to the unclamped alpha so edges keep their hue.
            let alpha = sum[3];
            if alpha <= 0.0 {
                continue;
            }
            let clamped = alpha.min(1.0);
            let premul = |v: f64| ((v / alpha).clamp(0.0, 1.0) * clamped) as f32;
            blend_premultiplied(
                dst.get_pixel_mut(dx, dy),
                [premul(sum[0]), premul(sum[1]), premul(sum[2]), clamped as f32],
            );
        }
    }
}

/// Fill `weights` with the normalized filter taps around `center` and
/// return the index of the first tap. Taps are clamped to `0..len`.
fn kernel_weights(center: f64, scale: f64, len: u32, weights: &mut Vec<f64>) -> u32 {
    let half = SUPPORT * scale;
    let start = (center - half).floor().max(0.0) as u32;
    let end = ((center + half).ceil().max(0.0) as u32).min(len);

    weights.clear();
    let mut total = 0.0;
    for k in start..end {
        let w = catmull_rom((center - k as f64) / scale);
        weights.push(w);
        total += w;
    }
    if total != 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }
    start
}
