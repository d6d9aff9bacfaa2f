//! Path kernel operations used by the renderers.
//!
//! Geometry is kurbo's [`BezPath`]; this module adds the derived-copy
//! operations the backends need (transform, dash, stroke) and the
//! scan-conversion entry point that fills a coverage mask.

use crate::style::FillRule;
use kurbo::{Affine, BezPath, Cap, Join, PathEl, Rect, Shape as KurboShape, Stroke, StrokeOpts};
use tiny_skia::{Mask, PathBuilder, Transform};

/// Derived-copy operations on a path. The receiver is never mutated.
pub trait PathExt {
    /// Copy of the path mapped through `affine`.
    fn transformed(&self, affine: Affine) -> BezPath;

    /// Copy of the path moved by `(dx, dy)`.
    fn translated(&self, dx: f64, dy: f64) -> BezPath;

    /// Axis-aligned bounding box. Zero rect for a path without segments.
    fn bounds(&self) -> Rect;

    /// Split the path into the "on" pieces of a dash pattern.
    ///
    /// Invalid patterns (empty, negative or non-finite entries, zero total)
    /// leave the path undashed.
    fn dashed(&self, offset: f64, pattern: &[f64]) -> BezPath;

    /// Outline of the path drawn with the given stroke parameters.
    fn stroked(&self, width: f64, cap: Cap, join: Join, miter_limit: f64, tolerance: f64) -> BezPath;

    /// Scan-convert into an anti-aliased coverage mask of `width` x `height`.
    ///
    /// Path units are scaled by `dpm`. The path is bottom-up, the mask is
    /// top-down, so mask row 0 corresponds to user `y = height / dpm`.
    fn to_mask(&self, width: u32, height: u32, dpm: f64, fill_rule: FillRule) -> Option<Mask>;

    /// PostScript path construction operators.
    fn to_ps(&self) -> String;
}

impl PathExt for BezPath {
    fn transformed(&self, affine: Affine) -> BezPath {
        let mut path = self.clone();
        path.apply_affine(affine);
        path
    }

    fn translated(&self, dx: f64, dy: f64) -> BezPath {
        self.transformed(Affine::translate((dx, dy)))
    }

    fn bounds(&self) -> Rect {
        self.bounding_box()
    }

    fn dashed(&self, offset: f64, pattern: &[f64]) -> BezPath {
        if !is_valid_dash_pattern(pattern) {
            log::warn!("Ignoring invalid dash pattern {:?}", pattern);
            return self.clone();
        }
        kurbo::dash(self.iter(), offset, pattern).collect()
    }

    fn stroked(&self, width: f64, cap: Cap, join: Join, miter_limit: f64, tolerance: f64) -> BezPath {
        let stroke = Stroke::new(width)
            .with_caps(cap)
            .with_join(join)
            .with_miter_limit(miter_limit);
        kurbo::stroke(self.iter(), &stroke, &StrokeOpts::default(), tolerance)
    }

    fn to_mask(&self, width: u32, height: u32, dpm: f64, fill_rule: FillRule) -> Option<Mask> {
        let mut mask = Mask::new(width, height)?;
        let device = Affine::new([dpm, 0.0, 0.0, -dpm, 0.0, height as f64]);
        let path = to_skia_path(&self.transformed(device))?;
        mask.fill_path(&path, fill_rule.to_skia(), true, Transform::identity());
        Some(mask)
    }

    fn to_ps(&self) -> String {
        crate::ps::path_to_ps(self)
    }
}

fn is_valid_dash_pattern(pattern: &[f64]) -> bool {
    !pattern.is_empty()
        && pattern.iter().all(|d| d.is_finite() && *d >= 0.0)
        && pattern.iter().sum::<f64>() > 0.0
}

/// Convert a kurbo path (already in device pixels) for tiny-skia.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
