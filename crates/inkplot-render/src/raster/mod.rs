//! Raster renderer drawing into an RGBA pixel buffer.
//!
//! User space is bottom-up; the buffer is top-down, so user `y = 0` is the
//! last buffer row. Paths are scan-converted only inside the window of the
//! buffer their bounds (plus stroke) cover.

mod composite;
mod config;
mod resample;
mod window;

pub use config::{MAX_IMAGE_MARGIN, RasterConfig};

use crate::renderer::{RenderResult, Renderer, RendererError};
use composite::draw_mask;
use image::RgbaImage;
use inkplot_core::{Color, FillRule, PathExt, Style, rgba8};
use kurbo::{Affine, BezPath, Point, Size};
use window::DeviceWindow;

/// Renderer that rasterizes into a borrowed RGBA buffer.
pub struct RasterRenderer<'a> {
    /// Destination buffer, exclusively borrowed while the renderer lives.
    target: &'a mut RgbaImage,
    config: RasterConfig,
}

impl<'a> RasterRenderer<'a> {
    /// Create a renderer drawing at `dpm` device pixels per user unit.
    pub fn new(target: &'a mut RgbaImage, dpm: f64) -> RenderResult<Self> {
        Self::with_config(target, RasterConfig::new(dpm))
    }

    /// Create a renderer with explicit settings.
    pub fn with_config(target: &'a mut RgbaImage, config: RasterConfig) -> RenderResult<Self> {
        config.validate()?;
        let (width, height) = target.dimensions();
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidTarget(format!(
                "target buffer has no pixels ({}x{})",
                width, height
            )));
        }
        Ok(Self { target, config })
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Device pixels per user-space unit.
    pub fn dpm(&self) -> f64 {
        self.config.dpm
    }

    pub fn target(&self) -> &RgbaImage {
        &*self.target
    }

    /// Scan-convert `path` (already relative to `window`) and composite
    /// `color` through the coverage.
    fn paint(&mut self, path: &BezPath, window: &DeviceWindow, fill_rule: FillRule, color: Color) {
        let Some(mask) = path.to_mask(window.width, window.height, self.config.dpm, fill_rule) else {
            return;
        };
        let origin = (window.x, window.top(self.target.height()));
        draw_mask(self.target, &mask, origin, rgba8(color));
    }
}

impl Renderer for RasterRenderer<'_> {
    fn size(&self) -> Size {
        let (width, height) = self.target.dimensions();
        Size::new(width as f64 / self.config.dpm, height as f64 / self.config.dpm)
    }

    fn render_path(&mut self, path: &BezPath, style: &Style, transform: Affine) -> RenderResult<()> {
        if path.elements().is_empty() || !(style.has_fill() || style.has_stroke()) {
            return Ok(());
        }
        let dpm = self.config.dpm;
        let path = path.transformed(transform);
        let (width, height) = self.target.dimensions();

        let Some(window) = DeviceWindow::locate(path.bounds(), style.stroke_extent(), dpm, width, height) else {
            log::trace!("Path bounds {:?} fall outside the target", path.bounds());
            return Ok(());
        };
        log::trace!(
            "Drawing path in {}x{} device window at ({}, {}), clipped by {:?}",
            window.width,
            window.height,
            window.x,
            window.y,
            window.src_offset
        );

        let path = path.translated(-(window.x as f64) / dpm, -(window.y as f64) / dpm);
        if style.has_fill() {
            self.paint(&path, &window, style.fill_rule, style.fill_color);
        }
        if style.has_stroke() {
            let dashed = if style.is_dashed() {
                path.dashed(style.dash_offset, &style.dashes)
            } else {
                path
            };
            let outline = dashed.stroked(
                style.stroke_width,
                style.stroke_cap,
                style.stroke_join,
                style.miter_limit,
                self.config.user_tolerance(),
            );
            self.paint(&outline, &window, FillRule::NonZero, style.stroke_color);
        }
        Ok(())
    }

    fn render_image(&mut self, image: &RgbaImage, transform: Affine) -> RenderResult<()> {
        let (image_width, image_height) = image.dimensions();
        if image_width == 0 || image_height == 0 {
            return Ok(());
        }
        let dpm = self.config.dpm;

        // The image's top-left corner, in bottom-up device pixels.
        let origin = (transform * Point::new(0.0, image_height as f64)).to_vec2() * dpm;
        let [a, b, c, d, _, _] = transform.as_coeffs();
        let canvas_height = self.target.height() as f64;
        let image_to_device = Affine::new([
            dpm * a,
            -dpm * b,
            -dpm * c,
            dpm * d,
            origin.x,
            canvas_height - origin.y,
        ]);

        let margin = self.config.image_margin;
        let padded = resample::pad_transparent(image, margin);
        let unpad = Affine::translate((-(margin as f64), -(margin as f64)));
        resample::transform_over(self.target, image_to_device * unpad, &padded);
        Ok(())
    }
}
