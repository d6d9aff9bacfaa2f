//! Renderer trait abstraction.

use image::RgbaImage;
use inkplot_core::{Style, Text};
use kurbo::{Affine, BezPath, Size};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    /// Failure of the underlying output stream, passed through as is.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid render target: {0}")]
    InvalidTarget(String),
    #[error("Invalid renderer configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Trait for rendering backends.
///
/// Calls draw in the order they are made. Drawing geometry that ends up
/// outside the target or has no area is not an error.
pub trait Renderer {
    /// Drawable area in user-space units.
    fn size(&self) -> Size;

    /// Draw `path` mapped through `transform` with the given style.
    fn render_path(&mut self, path: &BezPath, style: &Style, transform: Affine) -> RenderResult<()>;

    /// Draw text as its colored outlines.
    ///
    /// Each outline is drawn with the default style and its own fill color.
    fn render_text(&mut self, text: &Text, transform: Affine) -> RenderResult<()> {
        let (paths, colors) = text.to_paths();
        for (path, color) in paths.iter().zip(colors) {
            let style = Style::default().with_fill(color);
            self.render_path(path, &style, transform)?;
        }
        Ok(())
    }

    /// Draw a raster image mapped through `transform`.
    ///
    /// One source pixel spans one user-space unit before the transform; the
    /// image's bottom-left corner sits at the user-space origin.
    fn render_image(&mut self, image: &RgbaImage, transform: Affine) -> RenderResult<()>;
}
