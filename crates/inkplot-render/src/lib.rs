//! inkplot Render Library
//!
//! Renderer abstraction and its two backends: an Encapsulated PostScript
//! writer and a raster renderer drawing into an RGBA pixel buffer.

mod eps;
mod raster;
mod renderer;

pub use eps::EpsRenderer;
pub use raster::{MAX_IMAGE_MARGIN, RasterConfig, RasterRenderer};
pub use renderer::{RenderResult, Renderer, RendererError};
