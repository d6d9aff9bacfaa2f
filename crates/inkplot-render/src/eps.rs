//! Encapsulated PostScript renderer.
//!
//! Paths are written as filled PostScript paths. Stroking and embedded
//! images are not supported and draw nothing.

use crate::renderer::{RenderResult, Renderer};
use image::RgbaImage;
use inkplot_core::{Color, Dec, PathExt, Style, rgba8};
use kurbo::{Affine, BezPath, Size};
use std::io::Write;

/// Ellipse arc helpers: `x y xrad yrad startangle endangle rot ellipse`
/// (counter-clockwise) and `ellipsen` (clockwise).
const ELLIPSE_DEFS: &str = "/ellipse {
/rot exch def
/endangle exch def
/startangle exch def
/yrad exch def
/xrad exch def
/y exch def
/x exch def
/savematrix matrix currentmatrix def
x y translate
rot rotate
xrad yrad scale
0 0 1 startangle endangle arc
savematrix setmatrix
} def /ellipsen {
/rot exch def
/endangle exch def
/startangle exch def
/yrad exch def
/xrad exch def
/y exch def
/x exch def
/savematrix matrix currentmatrix def
x y translate
rot rotate
xrad yrad scale
0 0 1 startangle endangle arcn
savematrix setmatrix
} def";

/// Renderer writing an EPS document to `W`.
pub struct EpsRenderer<W: Write> {
    writer: W,
    width: f64,
    height: f64,
    /// Last color set in the document. PostScript starts out black.
    color: [u8; 4],
}

impl<W: Write> EpsRenderer<W> {
    /// Start a document of `width` x `height` units.
    ///
    /// Writes the header and the shared operator definitions.
    pub fn new(mut writer: W, width: f64, height: f64) -> RenderResult<Self> {
        write!(
            writer,
            "%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 {} {}\n",
            Dec(width),
            Dec(height)
        )?;
        writer.write_all(ELLIPSE_DEFS.as_bytes())?;
        log::debug!("Started EPS document {}x{}", Dec(width), Dec(height));

        Ok(Self {
            writer,
            width,
            height,
            color: rgba8(Color::BLACK),
        })
    }

    /// Emit a color change unless `color` is already current.
    fn set_color(&mut self, color: Color) -> RenderResult<()> {
        let rgba = rgba8(color);
        if rgba != self.color {
            write!(
                self.writer,
                " {} {} {} setrgbcolor",
                Dec(rgba[0] as f64 / 255.0),
                Dec(rgba[1] as f64 / 255.0),
                Dec(rgba[2] as f64 / 255.0)
            )?;
            self.color = rgba;
        }
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> RenderResult<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Renderer for EpsRenderer<W> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn render_path(&mut self, path: &BezPath, style: &Style, transform: Affine) -> RenderResult<()> {
        if !style.has_fill() {
            return Ok(());
        }
        let path = path.transformed(transform);
        if !path.is_finite() {
            log::debug!("Skipping path with non-finite coordinates");
            return Ok(());
        }
        self.set_color(style.fill_color)?;
        write!(self.writer, " {} fill", path.to_ps())?;
        Ok(())
    }

    fn render_image(&mut self, image: &RgbaImage, _transform: Affine) -> RenderResult<()> {
        log::debug!(
            "Skipping {}x{} image: not supported in EPS output",
            image.width(),
            image.height()
        );
        Ok(())
    }
}
