//! Device-space draw windows.

use kurbo::Rect;

/// The part of the target a single draw call may touch.
///
/// Coordinates are device pixels with the origin at the bottom-left of the
/// target, matching user space. Use [`DeviceWindow::top`] for the buffer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeviceWindow {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Device pixels clipped off the left and bottom edges, bottom-up.
    pub src_offset: (i64, i64),
}

impl DeviceWindow {
    /// Window covering `bounds` grown by `extent` on every side, at `dpm`
    /// pixels per unit, clipped to a `canvas_width` x `canvas_height` target.
    ///
    /// `None` when nothing of the window lies on the target.
    pub fn locate(bounds: Rect, extent: f64, dpm: f64, canvas_width: u32, canvas_height: u32) -> Option<Self> {
        let x = Span::clip(bounds.x0, bounds.x1, extent, dpm, canvas_width)?;
        let y = Span::clip(bounds.y0, bounds.y1, extent, dpm, canvas_height)?;
        Some(Self {
            x: x.origin,
            y: y.origin,
            width: x.len,
            height: y.len,
            src_offset: (x.clipped, y.clipped),
        })
    }

    /// Buffer row of the window's top edge in a target `canvas_height` tall.
    pub fn top(&self, canvas_height: u32) -> u32 {
        canvas_height - self.y - self.height
    }
}

/// One axis of a window after clipping to the target.
struct Span {
    origin: u32,
    len: u32,
    clipped: i64,
}

impl Span {
    /// Pixel span of `[lo - extent, hi + extent]` at `dpm`, clipped to
    /// `0..canvas`.
    ///
    /// The origin is floored and the length gets one pixel of padding, widened
    /// further if needed so the span always reaches the far edge. All range
    /// checks happen in floating point, so coordinates beyond the integer
    /// range are rejected instead of wrapping.
    fn clip(lo: f64, hi: f64, extent: f64, dpm: f64, canvas: u32) -> Option<Self> {
        let start = (lo - extent) * dpm;
        let end = (hi + extent) * dpm;
        if !(start.is_finite() && end.is_finite()) {
            return None;
        }
        let origin = start.floor();
        let far = (origin + (end - start).trunc() + 1.0).max(end.ceil());

        let canvas = canvas as f64;
        if far <= 0.0 || origin >= canvas {
            return None;
        }
        let clipped_origin = origin.max(0.0);
        let len = far.min(canvas) - clipped_origin;
        if len <= 0.0 {
            return None;
        }
        Some(Self {
            origin: clipped_origin as u32,
            len: len as u32,
            clipped: (clipped_origin - origin) as i64,
        })
    }
}
