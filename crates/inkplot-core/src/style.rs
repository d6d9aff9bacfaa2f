//! Fill and stroke style for drawn paths.

use kurbo::{Cap, Join};
use peniko::Color;

/// Rule deciding which regions of a self-intersecting path are inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside when the winding number is non-zero.
    #[default]
    NonZero,
    /// Inside when the winding number is odd.
    EvenOdd,
}

impl FillRule {
    pub(crate) fn to_skia(self) -> tiny_skia::FillRule {
        match self {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }
}

/// Get a color as straight (non-premultiplied) RGBA8 components.
pub fn rgba8(color: Color) -> [u8; 4] {
    let rgba = color.to_rgba8();
    [rgba.r, rgba.g, rgba.b, rgba.a]
}

/// Style properties for a drawn path.
#[derive(Debug, Clone)]
pub struct Style {
    /// Fill color (zero alpha = no fill).
    pub fill_color: Color,
    /// Stroke color (zero alpha = no stroke).
    pub stroke_color: Color,
    /// Stroke width in user units.
    pub stroke_width: f64,
    /// Cap style applied to both ends of open sub-paths.
    pub stroke_cap: Cap,
    /// Join style between stroke segments.
    pub stroke_join: Join,
    /// Miter limit for [`Join::Miter`].
    pub miter_limit: f64,
    /// Alternating on/off dash lengths. Empty = solid stroke.
    pub dashes: Vec<f64>,
    /// Distance into the dash pattern at which the stroke starts.
    pub dash_offset: f64,
    /// Fill rule for the fill pass.
    pub fill_rule: FillRule,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            stroke_color: Color::TRANSPARENT,
            stroke_width: 1.0,
            stroke_cap: Cap::Butt,
            stroke_join: Join::Miter,
            miter_limit: 4.0,
            dashes: Vec::new(),
            dash_offset: 0.0,
            fill_rule: FillRule::NonZero,
        }
    }
}

impl Style {
    /// Set the fill color.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set the stroke color and width.
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = color;
        self.stroke_width = width;
        self
    }

    /// Set the cap style.
    pub fn with_cap(mut self, cap: Cap) -> Self {
        self.stroke_cap = cap;
        self
    }

    /// Set the join style.
    pub fn with_join(mut self, join: Join) -> Self {
        self.stroke_join = join;
        self
    }

    /// Set the dash pattern and its starting offset.
    pub fn with_dashes(mut self, offset: f64, pattern: &[f64]) -> Self {
        self.dash_offset = offset;
        self.dashes = pattern.to_vec();
        self
    }

    /// Set the fill rule.
    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    /// Whether the fill pass paints anything.
    pub fn has_fill(&self) -> bool {
        rgba8(self.fill_color)[3] != 0
    }

    /// Whether the stroke pass paints anything.
    pub fn has_stroke(&self) -> bool {
        rgba8(self.stroke_color)[3] != 0 && self.stroke_width > 0.0
    }

    /// Distance the painted area may extend past the path geometry.
    ///
    /// Zero when stroking is suppressed. Otherwise the full stroke width, or
    /// the longest allowed miter when that reaches further.
    pub fn stroke_extent(&self) -> f64 {
        if !self.has_stroke() {
            return 0.0;
        }
        match self.stroke_join {
            Join::Miter => self.stroke_width.max(self.stroke_width / 2.0 * self.miter_limit),
            _ => self.stroke_width,
        }
    }

    /// Whether a dash pattern is set.
    pub fn is_dashed(&self) -> bool {
        !self.dashes.is_empty()
    }
}
