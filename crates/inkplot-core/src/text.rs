//! Text already converted to colored outlines.

use kurbo::BezPath;
use peniko::Color;

/// One outline of a text block and the color it is painted with.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub outline: BezPath,
    pub color: Color,
}

/// A block of text as an ordered list of colored outlines.
///
/// Runs are painted in order, later runs over earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Text {
    runs: Vec<TextRun>,
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outline.
    pub fn push(&mut self, outline: BezPath, color: Color) {
        self.runs.push(TextRun { outline, color });
    }

    /// Builder form of [`Text::push`].
    pub fn with_run(mut self, outline: BezPath, color: Color) -> Self {
        self.push(outline, color);
        self
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Split into parallel lists of outlines and colors, in paint order.
    pub fn to_paths(&self) -> (Vec<BezPath>, Vec<Color>) {
        self.runs
            .iter()
            .map(|run| (run.outline.clone(), run.color))
            .unzip()
    }
}
