//! PostScript number and path formatting.

use kurbo::{BezPath, PathEl, Point};
use std::fmt;

/// Number of decimals kept when formatting numbers.
pub const PRECISION: usize = 8;

/// Formats a number in the shortest fixed-point form, e.g. `0.5`, `12`, `-3.25`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dec(pub f64);

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format!("{:.*}", PRECISION, self.0);
        if s.contains('.') {
            let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
            s.truncate(trimmed);
        }
        if s == "-0" {
            s = "0".to_string();
        }
        f.write_str(&s)
    }
}

/// Render path construction operators, separated by single spaces.
pub(crate) fn path_to_ps(path: &BezPath) -> String {
    let mut ops = Vec::with_capacity(path.elements().len());
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;
    for el in path.elements() {
        let op = match *el {
            PathEl::MoveTo(p) => {
                current = p;
                start = p;
                format!("{} {} moveto", Dec(p.x), Dec(p.y))
            }
            PathEl::LineTo(p) => {
                current = p;
                format!("{} {} lineto", Dec(p.x), Dec(p.y))
            }
            PathEl::QuadTo(p1, p2) => {
                let c1 = current + (p1 - current) * (2.0 / 3.0);
                let c2 = p2 + (p1 - p2) * (2.0 / 3.0);
                current = p2;
                curveto(c1, c2, p2)
            }
            PathEl::CurveTo(p1, p2, p3) => {
                current = p3;
                curveto(p1, p2, p3)
            }
            PathEl::ClosePath => {
                current = start;
                "closepath".to_string()
            }
        };
        ops.push(op);
    }
    ops.join(" ")
}

fn curveto(p1: Point, p2: Point, p3: Point) -> String {
    format!(
        "{} {} {} {} {} {} curveto",
        Dec(p1.x),
        Dec(p1.y),
        Dec(p2.x),
        Dec(p2.y),
        Dec(p3.x),
        Dec(p3.y)
    )
}
