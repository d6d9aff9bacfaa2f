//! inkplot Core Library
//!
//! Renderer-independent drawing types: styles, text outlines and the path
//! kernel operations shared by the vector and raster backends.

pub mod path;
pub mod ps;
pub mod style;
pub mod text;

pub use path::PathExt;
pub use ps::Dec;
pub use style::{FillRule, Style, rgba8};
pub use text::{Text, TextRun};

pub use kurbo::{Cap, Join};
pub use peniko::Color;
