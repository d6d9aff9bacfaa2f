//! Raster renderer configuration.

use crate::renderer::{RenderResult, RendererError};
use serde::{Deserialize, Serialize};

/// Largest accepted image margin, in source pixels.
pub const MAX_IMAGE_MARGIN: u32 = 256;

fn default_dpm() -> f64 {
    1.0
}

fn default_image_margin() -> u32 {
    4
}

fn default_tolerance() -> f64 {
    0.1
}

/// Settings fixed for the lifetime of a [`RasterRenderer`](super::RasterRenderer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Device pixels per user-space unit.
    #[serde(default = "default_dpm")]
    pub dpm: f64,
    /// Transparent border (in source pixels) added around images before
    /// resampling, so rotated images get soft edges.
    #[serde(default = "default_image_margin")]
    pub image_margin: u32,
    /// Curve flattening tolerance for stroke expansion, in device pixels.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            dpm: default_dpm(),
            image_margin: default_image_margin(),
            tolerance: default_tolerance(),
        }
    }
}

impl RasterConfig {
    /// Default settings at the given resolution.
    pub fn new(dpm: f64) -> Self {
        Self::default().with_dpm(dpm)
    }

    /// Set the resolution.
    pub fn with_dpm(mut self, dpm: f64) -> Self {
        self.dpm = dpm;
        self
    }

    /// Set the image border margin.
    pub fn with_image_margin(mut self, margin: u32) -> Self {
        self.image_margin = margin;
        self
    }

    /// Set the stroke flattening tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check that the resolution, image margin and tolerance are usable.
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.dpm.is_finite() && self.dpm > 0.0) {
            return Err(RendererError::InvalidConfig(format!(
                "dpm must be positive, got {}",
                self.dpm
            )));
        }
        if self.image_margin > MAX_IMAGE_MARGIN {
            return Err(RendererError::InvalidConfig(format!(
                "image margin must be at most {}, got {}",
                MAX_IMAGE_MARGIN, self.image_margin
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(RendererError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Flattening tolerance in user-space units.
    pub(crate) fn user_tolerance(&self) -> f64 {
        self.tolerance / self.dpm
    }
}
