//! Editor configuration.
//!
//! All tunable policy of the engine lives in [`EditorConfig`]. By default a
//! crop must be at least 10 px on each side, rescaling is bilinear and the
//! Canny thresholds are 100/200 on the 8-bit gradient scale.

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Default minimum crop width/height in source pixels.
pub const DEFAULT_MIN_CROP_SIZE: u32 = 10;

/// Interpolation filter used when rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Hysteresis thresholds for the edge detector, on the 8-bit gradient scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeThresholds {
    /// Gradients at or below this are never edges.
    pub low: f32,
    /// Gradients above this are always edges.
    pub high: f32,
}

impl Default for EdgeThresholds {
    fn default() -> Self {
        Self {
            low: 100.0,
            high: 200.0,
        }
    }
}

/// Tunable engine policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum crop width and height in source pixels.
    pub min_crop_size: u32,
    /// Thresholds used by the edge-detect filter.
    pub edge_thresholds: EdgeThresholds,
    /// Interpolation used by scale previews and commits.
    pub resample_filter: ResampleFilter,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_crop_size: DEFAULT_MIN_CROP_SIZE,
            edge_thresholds: EdgeThresholds::default(),
            resample_filter: ResampleFilter::default(),
        }
    }
}

impl EditorConfig {
    /// Check that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` naming the first bad field.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.min_crop_size == 0 {
            return Err(EditError::InvalidParameter {
                name: "min_crop_size",
                value: 0.0,
            });
        }

        let EdgeThresholds { low, high } = self.edge_thresholds;
        if !low.is_finite() || low < 0.0 {
            return Err(EditError::InvalidParameter {
                name: "edge_thresholds.low",
                value: low as f64,
            });
        }
        if !high.is_finite() || high < low {
            return Err(EditError::InvalidParameter {
                name: "edge_thresholds.high",
                value: high as f64,
            });
        }

        Ok(())
    }
}
