//! Error types for the edit-state engine.
//!
//! Every failure is a deterministic function of the current session state and
//! the request that was made. Nothing here is retried or recovered inside the
//! engine; the caller decides how to present it.

use thiserror::Error;

/// Errors returned by raster construction, transforms, the coordinate mapper,
/// the edit history and the edit session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    /// Crop rectangle is smaller than the minimum size (or fully outside the
    /// raster) after clamping.
    #[error("Invalid crop region: {width}x{height} px after clamping (minimum {min}x{min})")]
    InvalidRegion { width: u32, height: u32, min: u32 },

    /// A numeric parameter is outside its accepted range.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The display viewport has a zero dimension.
    #[error("Invalid viewport: {width}x{height} (both dimensions must be non-zero)")]
    InvalidViewport { width: u32, height: u32 },

    /// Undo requested with an empty undo stack.
    #[error("No operation to undo")]
    NothingToUndo,

    /// Redo requested with an empty redo stack.
    #[error("No operation to redo")]
    NothingToRedo,

    /// An edit was requested before any image was loaded.
    #[error("No image loaded")]
    NoActiveImage,

    /// Pixel buffer length does not match `width * height * channels`.
    #[error("Invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditError::InvalidRegion {
            width: 9,
            height: 40,
            min: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid crop region: 9x40 px after clamping (minimum 10x10)"
        );

        assert_eq!(EditError::NothingToUndo.to_string(), "No operation to undo");
        assert_eq!(EditError::NothingToRedo.to_string(), "No operation to redo");
    }

    #[test]
    fn test_parameter_error_names_value() {
        let err = EditError::InvalidParameter {
            name: "scale ratio",
            value: 2.5,
        };
        assert_eq!(err.to_string(), "Invalid parameter scale ratio: 2.5");
    }
}
