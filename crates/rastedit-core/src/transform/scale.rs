//! Uniform rescaling by a ratio.
//!
//! Uses the `image` crate's resampling. The input raster is never modified;
//! every call returns a new raster in the same channel layout.

use crate::config::ResampleFilter;
use crate::error::EditError;
use crate::raster::{Channels, Raster};

/// Smallest accepted scale ratio (10%).
pub const MIN_SCALE_RATIO: f64 = 0.10;

/// Largest accepted scale ratio (200%).
pub const MAX_SCALE_RATIO: f64 = 2.00;

/// Output dimensions for scaling `width x height` by `ratio`.
///
/// Each axis is rounded to the nearest pixel and never drops below 1.
pub fn scaled_dimensions(width: u32, height: u32, ratio: f64) -> (u32, u32) {
    let w = (width as f64 * ratio).round().max(1.0) as u32;
    let h = (height as f64 * ratio).round().max(1.0) as u32;
    (w, h)
}

/// Check that `ratio` lies in `[MIN_SCALE_RATIO, MAX_SCALE_RATIO]`.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` for out-of-range or non-finite
/// ratios.
pub fn validate_ratio(ratio: f64) -> Result<(), EditError> {
    if (MIN_SCALE_RATIO..=MAX_SCALE_RATIO).contains(&ratio) {
        Ok(())
    } else {
        Err(EditError::InvalidParameter {
            name: "scale ratio",
            value: ratio,
        })
    }
}

/// Scale a raster by `ratio`.
///
/// # Arguments
///
/// * `raster` - The source raster
/// * `ratio` - Scale factor in `[0.10, 2.00]`
/// * `filter` - Interpolation filter (the editor uses bilinear)
///
/// # Returns
///
/// A new raster of [`scaled_dimensions`] size.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `ratio` is out of range. Callers
/// are expected to clamp slider input, but the check is always performed.
pub fn scale(raster: &Raster, ratio: f64, filter: ResampleFilter) -> Result<Raster, EditError> {
    validate_ratio(ratio)?;

    let (width, height) = scaled_dimensions(raster.width(), raster.height(), ratio);

    // Fast path: if dimensions match, just clone
    if (width, height) == raster.dimensions() {
        return Ok(raster.clone());
    }

    let filter = filter.to_image_filter();
    match raster.channels() {
        Channels::Rgb => Raster::from_rgb_image(image::imageops::resize(
            &raster.to_rgb_image(),
            width,
            height,
            filter,
        )),
        Channels::Gray => Raster::from_gray_image(image::imageops::resize(
            &raster.to_gray_image(),
            width,
            height,
            filter,
        )),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output dimensions follow round(dim * ratio).
        #[test]
        fn prop_dimension_law(
            (width, height) in (1u32..=60, 1u32..=60),
            percent in 10u32..=200,
        ) {
            let ratio = percent as f64 / 100.0;
            let img = Raster::gray(width, height, vec![0u8; (width * height) as usize]).unwrap();
            let scaled = scale(&img, ratio, ResampleFilter::Bilinear).unwrap();

            let expected_w = ((width as f64 * ratio).round() as u32).max(1);
            let expected_h = ((height as f64 * ratio).round() as u32).max(1);
            prop_assert_eq!(scaled.dimensions(), (expected_w, expected_h));
        }
    }
}
