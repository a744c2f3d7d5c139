//! Image cropping in source-pixel coordinates.
//!
//! The crop rectangle is given by two corners in either order. Corners are
//! sorted, clamped to the raster bounds and then checked against a minimum
//! size before any pixels are copied.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::raster::Raster;

/// A rectangle in source-pixel coordinates, described by two corners.
///
/// `(x0, y0)` and `(x1, y1)` may arrive in any order; use
/// [`SourceRect::normalized`] to get `x0 <= x1` and `y0 <= y1`. The right and
/// bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl SourceRect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Sort the corners so that `x0 <= x1` and `y0 <= y1`.
    pub fn normalized(self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    /// Clamp every coordinate into `[0, width] x [0, height]`.
    pub fn clamped(self, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.min(width),
            y0: self.y0.min(height),
            x1: self.x1.min(width),
            y1: self.y1.min(height),
        }
    }

    /// Width of the rectangle; zero when the corners are inverted.
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    /// Height of the rectangle; zero when the corners are inverted.
    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

/// Crop `raster` to `rect`.
///
/// # Arguments
///
/// * `raster` - Source raster (not modified)
/// * `rect` - Region in source pixels, corners in any order
/// * `min_size` - Minimum accepted width and height after clamping
///
/// # Returns
///
/// A new raster of exactly `rect.width() x rect.height()` pixels (after
/// sorting and clamping), in the same channel layout as the input.
///
/// # Errors
///
/// Returns `EditError::InvalidRegion` if the clamped rectangle is narrower
/// or shorter than `min_size`. A rectangle fully outside the raster clamps to
/// zero size and is rejected the same way.
pub fn crop(raster: &Raster, rect: SourceRect, min_size: u32) -> Result<Raster, EditError> {
    let rect = rect.normalized().clamped(raster.width(), raster.height());
    let (out_width, out_height) = (rect.width(), rect.height());

    if out_width < min_size || out_height < min_size || out_width == 0 || out_height == 0 {
        return Err(EditError::InvalidRegion {
            width: out_width,
            height: out_height,
            min: min_size,
        });
    }

    // Fast path: full-size crop returns a clone
    if out_width == raster.width() && out_height == raster.height() {
        return Ok(raster.clone());
    }

    let bpp = raster.channels().bytes_per_pixel();
    let src_stride = raster.row_stride();
    let dst_stride = out_width as usize * bpp;
    let mut output = Vec::with_capacity(dst_stride * out_height as usize);

    // Copy pixel data row by row
    for y in rect.y0..rect.y1 {
        let start = y as usize * src_stride + rect.x0 as usize * bpp;
        output.extend_from_slice(&raster.pixels()[start..start + dst_stride]);
    }

    Ok(Raster::from_parts(
        out_width,
        out_height,
        raster.channels(),
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channels;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        Raster::rgb(width, height, pixels).unwrap()
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = crop(&img, SourceRect::new(0, 0, 100, 100), 10).unwrap();

        assert_eq!(result, img);
    }

    #[test]
    fn test_region_dimensions() {
        let img = test_image(200, 100);
        let result = crop(&img, SourceRect::new(20, 10, 70, 40), 10).unwrap();

        assert_eq!(result.dimensions(), (50, 30));
        assert_eq!(result.byte_size(), 50 * 30 * 3);
    }

    #[test]
    fn test_pixel_values_preserved() {
        let img = test_image(20, 20);
        let result = crop(&img, SourceRect::new(3, 3, 15, 15), 10).unwrap();

        // Value at (3, 3) = (3 * 20 + 3) % 256 = 63
        assert_eq!(result.pixel(0, 0), Some(&[63u8, 63, 63][..]));
        // Value at (14, 14) = (14 * 20 + 14) % 256 = 294 % 256 = 38
        assert_eq!(result.pixel(11, 11), Some(&[38u8, 38, 38][..]));
    }

    #[test]
    fn test_corner_order_irrelevant() {
        let img = test_image(50, 50);
        let forward = crop(&img, SourceRect::new(5, 8, 30, 40), 10).unwrap();
        let backward = crop(&img, SourceRect::new(30, 40, 5, 8), 10).unwrap();
        let mixed = crop(&img, SourceRect::new(30, 8, 5, 40), 10).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward, mixed);
    }

    #[test]
    fn test_min_size_boundary() {
        let img = test_image(50, 50);

        let err = crop(&img, SourceRect::new(0, 0, 9, 20), 10).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidRegion {
                width: 9,
                height: 20,
                min: 10
            }
        );
        assert!(crop(&img, SourceRect::new(0, 0, 20, 9), 10).is_err());

        let ok = crop(&img, SourceRect::new(0, 0, 10, 10), 10).unwrap();
        assert_eq!(ok.dimensions(), (10, 10));
    }

    #[test]
    fn test_clamps_to_bounds() {
        let img = test_image(40, 30);
        let result = crop(&img, SourceRect::new(20, 10, 500, 500), 10).unwrap();

        assert_eq!(result.dimensions(), (20, 20));
    }

    #[test]
    fn test_clamping_can_shrink_below_minimum() {
        let img = test_image(40, 30);
        // 35..100 clamps to 35..40, only 5 px wide
        let err = crop(&img, SourceRect::new(35, 0, 100, 30), 10).unwrap_err();
        assert!(matches!(err, EditError::InvalidRegion { width: 5, .. }));
    }

    #[test]
    fn test_fully_outside_rejected() {
        let img = test_image(40, 30);
        let err = crop(&img, SourceRect::new(100, 100, 200, 200), 10).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidRegion {
                width: 0,
                height: 0,
                min: 10
            }
        );
    }

    #[test]
    fn test_gray_layout_preserved() {
        let pixels: Vec<u8> = (0..30 * 30).map(|i| (i % 256) as u8).collect();
        let img = Raster::gray(30, 30, pixels).unwrap();
        let result = crop(&img, SourceRect::new(1, 2, 21, 22), 10).unwrap();

        assert_eq!(result.channels(), Channels::Gray);
        assert_eq!(result.byte_size(), 400);
        // Value at (1, 2) = 2 * 30 + 1 = 61
        assert_eq!(result.pixels()[0], 61);
    }

    #[test]
    fn test_input_untouched() {
        let img = test_image(30, 30);
        let before = img.clone();
        let _ = crop(&img, SourceRect::new(0, 0, 15, 15), 10).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_rect_helpers() {
        let rect = SourceRect::new(30, 40, 10, 5).normalized();
        assert_eq!(rect, SourceRect::new(10, 5, 30, 40));
        assert_eq!(rect.width(), 20);
        assert_eq!(rect.height(), 35);

        let clamped = rect.clamped(25, 25);
        assert_eq!(clamped, SourceRect::new(10, 5, 25, 25));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
