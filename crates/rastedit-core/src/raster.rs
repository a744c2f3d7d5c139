//! The raster value type shared by every part of the engine.
//!
//! A [`Raster`] is an owned pixel buffer that cannot be modified after it is
//! built. Every edit produces a new raster; snapshots are plain clones.

use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Channel layout of a raster. A raster never mixes layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Channels {
    /// One 8-bit luma sample per pixel.
    Gray,
    /// Three 8-bit samples per pixel, in R, G, B order.
    #[default]
    Rgb,
}

impl Channels {
    /// Number of bytes used by one pixel.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

/// An immutable 8-bit pixel buffer in row-major order.
///
/// Invariant: `pixels.len() == width * height * channels.bytes_per_pixel()`
/// and both dimensions are non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: Channels,
    pixels: Vec<u8>,
}

impl Raster {
    /// Create a raster, validating the buffer against the dimensions.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidDimensions` if either dimension is zero and
    /// `EditError::InvalidBuffer` if the buffer length does not match.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        pixels: Vec<u8>,
    ) -> Result<Self, EditError> {
        if width == 0 || height == 0 {
            return Err(EditError::InvalidDimensions { width, height });
        }

        let expected = buffer_len(width, height, channels);
        if pixels.len() != expected {
            return Err(EditError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            pixels,
        })
    }

    /// Shorthand for an RGB raster.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        Self::new(width, height, Channels::Rgb, pixels)
    }

    /// Shorthand for a single-channel raster.
    pub fn gray(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        Self::new(width, height, Channels::Gray, pixels)
    }

    /// Build a raster whose invariant the caller has already established.
    pub(crate) fn from_parts(width: u32, height: u32, channels: Channels, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0, "Raster dimensions must be non-zero");
        debug_assert_eq!(
            pixels.len(),
            buffer_len(width, height, channels),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// Create a raster from an `image::RgbImage`.
    ///
    /// # Errors
    ///
    /// Same as [`Raster::new`]: an image with a zero dimension is rejected.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Self, EditError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, Channels::Rgb, img.into_raw())
    }

    /// Create a raster from an `image::GrayImage`.
    ///
    /// # Errors
    ///
    /// Same as [`Raster::new`].
    pub fn from_gray_image(img: image::GrayImage) -> Result<Self, EditError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, Channels::Gray, img.into_raw())
    }

    /// Build a raster from a single luma plane, expanded to `channels`.
    ///
    /// Used by filters that compute one value per pixel but must hand back
    /// the same layout they were given.
    pub(crate) fn from_luma_plane(
        width: u32,
        height: u32,
        plane: Vec<u8>,
        channels: Channels,
    ) -> Self {
        match channels {
            Channels::Gray => Self::from_parts(width, height, channels, plane),
            Channels::Rgb => {
                let pixels = plane.iter().flat_map(|&v| [v, v, v]).collect();
                Self::from_parts(width, height, channels, pixels)
            }
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw pixel bytes in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Samples of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.channels.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        Some(&self.pixels[start..start + bpp])
    }

    /// Bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels.bytes_per_pixel()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Convert to an `image::RgbImage`. Gray rasters are replicated into
    /// three channels.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let pixels = match self.channels {
            Channels::Rgb => self.pixels.clone(),
            Channels::Gray => self.pixels.iter().flat_map(|&v| [v, v, v]).collect(),
        };
        // Dimensions and length are guaranteed by the raster invariant.
        image::RgbImage::from_raw(self.width, self.height, pixels)
            .unwrap_or_else(|| image::RgbImage::new(self.width, self.height))
    }

    /// Convert to an `image::GrayImage` holding the raster's luma plane.
    pub fn to_gray_image(&self) -> image::GrayImage {
        let plane = self.luma_plane();
        image::GrayImage::from_raw(self.width, self.height, plane)
            .unwrap_or_else(|| image::GrayImage::new(self.width, self.height))
    }

    /// One luma value per pixel. RGB input is converted with
    /// [`crate::luminance::luma_u8`].
    pub fn luma_plane(&self) -> Vec<u8> {
        match self.channels {
            Channels::Gray => self.pixels.clone(),
            Channels::Rgb => self
                .pixels
                .chunks_exact(3)
                .map(|px| crate::luminance::luma_u8(px[0], px[1], px[2]))
                .collect(),
        }
    }
}

#[inline]
fn buffer_len(width: u32, height: u32, channels: Channels) -> usize {
    width as usize * height as usize * channels.bytes_per_pixel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let img = Raster::rgb(100, 50, vec![0u8; 100 * 50 * 3]).unwrap();

        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), Channels::Rgb);
        assert_eq!(img.pixel_count(), 5000);
        assert_eq!(img.byte_size(), 15000);
        assert_eq!(img.row_stride(), 300);
    }

    #[test]
    fn test_raster_rejects_wrong_buffer() {
        let err = Raster::rgb(10, 10, vec![0u8; 10 * 10]).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidBuffer {
                expected: 300,
                actual: 100
            }
        );

        assert!(Raster::gray(10, 10, vec![0u8; 100]).is_ok());
    }

    #[test]
    fn test_raster_rejects_zero_dimensions() {
        let err = Raster::gray(0, 10, vec![]).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_pixel_access() {
        let pixels: Vec<u8> = (0..2 * 2 * 3).map(|v| v as u8).collect();
        let img = Raster::rgb(2, 2, pixels).unwrap();

        assert_eq!(img.pixel(0, 0), Some(&[0u8, 1, 2][..]));
        assert_eq!(img.pixel(1, 1), Some(&[9u8, 10, 11][..]));
        assert_eq!(img.pixel(2, 0), None);
    }

    #[test]
    fn test_from_luma_plane_expands_rgb() {
        let img = Raster::from_luma_plane(2, 1, vec![7, 200], Channels::Rgb);
        assert_eq!(img.pixels(), &[7, 7, 7, 200, 200, 200]);

        let gray = Raster::from_luma_plane(2, 1, vec![7, 200], Channels::Gray);
        assert_eq!(gray.pixels(), &[7, 200]);
    }

    #[test]
    fn test_image_conversions() {
        let img = Raster::gray(3, 2, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let rgb = img.to_rgb_image();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.get_pixel(2, 1).0, [60, 60, 60]);

        let back = Raster::from_gray_image(img.to_gray_image()).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_image_conversions_reject_empty_images() {
        assert_eq!(
            Raster::from_rgb_image(image::RgbImage::new(0, 5)).unwrap_err(),
            EditError::InvalidDimensions {
                width: 0,
                height: 5
            }
        );
        assert_eq!(
            Raster::from_gray_image(image::GrayImage::new(4, 0)).unwrap_err(),
            EditError::InvalidDimensions {
                width: 4,
                height: 0
            }
        );
    }

    #[test]
    fn test_clone_is_independent_value() {
        let img = Raster::rgb(4, 4, vec![1u8; 48]).unwrap();
        let snapshot = img.clone();
        assert_eq!(img, snapshot);
        assert_ne!(img.pixels().as_ptr(), snapshot.pixels().as_ptr());
    }
}
