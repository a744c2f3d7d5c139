//! WASM-compatible wrapper types for raster data.
//!
//! This module provides JavaScript-friendly types that wrap the core rastedit
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use rastedit_core::{Channels, Raster};
use wasm_bindgen::prelude::*;

/// A raster wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is
/// made to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but
/// this is optional as wasm-bindgen's finalizer will handle cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsRaster {
    inner: Raster,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a raster from dimensions, channel count and pixel data.
    ///
    /// # Arguments
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    /// * `channels` - 1 for grayscale, 3 for RGB
    /// * `pixels` - Row-major samples (`width * height * channels` bytes)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<JsRaster, JsValue> {
        let channels = channels_from_u8(channels)?;
        Raster::new(width, height, channels, pixels)
            .map(Self::from_raster)
            .map_err(crate::to_js_error)
    }

    /// Get the width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Samples per pixel: 1 (grayscale) or 3 (RGB)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels().bytes_per_pixel() as u8
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Pixel data expanded to RGBA, ready for `ImageData`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.inner.pixel_count() as usize * 4);
        let bpp = self.inner.channels().bytes_per_pixel();
        for px in self.inner.pixels().chunks_exact(bpp) {
            match self.inner.channels() {
                Channels::Gray => rgba.extend_from_slice(&[px[0], px[0], px[0], 255]),
                Channels::Rgb => rgba.extend_from_slice(&[px[0], px[1], px[2], 255]),
            }
        }
        rgba
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    pub(crate) fn from_raster(inner: Raster) -> Self {
        Self { inner }
    }

    pub(crate) fn raster(&self) -> &Raster {
        &self.inner
    }

    /// Clone the wrapped raster for handing to a session.
    pub(crate) fn to_raster(&self) -> Raster {
        self.inner.clone()
    }
}

/// Convert a channel count from JavaScript to [`Channels`].
pub(crate) fn channels_from_u8(value: u8) -> Result<Channels, JsValue> {
    match value {
        1 => Ok(Channels::Gray),
        3 => Ok(Channels::Rgb),
        other => Err(crate::to_js_error(format!(
            "Unsupported channel count {}: expected 1 or 3",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_raster_accessors() {
        let img = JsRaster::new(2, 2, 3, vec![0u8; 12]).unwrap();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.byte_length(), 12);
        assert_eq!(img.pixels().len(), 12);
    }

    #[test]
    fn test_gray_to_rgba() {
        let img = JsRaster::new(2, 1, 1, vec![10, 200]).unwrap();
        assert_eq!(img.to_rgba(), vec![10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn test_rgb_to_rgba() {
        let img = JsRaster::new(1, 1, 3, vec![1, 2, 3]).unwrap();
        assert_eq!(img.to_rgba(), vec![1, 2, 3, 255]);
    }

    #[test]
    fn test_raster_round_trip() {
        let raster = Raster::rgb(3, 1, (0..9).collect()).unwrap();
        let js = JsRaster::from_raster(raster.clone());
        assert_eq!(js.to_raster(), raster);
        assert_eq!(js.raster(), &raster);
    }

    #[test]
    fn test_channels_from_u8_valid() {
        assert_eq!(channels_from_u8(1).unwrap(), Channels::Gray);
        assert_eq!(channels_from_u8(3).unwrap(), Channels::Rgb);
    }
}

// Error paths build a JsValue, which only works on wasm32
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_new_rejects_bad_buffer() {
        assert!(JsRaster::new(2, 2, 3, vec![0u8; 5]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_new_rejects_bad_channels() {
        assert!(JsRaster::new(1, 1, 4, vec![0u8; 4]).is_err());
    }
}
