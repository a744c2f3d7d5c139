//! Pixel filters: grayscale and edge detection.
//!
//! The filter set is closed. [`FilterKind`] names every filter the editor
//! offers and [`apply_filter`] dispatches on it.

use serde::{Deserialize, Serialize};

use super::edge::canny;
use crate::config::EdgeThresholds;
use crate::raster::Raster;

/// A pixel filter the editor can apply to the active image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Luma conversion, re-expanded to the input layout.
    Grayscale,
    /// Canny edges over the luma plane, re-expanded to the input layout.
    EdgeDetect,
}

impl FilterKind {
    /// Human-readable filter name for menus.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "Grayscale",
            FilterKind::EdgeDetect => "Edge Detection",
        }
    }
}

/// Apply `kind` to `raster`, returning a new raster of the same size and
/// channel layout.
pub fn apply_filter(raster: &Raster, kind: FilterKind, thresholds: EdgeThresholds) -> Raster {
    match kind {
        FilterKind::Grayscale => grayscale(raster),
        FilterKind::EdgeDetect => edge_detect(raster, thresholds),
    }
}

/// Convert every pixel to its luma value.
///
/// RGB input yields an RGB raster with `r == g == b`; gray input is returned
/// unchanged.
pub fn grayscale(raster: &Raster) -> Raster {
    let (width, height) = raster.dimensions();
    Raster::from_luma_plane(width, height, raster.luma_plane(), raster.channels())
}

/// Grayscale, then Canny edge detection with `thresholds`.
///
/// Edge pixels are 255 and all others 0, in the input's channel layout.
pub fn edge_detect(raster: &Raster, thresholds: EdgeThresholds) -> Raster {
    let (width, height) = raster.dimensions();
    let edges = canny(&raster.luma_plane(), width, height, thresholds);
    Raster::from_luma_plane(width, height, edges, raster.channels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Channels;

    fn color_image(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 7 % 256) as u8);
                pixels.push((y * 11 % 256) as u8);
                pixels.push(200);
            }
        }
        Raster::rgb(width, height, pixels).unwrap()
    }

    #[test]
    fn test_grayscale_keeps_layout() {
        let img = color_image(16, 8);
        let gray = grayscale(&img);

        assert_eq!(gray.dimensions(), (16, 8));
        assert_eq!(gray.channels(), Channels::Rgb);
        for px in gray.pixels().chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn test_grayscale_uses_luma() {
        let img = Raster::rgb(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let gray = grayscale(&img);
        assert_eq!(gray.pixels(), &[76, 76, 76, 150, 150, 150]);
    }

    #[test]
    fn test_grayscale_of_gray_is_identity() {
        let img = Raster::gray(4, 4, (0..16).collect()).unwrap();
        assert_eq!(grayscale(&img), img);
    }

    #[test]
    fn test_grayscale_does_not_touch_input() {
        let img = color_image(8, 8);
        let before = img.clone();
        let _ = grayscale(&img);
        assert_eq!(img, before);
    }

    #[test]
    fn test_edge_detect_keeps_layout_and_is_binary() {
        let mut pixels = Vec::new();
        for _ in 0..10 {
            for x in 0..20 {
                let v = if x < 10 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let img = Raster::rgb(20, 10, pixels).unwrap();
        let edges = edge_detect(&img, EdgeThresholds::default());

        assert_eq!(edges.dimensions(), (20, 10));
        assert_eq!(edges.channels(), Channels::Rgb);
        assert!(edges.pixels().iter().all(|&v| v == 0 || v == 255));
        assert_eq!(edges.pixel(9, 5), Some(&[255u8, 255, 255][..]));
        assert_eq!(edges.pixel(0, 5), Some(&[0u8, 0, 0][..]));
    }

    #[test]
    fn test_edge_detect_deterministic() {
        let img = color_image(32, 32);
        let a = edge_detect(&img, EdgeThresholds::default());
        let b = edge_detect(&img, EdgeThresholds::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_filter_dispatch() {
        let img = color_image(12, 12);
        let thresholds = EdgeThresholds::default();

        assert_eq!(
            apply_filter(&img, FilterKind::Grayscale, thresholds),
            grayscale(&img)
        );
        assert_eq!(
            apply_filter(&img, FilterKind::EdgeDetect, thresholds),
            edge_detect(&img, thresholds)
        );
    }

    #[test]
    fn test_filter_labels() {
        assert_eq!(FilterKind::Grayscale.label(), "Grayscale");
        assert_eq!(FilterKind::EdgeDetect.label(), "Edge Detection");
    }
}
