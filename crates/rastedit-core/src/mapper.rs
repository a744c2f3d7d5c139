//! Display-space to source-space coordinate mapping.
//!
//! The original image is shown scaled to fit a fixed canvas, so a rectangle
//! the user drags on screen is in "display space". Cropping happens on the
//! source raster, so the rectangle must be translated into source pixels
//! first.
//!
//! # Mapping
//!
//! ```text
//! clamp each point to [0, display_w] x [0, display_h]
//! sort so that p0 <= p1 on each axis
//! src = trunc(display * source_dim / display_dim)
//! ```
//!
//! The product is taken in integer arithmetic before dividing, so a
//! full-viewport rectangle always maps to the full source raster whatever
//! the scale factor.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::raster::Raster;
use crate::transform::SourceRect;

/// A point in display space, as reported by pointer events.
///
/// Coordinates may be negative or exceed the viewport when the pointer is
/// dragged outside the canvas; they are clamped during mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub x: i32,
    pub y: i32,
}

impl DisplayPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rendered size of the scaled-to-fit preview of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size at which a `source_w x source_h` image is drawn to fit inside a
    /// `canvas_w x canvas_h` canvas, preserving aspect ratio.
    ///
    /// Equivalent to `trunc(source * min(canvas_w / source_w, canvas_h /
    /// source_h))` per axis, computed exactly. Images smaller than the canvas
    /// are scaled up. Each axis is at least 1.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidViewport` if any input dimension is zero
    /// (for example before the canvas has been laid out).
    pub fn fit(canvas_w: u32, canvas_h: u32, source_w: u32, source_h: u32) -> Result<Self, EditError> {
        if canvas_w == 0 || canvas_h == 0 {
            return Err(EditError::InvalidViewport {
                width: canvas_w,
                height: canvas_h,
            });
        }
        if source_w == 0 || source_h == 0 {
            return Err(EditError::InvalidViewport {
                width: source_w,
                height: source_h,
            });
        }

        let (cw, ch, sw, sh) = (
            canvas_w as u64,
            canvas_h as u64,
            source_w as u64,
            source_h as u64,
        );

        // Width-limited when cw / sw <= ch / sh
        let (w, h) = if cw * sh <= ch * sw {
            (cw, sh * cw / sw)
        } else {
            (sw * ch / sh, ch)
        };

        Ok(Self {
            width: w.max(1) as u32,
            height: h.max(1) as u32,
        })
    }

    /// Fit `raster` inside a canvas of the given size.
    pub fn fit_raster(canvas_w: u32, canvas_h: u32, raster: &Raster) -> Result<Self, EditError> {
        Self::fit(canvas_w, canvas_h, raster.width(), raster.height())
    }

    fn ensure_non_degenerate(self) -> Result<Self, EditError> {
        if self.width == 0 || self.height == 0 {
            Err(EditError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        } else {
            Ok(self)
        }
    }
}

/// One crop gesture: press and release points plus the sizes needed to map
/// them into source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRequest {
    /// Point where the drag started.
    pub start: DisplayPoint,
    /// Point where the drag ended.
    pub end: DisplayPoint,
    /// Rendered size of the scaled source preview.
    pub display: Viewport,
    /// Width of the source raster in pixels.
    pub source_width: u32,
    /// Height of the source raster in pixels.
    pub source_height: u32,
}

impl CropRequest {
    pub fn new(
        start: DisplayPoint,
        end: DisplayPoint,
        display: Viewport,
        source_width: u32,
        source_height: u32,
    ) -> Self {
        Self {
            start,
            end,
            display,
            source_width,
            source_height,
        }
    }

    /// Build a request whose source dimensions are those of `source`.
    pub fn for_source(
        start: DisplayPoint,
        end: DisplayPoint,
        display: Viewport,
        source: &Raster,
    ) -> Self {
        Self::new(start, end, display, source.width(), source.height())
    }

    /// Map this request into source pixels. See [`map_to_source`].
    pub fn to_source_rect(&self) -> Result<SourceRect, EditError> {
        map_to_source(self)
    }
}

/// Translate a display-space rectangle into source-space pixels.
///
/// The result is not checked against any minimum size; that policy belongs
/// to [`crate::transform::crop`].
///
/// # Errors
///
/// Returns `EditError::InvalidViewport` if the display viewport has a zero
/// dimension.
pub fn map_to_source(request: &CropRequest) -> Result<SourceRect, EditError> {
    let display = request.display.ensure_non_degenerate()?;

    let x0 = clamp_axis(request.start.x, display.width);
    let x1 = clamp_axis(request.end.x, display.width);
    let y0 = clamp_axis(request.start.y, display.height);
    let y1 = clamp_axis(request.end.y, display.height);

    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));

    Ok(SourceRect {
        x0: map_axis(x0, display.width, request.source_width),
        y0: map_axis(y0, display.height, request.source_height),
        x1: map_axis(x1, display.width, request.source_width),
        y1: map_axis(y1, display.height, request.source_height),
    })
}

#[inline]
fn clamp_axis(value: i32, extent: u32) -> u32 {
    (value.max(0) as u32).min(extent)
}

/// `trunc(value * source / display)` without floating-point drift.
#[inline]
fn map_axis(value: u32, display: u32, source: u32) -> u32 {
    (value as u64 * source as u64 / display as u64) as u32
}
