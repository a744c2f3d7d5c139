//! Edit session WASM bindings.
//!
//! Wraps [`EditSession`] so a browser UI can drive crop, scale, filter and
//! undo/redo requests. Every method that changes the image returns the new
//! active (or preview) raster so the caller can redraw right away.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditSession();
//! session.load_image(decode_image(bytes));
//!
//! // Crop from a drag on a 400x200 display of the original
//! const cropped = session.request_crop(0, 0, 50, 50, 400, 200);
//!
//! // Slider drag, then release
//! session.preview_scale(0.75);
//! session.commit_scale();
//!
//! session.undo();
//! ```

use rastedit_core::{
    CropRequest, DisplayPoint, EditError, EditSession, EditorConfig, FilterKind, Viewport,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

/// Undo/redo availability, as sent to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryState {
    can_undo: bool,
    can_redo: bool,
    undo_depth: usize,
    redo_depth: usize,
    preview_ratio: Option<f64>,
}

/// Edit session wrapper for JavaScript.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create an empty session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EditSession::new(),
        }
    }

    /// Create an empty session from a configuration object.
    ///
    /// Missing fields take their defaults, e.g.
    /// `{ min_crop_size: 16, edge_thresholds: { low: 50, high: 150 } }`.
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| crate::to_js_error(format!("Invalid editor config: {}", e)))?;
        EditSession::with_config(config)
            .map(|inner| Self { inner })
            .map_err(crate::to_js_error)
    }

    /// Load a new image, replacing all edit state.
    pub fn load_image(&mut self, image: &JsRaster) -> JsRaster {
        JsRaster::from_raster(self.inner.load_image(image.to_raster()).clone())
    }

    /// Crop the original image to a rectangle dragged on its display.
    ///
    /// `(x0, y0)` and `(x1, y1)` are the drag end points in display pixels;
    /// `display_width` x `display_height` is the size the original is drawn
    /// at.
    pub fn request_crop(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        display_width: u32,
        display_height: u32,
    ) -> Result<JsRaster, JsValue> {
        let original = self
            .inner
            .original()
            .ok_or_else(|| crate::to_js_error(EditError::NoActiveImage))?;
        let request = CropRequest::for_source(
            DisplayPoint::new(x0, y0),
            DisplayPoint::new(x1, y1),
            Viewport::new(display_width, display_height),
            original,
        );

        self.inner
            .request_crop(&request)
            .map(|r| JsRaster::from_raster(r.clone()))
            .map_err(crate::to_js_error)
    }

    /// Preview the active image at `ratio` (0.10 to 2.00) without
    /// recording it.
    pub fn preview_scale(&mut self, ratio: f64) -> Result<JsRaster, JsValue> {
        self.inner
            .preview_scale(ratio)
            .map(|r| JsRaster::from_raster(r.clone()))
            .map_err(crate::to_js_error)
    }

    /// Record the pending scale preview. Returns `undefined` when there was
    /// nothing to commit.
    pub fn commit_scale(&mut self) -> Result<Option<JsRaster>, JsValue> {
        self.inner
            .commit_scale()
            .map(|r| r.map(|r| JsRaster::from_raster(r.clone())))
            .map_err(crate::to_js_error)
    }

    /// Drop the pending scale preview, if any.
    pub fn cancel_scale_preview(&mut self) {
        self.inner.cancel_scale_preview();
    }

    pub fn apply_grayscale(&mut self) -> Result<JsRaster, JsValue> {
        self.apply(FilterKind::Grayscale)
    }

    pub fn apply_edge_detect(&mut self) -> Result<JsRaster, JsValue> {
        self.apply(FilterKind::EdgeDetect)
    }

    pub fn undo(&mut self) -> Result<JsRaster, JsValue> {
        self.inner
            .undo()
            .map(|r| JsRaster::from_raster(r.clone()))
            .map_err(crate::to_js_error)
    }

    pub fn redo(&mut self) -> Result<JsRaster, JsValue> {
        self.inner
            .redo()
            .map(|r| JsRaster::from_raster(r.clone()))
            .map_err(crate::to_js_error)
    }

    /// The current edit result.
    pub fn active(&self) -> Option<JsRaster> {
        self.inner.active().cloned().map(JsRaster::from_raster)
    }

    /// The image as loaded.
    pub fn original(&self) -> Option<JsRaster> {
        self.inner.original().cloned().map(JsRaster::from_raster)
    }

    /// The pending scale preview.
    pub fn preview(&self) -> Option<JsRaster> {
        self.inner
            .preview()
            .map(|p| JsRaster::from_raster(p.raster.clone()))
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Undo/redo availability as `{ canUndo, canRedo, undoDepth, redoDepth,
    /// previewRatio }`.
    pub fn history_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.history_snapshot())
            .map_err(|e| crate::to_js_error(e.to_string()))
    }

    /// Size to draw the original at inside a `canvas_width` x
    /// `canvas_height` canvas, as `[width, height]`.
    pub fn display_size(&self, canvas_width: u32, canvas_height: u32) -> Result<Vec<u32>, JsValue> {
        let original = self
            .inner
            .original()
            .ok_or_else(|| crate::to_js_error(EditError::NoActiveImage))?;
        Viewport::fit_raster(canvas_width, canvas_height, original)
            .map(|v| vec![v.width, v.height])
            .map_err(crate::to_js_error)
    }
}

impl JsEditSession {
    fn apply(&mut self, kind: FilterKind) -> Result<JsRaster, JsValue> {
        self.inner
            .apply_filter(kind)
            .map(|r| JsRaster::from_raster(r.clone()))
            .map_err(crate::to_js_error)
    }

    fn history_snapshot(&self) -> HistoryState {
        HistoryState {
            can_undo: self.inner.can_undo(),
            can_redo: self.inner.can_redo(),
            undo_depth: self.inner.undo_depth(),
            redo_depth: self.inner.redo_depth(),
            preview_ratio: self.inner.preview_ratio(),
        }
    }
}
