//! The edit session: one loaded image and everything done to it.
//!
//! [`EditSession`] drives crop, scale and filter requests through the
//! transform operations and records the results in an [`EditHistory`].
//!
//! # State
//!
//! - `original`: the raster as loaded. Set once per load, never modified,
//!   and the only source for crops.
//! - active raster (owned by the history): the current edit result.
//! - `scaling_baseline`: the raster scale ratios are measured against. It is
//!   reset to the active raster after every committed transition, so a
//!   slider drag always resamples one baseline instead of an already
//!   resampled preview.
//! - `preview`: the most recent uncommitted scale result, if any.
//!
//! # Two-phase scaling
//!
//! ```text
//! preview_scale(r1) -> preview = scale(baseline, r1)     (history untouched)
//! preview_scale(r2) -> preview = scale(baseline, r2)     (not scale(preview, ..))
//! commit_scale()    -> history.commit(preview); baseline = active
//! ```
//!
//! Any other transition discards a pending preview.

use crate::config::EditorConfig;
use crate::error::EditError;
use crate::history::EditHistory;
use crate::mapper::{map_to_source, CropRequest};
use crate::raster::Raster;
use crate::transform::{self, FilterKind};

/// An uncommitted scale result.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalePreview {
    /// Ratio the preview was computed with.
    pub ratio: f64,
    /// `scale(baseline, ratio)`.
    pub raster: Raster,
}

/// Edit state for a single image.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    config: EditorConfig,
    original: Option<Raster>,
    history: EditHistory,
    scaling_baseline: Option<Raster>,
    preview: Option<ScalePreview>,
}

impl EditSession {
    /// Create an empty session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` if the configuration does not
    /// pass [`EditorConfig::validate`].
    pub fn with_config(config: EditorConfig) -> Result<Self, EditError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Load a decoded image, discarding all previous state.
    ///
    /// The raster becomes both the original and the active image; both
    /// history stacks are emptied.
    pub fn load_image(&mut self, raster: Raster) -> &Raster {
        log::debug!(
            "load_image: {}x{} {:?}",
            raster.width(),
            raster.height(),
            raster.channels()
        );

        self.original = Some(raster.clone());
        self.scaling_baseline = Some(raster.clone());
        self.preview = None;
        self.history.reset(raster)
    }

    /// Crop the original image to a rectangle drawn in display space.
    ///
    /// The request is mapped into source pixels, cropped out of the
    /// *original* raster (not the active one) and committed. The source size
    /// is always taken from the original; the request's own
    /// `source_width`/`source_height` are ignored.
    ///
    /// # Errors
    ///
    /// - `EditError::NoActiveImage` if nothing is loaded
    /// - `EditError::InvalidViewport` if the request's viewport is degenerate
    /// - `EditError::InvalidRegion` if the mapped rectangle is too small
    pub fn request_crop(&mut self, request: &CropRequest) -> Result<&Raster, EditError> {
        let original = self.original.as_ref().ok_or(EditError::NoActiveImage)?;
        let request =
            CropRequest::for_source(request.start, request.end, request.display, original);
        let rect = map_to_source(&request)?;
        let cropped = transform::crop(original, rect, self.config.min_crop_size)?;

        log::debug!(
            "crop: display ({}, {})-({}, {}) in {}x{} -> source ({}, {})-({}, {})",
            request.start.x,
            request.start.y,
            request.end.x,
            request.end.y,
            request.display.width,
            request.display.height,
            rect.x0,
            rect.y0,
            rect.x1,
            rect.y1
        );

        Ok(self.commit(cropped))
    }

    /// Compute a scale preview from the scaling baseline.
    ///
    /// Neither the history nor the active raster changes. Repeated calls
    /// replace the preview; each is computed from the same baseline.
    ///
    /// # Errors
    ///
    /// - `EditError::NoActiveImage` if nothing is loaded
    /// - `EditError::InvalidParameter` if `ratio` is outside `[0.10, 2.00]`
    pub fn preview_scale(&mut self, ratio: f64) -> Result<&Raster, EditError> {
        let baseline = self
            .scaling_baseline
            .as_ref()
            .ok_or(EditError::NoActiveImage)?;
        let raster = transform::scale(baseline, ratio, self.config.resample_filter)?;

        log::debug!(
            "preview_scale: {:.2} -> {}x{}",
            ratio,
            raster.width(),
            raster.height()
        );

        let preview = self.preview.insert(ScalePreview { ratio, raster });
        Ok(&preview.raster)
    }

    /// Commit the pending scale preview.
    ///
    /// Returns `Ok(None)` without touching any state when no preview is
    /// pending (for example when the slider was released at its starting
    /// value).
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoActiveImage` if nothing is loaded.
    pub fn commit_scale(&mut self) -> Result<Option<&Raster>, EditError> {
        if self.history.active().is_none() {
            return Err(EditError::NoActiveImage);
        }
        let Some(preview) = self.preview.take() else {
            return Ok(None);
        };

        log::debug!("commit_scale: {:.2}", preview.ratio);
        Ok(Some(self.commit(preview.raster)))
    }

    /// Drop the pending scale preview, if any, without committing it.
    pub fn cancel_scale_preview(&mut self) {
        self.preview = None;
    }

    /// Apply a pixel filter to the active raster and commit the result.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoActiveImage` if nothing is loaded.
    pub fn apply_filter(&mut self, kind: FilterKind) -> Result<&Raster, EditError> {
        let active = self.history.active().ok_or(EditError::NoActiveImage)?;
        let filtered = transform::apply_filter(active, kind, self.config.edge_thresholds);

        log::debug!("apply_filter: {}", kind.label());
        Ok(self.commit(filtered))
    }

    /// Restore the state before the last committed edit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NothingToUndo` if there is no earlier state. A
    /// scale preview is never an earlier state.
    pub fn undo(&mut self) -> Result<&Raster, EditError> {
        let active = self.history.undo()?;
        log::debug!("undo: restored {}x{}", active.width(), active.height());

        self.preview = None;
        self.scaling_baseline = Some(active.clone());
        Ok(active)
    }

    /// Re-apply the last undone edit.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NothingToRedo` if nothing has been undone since
    /// the last commit.
    pub fn redo(&mut self) -> Result<&Raster, EditError> {
        let active = self.history.redo()?;
        log::debug!("redo: restored {}x{}", active.width(), active.height());

        self.preview = None;
        self.scaling_baseline = Some(active.clone());
        Ok(active)
    }

    /// The raster as loaded.
    pub fn original(&self) -> Option<&Raster> {
        self.original.as_ref()
    }

    /// The current edit result.
    pub fn active(&self) -> Option<&Raster> {
        self.history.active()
    }

    /// The raster scale previews are computed from.
    pub fn scaling_baseline(&self) -> Option<&Raster> {
        self.scaling_baseline.as_ref()
    }

    /// The pending scale preview, if any.
    pub fn preview(&self) -> Option<&ScalePreview> {
        self.preview.as_ref()
    }

    /// Ratio of the pending preview; `None` means the slider is at 100%.
    pub fn preview_ratio(&self) -> Option<f64> {
        self.preview.as_ref().map(|p| p.ratio)
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Commit `raster` to the history. Every transition resets the baseline
    /// to the new active raster and drops any pending preview.
    fn commit(&mut self, raster: Raster) -> &Raster {
        self.preview = None;
        self.scaling_baseline = Some(raster.clone());
        let active = self.history.commit(raster);
        log::debug!("commit: active {}x{}", active.width(), active.height());
        active
    }
}
