//! Rastedit Core - raster editing engine
//!
//! This crate holds the edit state of a single-image editor: the loaded
//! raster, the transforms that can be applied to it (crop, scale, grayscale,
//! edge detection), the mapping from display coordinates to source pixels,
//! and a linear undo/redo history. File decoding and encoding live in
//! [`codec`].
//!
//! The entry point for interactive use is [`EditSession`].

pub mod codec;
pub mod config;
pub mod error;
pub mod history;
pub mod luminance;
pub mod mapper;
pub mod raster;
pub mod session;
pub mod transform;

pub use config::{EdgeThresholds, EditorConfig, ResampleFilter};
pub use error::EditError;
pub use history::EditHistory;
pub use mapper::{map_to_source, CropRequest, DisplayPoint, Viewport};
pub use raster::{Channels, Raster};
pub use session::{EditSession, ScalePreview};
pub use transform::{crop, edge_detect, grayscale, scale, FilterKind, SourceRect};
