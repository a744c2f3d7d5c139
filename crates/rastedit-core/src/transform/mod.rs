//! Transform operations: crop, scale and pixel filters.
//!
//! Every operation is a pure function from a borrowed [`Raster`] to a new
//! [`Raster`]; none of them modifies its input.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixels, right/bottom edges exclusive
//! - Scale ratios are fractions of the input size (1.0 = unchanged)
//! - Origin is top-left corner
//!
//! [`Raster`]: crate::raster::Raster

mod crop;
mod edge;
mod filter;
mod scale;

pub use crop::{crop, SourceRect};
pub use edge::canny;
pub use filter::{apply_filter, edge_detect, grayscale, FilterKind};
pub use scale::{scale, scaled_dimensions, validate_ratio, MAX_SCALE_RATIO, MIN_SCALE_RATIO};
