//! File decoding and encoding around the editing engine.
//!
//! Decoding yields an upright RGB [`Raster`](crate::raster::Raster);
//! encoding writes a raster to PNG, JPEG, BMP, GIF or TIFF bytes.

mod decode;
mod encode;

pub use decode::{decode_image, read_orientation, DecodeError};
pub use encode::{encode_image, EncodeError, OutputFormat, DEFAULT_JPEG_QUALITY};
