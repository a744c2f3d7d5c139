//! Decoding file bytes into an upright RGB raster.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use thiserror::Error;

use crate::raster::Raster;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// No supported format matches the leading bytes.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The file decoded to an image with a zero dimension.
    #[error("Image has no pixels")]
    EmptyImage,
}

/// Decode PNG, JPEG, BMP, GIF or TIFF bytes into an RGB raster.
///
/// An EXIF orientation tag, when present, is applied so the raster comes
/// out upright. Gray and alpha inputs are converted to 3-channel RGB.
///
/// # Errors
///
/// - `DecodeError::InvalidFormat` if the format cannot be recognized
/// - `DecodeError::CorruptedFile` if the decoder fails
/// - `DecodeError::EmptyImage` for zero-sized images
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let decoded = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    let upright = match read_orientation(bytes) {
        Some(tag) => make_upright(decoded, tag),
        None => decoded,
    };

    Raster::from_rgb_image(upright.into_rgb8()).map_err(|_| DecodeError::EmptyImage)
}

/// EXIF orientation tag (1-8) of the primary image, if the file has one.
pub fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .filter(|tag| (1..=8).contains(tag))
}

/// Undo the camera orientation described by EXIF `tag`.
///
/// Every orientation is a number of clockwise quarter turns optionally
/// followed by a horizontal mirror.
fn make_upright(img: DynamicImage, tag: u32) -> DynamicImage {
    let (quarter_turns, mirror) = match tag {
        2 => (0, true),
        3 => (2, false),
        4 => (2, true),
        5 => (1, true),
        6 => (1, false),
        7 => (3, true),
        8 => (3, false),
        _ => (0, false),
    };

    let turned = match quarter_turns {
        1 => img.rotate90(),
        2 => img.rotate180(),
        3 => img.rotate270(),
        _ => img,
    };
    if mirror {
        turned.fliph()
    } else {
        turned
    }
}
