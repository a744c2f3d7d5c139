//! Raster encoding for export.
//!
//! Every format goes through the `image` crate's encoders. JPEG gets its own
//! path so the quality setting can be passed through.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::{Channels, Raster};

/// Default JPEG quality when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The file extension does not name a supported output format
    #[error("Unsupported output format: {0:?}")]
    UnsupportedFormat(String),

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output container and its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Png,
    /// Lossy JPEG; quality is clamped to 1-100 at encode time.
    Jpeg { quality: u8 },
    Bmp,
    Gif,
    Tiff,
}

impl OutputFormat {
    /// Pick a format from a file extension (case-insensitive, leading dot
    /// allowed). JPEG uses [`DEFAULT_JPEG_QUALITY`].
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::UnsupportedFormat` for unknown extensions.
    pub fn from_extension(ext: &str) -> Result<Self, EncodeError> {
        let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            "bmp" => Ok(OutputFormat::Bmp),
            "gif" => Ok(OutputFormat::Gif),
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            _ => Err(EncodeError::UnsupportedFormat(ext.to_string())),
        }
    }
}

/// Encode a raster into file bytes.
///
/// Gray rasters are written as single-channel images where the format
/// supports it. GIF output is always written from RGB.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 60-90: Good to medium quality
/// * Below 60: Low quality, visible artifacts
///
/// # Errors
///
/// Returns `EncodeError::EncodingFailed` if the encoder rejects the data.
pub fn encode_image(raster: &Raster, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = raster.dimensions();
    let color = match raster.channels() {
        Channels::Gray => ExtendedColorType::L8,
        Channels::Rgb => ExtendedColorType::Rgb8,
    };

    let mut output = Cursor::new(Vec::new());

    let result = match format {
        OutputFormat::Jpeg { quality } => {
            let quality = quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut output, quality).write_image(
                raster.pixels(),
                width,
                height,
                color,
            )
        }
        OutputFormat::Gif => {
            let rgb = raster.to_rgb_image();
            image::write_buffer_with_format(
                &mut output,
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
                ImageFormat::Gif,
            )
        }
        OutputFormat::Png => write_with(&mut output, raster, color, ImageFormat::Png),
        OutputFormat::Bmp => write_with(&mut output, raster, color, ImageFormat::Bmp),
        OutputFormat::Tiff => write_with(&mut output, raster, color, ImageFormat::Tiff),
    };

    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(output.into_inner())
}

fn write_with(
    output: &mut Cursor<Vec<u8>>,
    raster: &Raster,
    color: ExtendedColorType,
    format: ImageFormat,
) -> image::ImageResult<()> {
    image::write_buffer_with_format(
        output,
        raster.pixels(),
        raster.width(),
        raster.height(),
        color,
        format,
    )
}
