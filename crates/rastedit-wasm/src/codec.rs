//! File decoding and encoding bindings.
//!
//! # Example
//!
//! ```typescript
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const png = encode_image(session.active(), "png", 90);
//! ```

use rastedit_core::codec::{self, OutputFormat};
use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

/// Decode PNG, JPEG, BMP, GIF or TIFF bytes into an RGB raster.
///
/// EXIF orientation is applied, so the result is always upright.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    codec::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(crate::to_js_error)
}

/// Encode a raster for saving.
///
/// # Arguments
///
/// * `image` - The raster to encode
/// * `extension` - Target file extension (`png`, `jpg`, `jpeg`, `bmp`,
///   `gif`, `tif`, `tiff`)
/// * `quality` - JPEG quality (1-100); ignored for other formats
#[wasm_bindgen]
pub fn encode_image(image: &JsRaster, extension: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = match OutputFormat::from_extension(extension).map_err(crate::to_js_error)? {
        OutputFormat::Jpeg { .. } => OutputFormat::Jpeg { quality },
        other => other,
    };

    codec::encode_image(image.raster(), format).map_err(crate::to_js_error)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_garbage_fails() {
        assert!(decode_image(&[0x00, 0x01, 0x02]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_unknown_extension_fails() {
        let image = JsRaster::new(1, 1, 1, vec![0]).unwrap();
        assert!(encode_image(&image, "webp", 90).is_err());
    }
}
