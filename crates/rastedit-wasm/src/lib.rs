//! Rastedit WASM - WebAssembly bindings for rastedit
//!
//! This crate exposes the rastedit-core edit session and file codecs to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for raster data
//! - `session` - The edit session (crop, scale, filters, undo/redo)
//! - `codec` - Image decoding and encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditSession } from '@rastedit/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession();
//! session.load_image(decode_image(new Uint8Array(await file.arrayBuffer())));
//! ```

use std::fmt::Display;

use wasm_bindgen::prelude::*;

mod codec;
mod session;
mod types;

pub use codec::{decode_image, encode_image};
pub use session::JsEditSession;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert an error into a JavaScript string value, logging it to the
/// browser console as a warning.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    let message = JsValue::from_str(&err.to_string());
    web_sys::console::warn_1(&message);
    message
}
