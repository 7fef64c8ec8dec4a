//! Petpet WASM - WebAssembly bindings for the petpet image pipeline
//!
//! This crate exposes petpet-core to JavaScript/TypeScript callers.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types (`JsImage`, `JsEncodedOutput`)
//! - `decode` - decoding to RGBA, frame counting, resizing
//! - `transform` - fit, perspective, rotate, circle, square on single images
//! - `encode` - JPEG export
//! - `pipeline` - byte-in/byte-out still-or-animated rendering
//!
//! # Usage
//!
//! ```typescript
//! import init, { render_fit } from '@petpet/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = render_fit(bytes, { width: 200, height: 200 });
//! console.log(`Rendered ${out.format}, ${out.bytes().byteLength} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod pipeline;
mod transform;
mod types;

pub use decode::{decode_image, image_frame_count, resize};
pub use encode::encode_jpeg_from_image;
pub use pipeline::{render_fit, render_perspective};
pub use transform::{circle, fit_size, perspective, rotate, square};
pub use types::{JsEncodedOutput, JsImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
