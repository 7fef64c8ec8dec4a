//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core petpet
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use image::RgbaImage;
use petpet_core::transform::{FitDirection, FitMode};
use petpet_core::{EncodedOutput, OutputFormat};
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Create a new JsImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsImage {
        JsImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsImage {
    pub(crate) fn from_rgba(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }

    /// Copy into a core image. `None` when the buffer length doesn't match
    /// the dimensions.
    pub(crate) fn to_rgba(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

/// Encoded pipeline output for JavaScript: the bytes plus their container.
#[wasm_bindgen]
pub struct JsEncodedOutput {
    format: OutputFormat,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsEncodedOutput {
    /// `"jpg"` or `"gif"`
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.format.extension().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.format.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_animated(&self) -> bool {
        self.format == OutputFormat::Gif
    }

    /// Returns the encoded bytes as Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<EncodedOutput> for JsEncodedOutput {
    fn from(output: EncodedOutput) -> Self {
        Self {
            format: output.format,
            bytes: output.bytes,
        }
    }
}

/// Convert a u8 fit mode value to the core FitMode enum.
///
/// Values:
/// - 0 = Inside (letterbox)
/// - 1 = Include (cover, crop overflow)
///
/// Any other value defaults to Include.
pub(crate) fn mode_from_u8(value: u8) -> FitMode {
    match value {
        0 => FitMode::Inside,
        _ => FitMode::Include,
    }
}

/// Convert a u8 direction value to the core FitDirection enum.
///
/// Values run clockwise from north: 1 = North, 2 = NorthEast, 3 = East,
/// 4 = SouthEast, 5 = South, 6 = SouthWest, 7 = West, 8 = NorthWest.
/// 0 and anything else is Center.
pub(crate) fn direction_from_u8(value: u8) -> FitDirection {
    match value {
        1 => FitDirection::North,
        2 => FitDirection::NorthEast,
        3 => FitDirection::East,
        4 => FitDirection::SouthEast,
        5 => FitDirection::South,
        6 => FitDirection::SouthWest,
        7 => FitDirection::West,
        8 => FitDirection::NorthWest,
        _ => FitDirection::Center,
    }
}
