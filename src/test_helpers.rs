//! Shared test utilities for the thumbfit test suite.
//!
//! Fixtures are built in memory with the `image` crate instead of being
//! checked in, so every test states the exact geometry it relies on.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let jpeg = jpeg_bytes(400, 300);
//! let out = ResizeStrategy::new(15, 10).process(&jpeg).unwrap();
//! assert_eq!(decoded_dimensions(&out), (13, 10));
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat, Rgba, RgbaImage, RgbImage};
use std::io::Cursor;

// =========================================================================
// Encoded fixtures
// =========================================================================

/// A gradient JPEG of the given size.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut buf = Vec::new();
    JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// A PNG filled with a single RGBA color.
pub fn solid_png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color))),
        ImageFormat::Png,
    )
}

/// Encode any image in the given format.
pub fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

/// A 1x1 ICO file. Recognisable by its header but not decodable with the
/// compiled-in codecs.
pub fn ico_bytes() -> Vec<u8> {
    let mut ico = vec![
        0, 0, // reserved
        1, 0, // type: icon
        1, 0, // image count
        1, 1, // 1x1
        0, 0, // palette, reserved
        1, 0, // planes
        32, 0, // bits per pixel
    ];
    let png = solid_png_bytes(1, 1, [0, 0, 0, 0]);
    ico.extend_from_slice(&(png.len() as u32).to_le_bytes());
    ico.extend_from_slice(&22u32.to_le_bytes());
    ico.extend_from_slice(&png);
    ico
}

// =========================================================================
// Output inspection
// =========================================================================

/// Pixel dimensions of encoded bytes. Panics if they do not decode.
pub fn decoded_dimensions(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).unwrap();
    (img.width(), img.height())
}

/// Format sniffed from encoded bytes. Panics if unrecognised.
pub fn sniffed_format(bytes: &[u8]) -> ImageFormat {
    image::guess_format(bytes).unwrap()
}

/// Decode to RGBA8 for pixel assertions.
pub fn decode_rgba(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}
