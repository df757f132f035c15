//! Raster engine trait and shared types.
//!
//! The [`RasterEngine`] trait is the seam between the thumbnail strategies
//! and whatever actually touches pixels. Strategies only sequence engine
//! calls and do the fit/centering arithmetic; decoding, resampling,
//! compositing and encoding all happen behind this trait.
//!
//! The production implementation is
//! [`RustEngine`](super::rust_backend::RustEngine), built on the `image`
//! crate. Tests use a recording mock so strategy ordering can be checked
//! without encoding real images.

use super::color::Color;
use super::params::Filter;
use image::ImageFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    InvalidColor(String),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Pixel dimensions of an image or bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Operations a raster engine must provide to the strategies.
///
/// `Image` is the engine's decoded, in-memory representation. Values are
/// owned by a single strategy call and never cached by the caller.
/// The trait requires `Sync` so one engine can back a strategy that is
/// shared across worker threads.
pub trait RasterEngine: Sync {
    type Image;

    /// Decode an encoded image, detecting its format from the content.
    fn decode(&self, data: &[u8]) -> Result<Self::Image, BackendError>;

    /// Resize preserving aspect ratio so the result fits within `bounds`.
    fn resize_best_fit(
        &self,
        image: Self::Image,
        bounds: Dimensions,
        filter: Filter,
    ) -> Result<Self::Image, BackendError>;

    /// Create a blank image of `size` filled with `background`.
    fn new_canvas(
        &self,
        size: Dimensions,
        background: Color,
        format: ImageFormat,
    ) -> Result<Self::Image, BackendError>;

    /// Alpha-composite `source` over `canvas` with its top-left at `(x, y)`.
    fn composite_over(
        &self,
        canvas: &mut Self::Image,
        source: &Self::Image,
        x: u32,
        y: u32,
    ) -> Result<(), BackendError>;

    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    fn format(&self, image: &Self::Image) -> ImageFormat;

    /// Encode in the image's own format.
    fn encode(&self, image: &Self::Image) -> Result<Vec<u8>, BackendError>;

    /// Parse a background color in the engine's grammar.
    fn parse_color(&self, spec: &str) -> Result<Color, BackendError>;
}
