//! Pure Rust raster engine built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Best-fit resize | [`fit_within`] + `DynamicImage::resize_exact` |
//! | Canvas | `image::RgbaImage::from_pixel` |
//! | Composite over | `image::imageops::overlay` |
//! | Encode | `DynamicImage::write_to` / `JpegEncoder` with [`Quality`] |
//! | Color parsing | [`parse_color`](super::color::parse_color) |

use super::backend::{BackendError, Dimensions, RasterEngine};
use super::calculations::fit_within;
use super::color::{Color, parse_color};
use super::params::{Filter, Quality};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::borrow::Cow;
use std::io::Cursor;
use std::sync::LazyLock;
use tracing::debug;

/// Extensions whose decoders are compiled in, with the format they map to.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled() && fmt.writing_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the file extensions the engine can both decode and re-encode.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// A decoded image together with the format it was decoded from.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: DynamicImage,
    format: ImageFormat,
}

impl RasterImage {
    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }
}

/// Largest pixel buffer the engine will allocate, matching the `image`
/// crate's own decoder default (512 MiB).
pub const DEFAULT_MAX_ALLOC: u64 = 512 * 1024 * 1024;

/// Bytes per pixel of the `f32` RGBA scratch buffer used while resampling.
const RESAMPLE_SCRATCH_BPP: u64 = 16;

/// Raster engine using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy)]
pub struct RustEngine {
    quality: Quality,
    max_alloc: u64,
}

impl Default for RustEngine {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            max_alloc: image::Limits::default()
                .max_alloc
                .unwrap_or(DEFAULT_MAX_ALLOC),
        }
    }
}

impl RustEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that encodes lossy formats at `quality`.
    pub fn with_quality(quality: Quality) -> Self {
        Self {
            quality,
            ..Self::default()
        }
    }

    /// Cap on any single buffer allocated for a resize or canvas.
    /// Targets over the cap fail with [`BackendError::ProcessingFailed`].
    pub fn with_max_alloc(mut self, bytes: u64) -> Self {
        self.max_alloc = bytes;
        self
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn max_alloc(&self) -> u64 {
        self.max_alloc
    }

    fn require_within_limit(
        &self,
        width: u32,
        height: u32,
        bytes_per_pixel: u64,
        what: &str,
    ) -> Result<(), BackendError> {
        let bytes = u64::from(width)
            .saturating_mul(u64::from(height))
            .saturating_mul(bytes_per_pixel);
        if bytes > self.max_alloc {
            return Err(BackendError::ProcessingFailed(format!(
                "{what} of {width}x{height} needs {bytes} bytes, over the {} byte limit",
                self.max_alloc
            )));
        }
        Ok(())
    }
}

fn require_non_empty(size: Dimensions, what: &str) -> Result<(), BackendError> {
    if size.width == 0 || size.height == 0 {
        return Err(BackendError::ProcessingFailed(format!(
            "{what} must not be empty, got {}x{}",
            size.width, size.height
        )));
    }
    Ok(())
}

/// Convert pixels into a layout the target encoder accepts.
///
/// JPEG has no alpha channel, so alpha is dropped rather than blended.
/// The WebP encoder only takes 8-bit RGB(A).
fn encodable(pixels: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    match (format, pixels) {
        (ImageFormat::Jpeg, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_)) => {
            Cow::Borrowed(pixels)
        }
        (ImageFormat::Jpeg, other) => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
        (ImageFormat::WebP, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => {
            Cow::Borrowed(pixels)
        }
        (ImageFormat::WebP, other) if other.color().has_alpha() => {
            Cow::Owned(DynamicImage::ImageRgba8(other.to_rgba8()))
        }
        (ImageFormat::WebP, other) => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
        _ => Cow::Borrowed(pixels),
    }
}

impl RasterEngine for RustEngine {
    type Image = RasterImage;

    fn decode(&self, data: &[u8]) -> Result<RasterImage, BackendError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| BackendError::Decode(format!("Failed to read image data: {e}")))?;

        let format = reader.format().ok_or_else(|| {
            BackendError::Decode(format!(
                "Unrecognized image format ({} bytes)",
                data.len()
            ))
        })?;
        if !format.reading_enabled() {
            return Err(BackendError::Decode(format!(
                "No decode delegate for {format:?} images"
            )));
        }

        let pixels = reader
            .decode()
            .map_err(|e| BackendError::Decode(format!("Failed to decode {format:?} image: {e}")))?;

        debug!(
            ?format,
            width = pixels.width(),
            height = pixels.height(),
            "Decoded image"
        );
        Ok(RasterImage { pixels, format })
    }

    fn resize_best_fit(
        &self,
        image: RasterImage,
        bounds: Dimensions,
        filter: Filter,
    ) -> Result<RasterImage, BackendError> {
        require_non_empty(bounds, "Resize bounds")?;

        let current = (image.pixels.width(), image.pixels.height());
        let (width, height) = fit_within(current, bounds.as_tuple());

        if (width, height) == current {
            debug!(width, height, "Image already fits bounding box, skipping resize");
            return Ok(image);
        }

        let bpp = u64::from(image.pixels.color().bytes_per_pixel());
        self.require_within_limit(width, height, bpp, "Resize target")?;
        self.require_within_limit(
            current.0,
            height,
            RESAMPLE_SCRATCH_BPP,
            "Resize scratch buffer",
        )?;

        debug!(
            orig_w = current.0,
            orig_h = current.1,
            new_width = width,
            new_height = height,
            ?filter,
            "Resizing image to best fit"
        );
        Ok(RasterImage {
            pixels: image.pixels.resize_exact(width, height, filter.into()),
            format: image.format,
        })
    }

    fn new_canvas(
        &self,
        size: Dimensions,
        background: Color,
        format: ImageFormat,
    ) -> Result<RasterImage, BackendError> {
        require_non_empty(size, "Canvas")?;
        self.require_within_limit(size.width, size.height, 4, "Canvas")?;
        let pixels = RgbaImage::from_pixel(size.width, size.height, background.into());
        Ok(RasterImage {
            pixels: DynamicImage::ImageRgba8(pixels),
            format,
        })
    }

    fn composite_over(
        &self,
        canvas: &mut RasterImage,
        source: &RasterImage,
        x: u32,
        y: u32,
    ) -> Result<(), BackendError> {
        let top = source.pixels.to_rgba8();
        match &mut canvas.pixels {
            DynamicImage::ImageRgba8(base) => {
                image::imageops::overlay(base, &top, i64::from(x), i64::from(y));
            }
            other => {
                let mut base = other.to_rgba8();
                image::imageops::overlay(&mut base, &top, i64::from(x), i64::from(y));
                *other = DynamicImage::ImageRgba8(base);
            }
        }
        Ok(())
    }

    fn dimensions(&self, image: &RasterImage) -> Dimensions {
        Dimensions::new(image.pixels.width(), image.pixels.height())
    }

    fn format(&self, image: &RasterImage) -> ImageFormat {
        image.format
    }

    fn encode(&self, image: &RasterImage) -> Result<Vec<u8>, BackendError> {
        let format = image.format;
        if !format.writing_enabled() {
            return Err(BackendError::Encode(format!(
                "Unsupported output format: {format:?}"
            )));
        }

        let pixels = encodable(&image.pixels, format);
        let mut buf = Cursor::new(Vec::new());
        let written = match format {
            ImageFormat::Jpeg => {
                let quality = u8::try_from(self.quality.value().clamp(1, 100)).unwrap_or(100);
                let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
                pixels.write_with_encoder(encoder)
            }
            other => pixels.write_to(&mut buf, other),
        };
        written.map_err(|e| BackendError::Encode(format!("{format:?}: {e}")))?;

        let bytes = buf.into_inner();
        debug!(?format, bytes = bytes.len(), "Encoded image");
        Ok(bytes)
    }

    fn parse_color(&self, spec: &str) -> Result<Color, BackendError> {
        parse_color(spec)
            .ok_or_else(|| BackendError::InvalidColor(format!("unrecognized color '{spec}'")))
    }
}
