//! Image processing: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, TIFF, WebP) |
//! | **Best-fit resize** | [`calculations::fit_within`] + Lanczos3 |
//! | **Canvas + composite** | `RgbaImage::from_pixel` + `imageops::overlay` |
//! | **Colors** | [`color::parse_color`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for fit and centering math (unit testable)
//! - **Parameters**: Resampling filter and encode quality
//! - **Color**: Background color grammar
//! - **Backend**: [`RasterEngine`] trait + [`RustEngine`]

pub mod backend;
pub mod calculations;
pub mod color;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, RasterEngine};
pub use color::Color;
pub use params::{Filter, Quality};
pub use rust_backend::{RasterImage, RustEngine, supported_input_extensions};
