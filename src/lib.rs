//! # Thumbfit
//!
//! Fit encoded images into a fixed bounding box to produce thumbnails.
//!
//! Two strategies share one pipeline:
//!
//! ```text
//! bytes ──► decode ──► best-fit resize ──► [centered on W×H canvas] ──► bytes
//! ```
//!
//! - **Resize** keeps the aspect ratio and returns an image that fits within
//!   the box; one side may come out smaller.
//! - **Inscribe** does the same fit, then centers the result on a canvas of
//!   exactly the box size filled with a background color.
//!
//! Output always keeps the input's format.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`strategy`] | `ResizeStrategy`, `InscribeStrategy`, validation and typed errors |
//! | [`imaging`] | Raster engine trait, the `image`-crate engine, fit math and color parsing |
//! | [`config`] | `thumbfit.toml` loading, validation and merging over stock defaults |
//! | [`batch`] | Parallel directory runner that mirrors a source tree into an output tree |
//! | [`output`] | CLI output formatting |
//!
//! # Example
//!
//! ```no_run
//! use thumbfit::{ImageProcessingStrategy, InscribeStrategy};
//!
//! let data = std::fs::read("photo.jpg")?;
//! let thumb = InscribeStrategy::new(15, 10, "none").process(&data)?;
//! std::fs::write("thumb.jpg", thumb)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design Decisions
//!
//! ## Engine Behind a Trait
//!
//! Strategies never touch pixels directly. Everything raster-related goes
//! through [`imaging::RasterEngine`], which lets the unit tests swap in a
//! recording mock and assert on the exact sequence of operations without
//! decoding a single image.
//!
//! ## Validate On Every Call
//!
//! Strategy constructors accept any `i32` and any color string. Checks run
//! at the start of each `process` call, so a strategy built from bad input
//! fails with the offending value rather than at construction.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use strategy::{ImageProcessingStrategy, InscribeStrategy, ResizeStrategy, StrategyError};
