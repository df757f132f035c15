//! Thumbnail fitting strategies.
//!
//! A strategy is configured once (target box, and a background color for
//! inscribe) and then applied to any number of encoded images:
//!
//! ```text
//! validate ──► decode ──► best-fit resize ──► [canvas + center] ──► encode
//! ```
//!
//! | Strategy | Output size | Padding |
//! |---|---|---|
//! | [`ResizeStrategy`] | fits within W×H, aspect preserved | none |
//! | [`InscribeStrategy`] | exactly W×H | background color around centered content |
//!
//! Configuration is re-validated on every call so that long-lived
//! instances built from bad input fail at use time with a typed error.
//! Validation always runs before decoding. Any failure aborts the call
//! before output is produced; there is no fallback image.

mod inscribe;
mod resize;
pub mod validate;

pub use inscribe::InscribeStrategy;
pub use resize::ResizeStrategy;

use crate::config::{StrategyConfig, StrategyKind};
use crate::imaging::{BackendError, RasterEngine, RustEngine};
use std::fmt;
use thiserror::Error;

/// Which target dimension failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Image {axis} should be greater then zero, got {value}.")]
    InvalidDimension { axis: Axis, value: i32 },
    #[error("{0}")]
    InvalidColor(String),
    #[error("{0}")]
    InvalidBinaryImageData(String),
    /// The engine failed after the input decoded successfully.
    #[error(transparent)]
    Raster(#[from] BackendError),
}

/// Turns one encoded image into one encoded thumbnail.
pub trait ImageProcessingStrategy {
    fn process(&self, data: &[u8]) -> Result<Vec<u8>, StrategyError>;
}

/// Config-selected strategy.
#[derive(Debug, Clone)]
pub enum Strategy<E = RustEngine> {
    Resize(ResizeStrategy<E>),
    Inscribe(InscribeStrategy<E>),
}

impl<E: RasterEngine> Strategy<E> {
    /// Build the strategy named by `config.kind`. The background color is
    /// only used by inscribe.
    pub fn from_config(config: &StrategyConfig, engine: E) -> Self {
        match config.kind {
            StrategyKind::Resize => Strategy::Resize(
                ResizeStrategy::with_engine(engine, config.width, config.height)
                    .with_filter(config.filter),
            ),
            StrategyKind::Inscribe => Strategy::Inscribe(
                InscribeStrategy::with_engine(
                    engine,
                    config.width,
                    config.height,
                    config.background.clone(),
                )
                .with_filter(config.filter),
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Resize(_) => "resize",
            Strategy::Inscribe(_) => "inscribe",
        }
    }
}

impl<E: RasterEngine> ImageProcessingStrategy for Strategy<E> {
    fn process(&self, data: &[u8]) -> Result<Vec<u8>, StrategyError> {
        match self {
            Strategy::Resize(s) => s.process(data),
            Strategy::Inscribe(s) => s.process(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Filter;
    use crate::imaging::backend::tests::{MockEngine, RecordedOp};

    fn config(kind: StrategyKind) -> StrategyConfig {
        StrategyConfig {
            kind,
            width: 15,
            height: 10,
            background: "white".to_string(),
            filter: Filter::Triangle,
        }
    }

    #[test]
    fn invalid_dimension_message_names_axis_and_value() {
        let err = StrategyError::InvalidDimension {
            axis: Axis::Height,
            value: -1,
        };
        assert_eq!(
            err.to_string(),
            "Image height should be greater then zero, got -1."
        );
    }

    #[test]
    fn raster_error_message_is_not_double_prefixed() {
        let err = StrategyError::from(BackendError::ProcessingFailed("too big".into()));
        assert_eq!(err.to_string(), "Processing failed: too big");
    }

    #[test]
    fn from_config_builds_resize() {
        let strategy = Strategy::from_config(&config(StrategyKind::Resize), MockEngine::default());
        assert_eq!(strategy.name(), "resize");

        strategy.process(b"img").unwrap();
        let Strategy::Resize(inner) = &strategy else {
            panic!("expected resize strategy");
        };
        let ops = inner.engine().get_operations();
        assert!(ops.iter().all(|op| !matches!(op, RecordedOp::NewCanvas { .. })));
        assert!(ops.iter().any(|op| matches!(
            op,
            RecordedOp::Resize {
                filter: Filter::Triangle,
                ..
            }
        )));
    }

    #[test]
    fn from_config_builds_inscribe_with_background() {
        let strategy =
            Strategy::from_config(&config(StrategyKind::Inscribe), MockEngine::default());
        assert_eq!(strategy.name(), "inscribe");

        strategy.process(b"img").unwrap();
        let Strategy::Inscribe(inner) = &strategy else {
            panic!("expected inscribe strategy");
        };
        let ops = inner.engine().get_operations();
        assert_eq!(ops[0], RecordedOp::ParseColor("white".to_string()));
    }
}
