use super::validate::validate_dimensions;
use super::{ImageProcessingStrategy, StrategyError};
use crate::imaging::{Filter, RasterEngine, RustEngine};
use tracing::debug;

/// Best-fit resize into a bounding box, no padding.
///
/// The output keeps the source aspect ratio and format; one of its
/// dimensions may be smaller than the box.
#[derive(Debug, Clone)]
pub struct ResizeStrategy<E = RustEngine> {
    engine: E,
    width: i32,
    height: i32,
    filter: Filter,
}

impl ResizeStrategy {
    /// Resize strategy backed by the default [`RustEngine`].
    ///
    /// No validation happens here; see [`ImageProcessingStrategy::process`].
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_engine(RustEngine::new(), width, height)
    }
}

impl<E: RasterEngine> ResizeStrategy<E> {
    pub fn with_engine(engine: E, width: i32, height: i32) -> Self {
        Self {
            engine,
            width,
            height,
            filter: Filter::default(),
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: RasterEngine> ImageProcessingStrategy for ResizeStrategy<E> {
    fn process(&self, data: &[u8]) -> Result<Vec<u8>, StrategyError> {
        let bounds = validate_dimensions(self.width, self.height)?;

        let image = self
            .engine
            .decode(data)
            .map_err(|e| StrategyError::InvalidBinaryImageData(e.to_string()))?;

        let resized = self.engine.resize_best_fit(image, bounds, self.filter)?;
        let fitted = self.engine.dimensions(&resized);
        debug!(
            box_w = bounds.width,
            box_h = bounds.height,
            width = fitted.width,
            height = fitted.height,
            "Resized to fit"
        );

        Ok(self.engine.encode(&resized)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockEngine, RecordedOp};
    use image::ImageFormat;

    fn mock_strategy(width: i32, height: i32) -> ResizeStrategy<MockEngine> {
        ResizeStrategy::with_engine(MockEngine::default(), width, height)
    }

    #[test]
    fn zero_width_fails_before_decode() {
        let strategy = mock_strategy(0, 1);
        let err = strategy.process(b"anything").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Image width should be greater then zero, got 0."
        );
        assert!(strategy.engine().get_operations().is_empty());
    }

    #[test]
    fn negative_height_fails_before_decode() {
        let strategy = mock_strategy(1, -1);
        let err = strategy.process(b"").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Image height should be greater then zero, got -1."
        );
        assert!(strategy.engine().get_operations().is_empty());
    }

    #[test]
    fn decode_failure_is_invalid_binary_image_data() {
        let strategy = mock_strategy(1, 1);
        let err = strategy.process(b"").unwrap_err();

        assert!(matches!(err, StrategyError::InvalidBinaryImageData(_)));
        assert_eq!(strategy.engine().get_operations(), vec![RecordedOp::Decode(0)]);
    }

    #[test]
    fn pipeline_runs_decode_resize_encode() {
        let strategy = mock_strategy(15, 10);
        let out = strategy.process(b"jpeg").unwrap();

        assert_eq!(out, b"13x10.Jpeg");
        assert_eq!(
            strategy.engine().get_operations(),
            vec![
                RecordedOp::Decode(4),
                RecordedOp::Resize {
                    bounds: Dimensions::new(15, 10),
                    filter: Filter::Lanczos3,
                    result: Dimensions::new(13, 10),
                },
                RecordedOp::Encode {
                    dimensions: Dimensions::new(13, 10),
                    format: ImageFormat::Jpeg,
                },
            ]
        );
    }

    #[test]
    fn never_touches_canvas() {
        let strategy = mock_strategy(15, 10);
        strategy.process(b"jpeg").unwrap();
        assert!(
            strategy
                .engine()
                .get_operations()
                .iter()
                .all(|op| !matches!(
                    op,
                    RecordedOp::NewCanvas { .. } | RecordedOp::Composite { .. }
                ))
        );
    }

    #[test]
    fn filter_is_passed_through() {
        let strategy = mock_strategy(15, 10).with_filter(Filter::CatmullRom);
        strategy.process(b"jpeg").unwrap();
        assert!(strategy.engine().get_operations().iter().any(|op| matches!(
            op,
            RecordedOp::Resize {
                filter: Filter::CatmullRom,
                ..
            }
        )));
    }

    #[test]
    fn new_keeps_configuration_unvalidated() {
        let strategy = ResizeStrategy::new(-3, 7);
        assert_eq!((strategy.width(), strategy.height()), (-3, 7));
    }
}
