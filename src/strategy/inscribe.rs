use super::validate::{validate_color, validate_dimensions};
use super::{ImageProcessingStrategy, StrategyError};
use crate::imaging::calculations::center_offsets;
use crate::imaging::{Filter, RasterEngine, RustEngine};
use tracing::debug;

/// Best-fit resize, then center on a canvas of exactly the target size.
///
/// The canvas is filled with the background color and uses the source's
/// format. Because the resized image touches the box on at least one axis,
/// the padding only ever appears on one axis (letterbox or pillarbox).
#[derive(Debug, Clone)]
pub struct InscribeStrategy<E = RustEngine> {
    engine: E,
    width: i32,
    height: i32,
    background: String,
    filter: Filter,
}

impl InscribeStrategy {
    /// Inscribe strategy backed by the default [`RustEngine`].
    ///
    /// No validation happens here; see [`ImageProcessingStrategy::process`].
    pub fn new(width: i32, height: i32, background: impl Into<String>) -> Self {
        Self::with_engine(RustEngine::new(), width, height, background)
    }
}

impl<E: RasterEngine> InscribeStrategy<E> {
    pub fn with_engine(engine: E, width: i32, height: i32, background: impl Into<String>) -> Self {
        Self {
            engine,
            width,
            height,
            background: background.into(),
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

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: RasterEngine> ImageProcessingStrategy for InscribeStrategy<E> {
    fn process(&self, data: &[u8]) -> Result<Vec<u8>, StrategyError> {
        let size = validate_dimensions(self.width, self.height)?;
        let background = validate_color(&self.engine, &self.background)?;

        let image = self
            .engine
            .decode(data)
            .map_err(|e| StrategyError::InvalidBinaryImageData(e.to_string()))?;

        let resized = self.engine.resize_best_fit(image, size, self.filter)?;
        let fitted = self.engine.dimensions(&resized);
        let (x, y) = center_offsets(size.as_tuple(), fitted.as_tuple());

        let mut canvas =
            self.engine
                .new_canvas(size, background, self.engine.format(&resized))?;
        self.engine.composite_over(&mut canvas, &resized, x, y)?;
        debug!(
            canvas_w = size.width,
            canvas_h = size.height,
            width = fitted.width,
            height = fitted.height,
            x,
            y,
            "Inscribed into canvas"
        );

        Ok(self.engine.encode(&canvas)?)
    }
}
