//! Input validation shared by both strategies.
//!
//! Both checks are cheap and run before any decode so bad configuration
//! never pays for raster work.

use super::{Axis, StrategyError};
use crate::imaging::{Color, Dimensions, RasterEngine};

/// Check that both target dimensions are positive. Width is checked first.
pub fn validate_dimensions(width: i32, height: i32) -> Result<Dimensions, StrategyError> {
    Ok(Dimensions::new(
        positive(Axis::Width, width)?,
        positive(Axis::Height, height)?,
    ))
}

fn positive(axis: Axis, value: i32) -> Result<u32, StrategyError> {
    u32::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or(StrategyError::InvalidDimension { axis, value })
}

/// Parse the background color through the engine's own parser, so a color
/// accepted here is always one the canvas can be filled with.
pub fn validate_color<E: RasterEngine>(engine: &E, spec: &str) -> Result<Color, StrategyError> {
    engine
        .parse_color(spec)
        .map_err(|e| StrategyError::InvalidColor(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::RustEngine;

    #[test]
    fn accepts_positive_dimensions() {
        assert_eq!(validate_dimensions(15, 10).unwrap(), Dimensions::new(15, 10));
    }

    #[test]
    fn one_by_one_is_the_lower_bound() {
        assert_eq!(validate_dimensions(1, 1).unwrap(), Dimensions::new(1, 1));
    }

    #[test]
    fn rejects_zero_width() {
        let err = validate_dimensions(0, 1).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::InvalidDimension {
                axis: Axis::Width,
                value: 0
            }
        ));
        assert_eq!(
            err.to_string(),
            "Image width should be greater then zero, got 0."
        );
    }

    #[test]
    fn rejects_negative_height() {
        let err = validate_dimensions(1, -1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Image height should be greater then zero, got -1."
        );
    }

    #[test]
    fn width_is_reported_before_height() {
        let err = validate_dimensions(-5, 0).unwrap_err();
        assert!(matches!(
            err,
            StrategyError::InvalidDimension {
                axis: Axis::Width,
                value: -5
            }
        ));
    }

    #[test]
    fn extreme_values() {
        assert!(validate_dimensions(i32::MIN, 1).is_err());
        assert_eq!(
            validate_dimensions(i32::MAX, 1).unwrap(),
            Dimensions::new(i32::MAX as u32, 1)
        );
    }

    #[test]
    fn color_accepted_by_engine() {
        let engine = RustEngine::new();
        assert_eq!(validate_color(&engine, "none").unwrap(), Color::TRANSPARENT);
        assert_eq!(
            validate_color(&engine, "#ffffff").unwrap(),
            Color::rgb(255, 255, 255)
        );
    }

    #[test]
    fn color_rejected_carries_parser_message() {
        let err = validate_color(&RustEngine::new(), "foo").unwrap_err();
        assert!(matches!(&err, StrategyError::InvalidColor(msg) if msg.contains("foo")));
    }
}
