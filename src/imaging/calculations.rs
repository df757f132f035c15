//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Engines call [`fit_within`] to size a best-fit resize, and the inscribe
//! strategy calls [`center_offsets`] to place the result on its canvas.

/// Calculate best-fit dimensions for a source inside a bounding box.
///
/// The result preserves the source aspect ratio, fits entirely within the
/// box, and touches the box on at least one axis. The other axis is rounded
/// to the nearest pixel and never drops below 1. An empty source or box
/// yields `(0, 0)`.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Bounding box dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Fitted dimensions
///
/// # Examples
/// ```
/// # use thumbfit::imaging::calculations::fit_within;
/// // 400x300 (4:3) into 15x10 → height is the limiting axis
/// assert_eq!(fit_within((400, 300), (15, 10)), (13, 10));
///
/// // 40x20 (2:1) into 15x10 → width is the limiting axis
/// assert_eq!(fit_within((40, 20), (15, 10)), (15, 8));
/// ```
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (box_w, box_h) = bounds;

    if src_w == 0 || src_h == 0 || box_w == 0 || box_h == 0 {
        return (0, 0);
    }

    // Cross-multiply in u64 so the comparison is exact for any u32 input
    let source_is_wider =
        u64::from(src_w) * u64::from(box_h) >= u64::from(src_h) * u64::from(box_w);

    if source_is_wider {
        // Width is the limiting axis
        let h = (f64::from(src_h) * f64::from(box_w) / f64::from(src_w)).round() as u32;
        (box_w, h.max(1).min(box_h))
    } else {
        // Height is the limiting axis
        let w = (f64::from(src_w) * f64::from(box_h) / f64::from(src_h)).round() as u32;
        (w.max(1).min(box_w), box_h)
    }
}

/// Offset that centers `inner` pixels inside `outer` pixels on one axis.
///
/// Rounds half away from zero: an odd remainder puts the extra pixel on
/// the leading side, shifting the content one pixel toward bottom/right.
pub fn center_offset(outer: u32, inner: u32) -> u32 {
    (f64::from(outer.saturating_sub(inner)) / 2.0).round() as u32
}

/// Offsets `(x, y)` that center an image of `inner` size on a canvas of
/// `outer` size.
pub fn center_offsets(outer: (u32, u32), inner: (u32, u32)) -> (u32, u32) {
    (
        center_offset(outer.0, inner.0),
        center_offset(outer.1, inner.1),
    )
}
