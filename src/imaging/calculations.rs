//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Round a non-negative pixel measure half-up and keep it at least 1px.
///
/// A surface cannot have a zero-length edge, so anything that would round
/// to 0 becomes 1.
pub fn round_to_pixels(value: f64) -> u32 {
    if !value.is_finite() || value < 1.0 {
        return 1;
    }
    value.round().min(u32::MAX as f64) as u32
}

/// Compute the edge paired with `edited` under a locked aspect ratio.
///
/// `ratio` is width / height. Editing the width yields the height
/// (`width / ratio`); editing the height yields the width (`height * ratio`).
///
/// # Examples
/// ```
/// # use imgsqueeze::imaging::calculations::paired_edge;
/// // 800x600 source: width 400 → height 300
/// assert_eq!(paired_edge(400, 800.0 / 600.0, true), 300);
/// // ...and height 300 → width 400
/// assert_eq!(paired_edge(300, 800.0 / 600.0, false), 400);
/// ```
pub fn paired_edge(edited: u32, ratio: f64, edited_is_width: bool) -> u32 {
    let paired = if edited_is_width {
        edited as f64 / ratio
    } else {
        edited as f64 * ratio
    };
    round_to_pixels(paired)
}

/// Fit a box of the given aspect ratio inside a target box.
///
/// Returns fractional dimensions: one edge matches the target exactly, the
/// other shrinks so the result keeps `ratio`. Neither edge ever exceeds the
/// target.
///
/// # Arguments
/// * `target` - Requested bounding box (width, height)
/// * `ratio` - Aspect ratio to preserve (width / height)
pub fn fit_inside(target: (u32, u32), ratio: f64) -> (f64, f64) {
    let (tgt_w, tgt_h) = (target.0 as f64, target.1 as f64);
    let tgt_ratio = tgt_w / tgt_h;

    if tgt_ratio > ratio {
        // Target is wider than the source: height binds, width shrinks
        (tgt_h * ratio, tgt_h)
    } else {
        // Target is taller (or equal): width binds, height shrinks
        (tgt_w, tgt_w / ratio)
    }
}
