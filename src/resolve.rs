//! Constraint resolver: keeps the target box consistent with the aspect lock.
//!
//! Two operations:
//!
//! - [`on_dimension_edit`] — the user changed one edge; under a locked ratio
//!   the other edge follows.
//! - [`resolve_output_box`] — turn the target box into the integer box the
//!   image is actually rendered at. Under a locked ratio the image is fitted
//!   *inside* the target box, never stretched and never larger than either
//!   requested edge.
//!
//! Neither operation enforces the UI's suggested [100, 3840] bounds; those are
//! advertised to the presentation layer via configuration only.

use crate::dimensions::ImageDimensions;
use crate::imaging::calculations::{fit_inside, paired_edge, round_to_pixels};
use crate::types::{CompressionOptions, DimensionField, OutputBox};

/// Parse raw text from a dimension field.
///
/// Returns `None` for anything that is not a positive integer. Callers treat
/// `None` as "ignore this keystroke".
pub fn parse_dimension_input(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

fn ratio_of(dims: Option<&ImageDimensions>) -> f64 {
    dims.map_or(1.0, ImageDimensions::aspect_ratio)
}

/// Apply an edit of one target edge.
///
/// Unlocked: only `field` changes. Locked: the paired edge is recomputed from
/// the loaded image's aspect ratio (1.0 when nothing is loaded) and rounded
/// half-up. A value of 0 is ignored.
pub fn on_dimension_edit(
    field: DimensionField,
    new_value: u32,
    options: &CompressionOptions,
    dims: Option<&ImageDimensions>,
) -> CompressionOptions {
    let mut next = *options;
    if new_value == 0 {
        return next;
    }

    match field {
        DimensionField::Width => {
            next.target_width = new_value;
            if options.aspect_locked {
                next.target_height = paired_edge(new_value, ratio_of(dims), true);
            }
        }
        DimensionField::Height => {
            next.target_height = new_value;
            if options.aspect_locked {
                next.target_width = paired_edge(new_value, ratio_of(dims), false);
            }
        }
    }
    next
}

/// [`on_dimension_edit`] for raw user text. Malformed input leaves the
/// options unchanged.
pub fn on_dimension_input(
    field: DimensionField,
    raw: &str,
    options: &CompressionOptions,
    dims: Option<&ImageDimensions>,
) -> CompressionOptions {
    match parse_dimension_input(raw) {
        Some(value) => on_dimension_edit(field, value, options, dims),
        None => *options,
    }
}

/// The output box before rounding.
///
/// Unlocked, this is the target box verbatim. Locked, it is the largest box
/// with the image's aspect ratio that fits inside the target box; one edge
/// is usually fractional.
pub fn resolve_fractional_box(options: &CompressionOptions, dims: &ImageDimensions) -> (f64, f64) {
    if options.aspect_locked {
        fit_inside(options.target(), dims.aspect_ratio())
    } else {
        (options.target_width as f64, options.target_height as f64)
    }
}

/// The integer box to render at: [`resolve_fractional_box`] rounded half-up,
/// with each edge at least 1px.
pub fn resolve_output_box(options: &CompressionOptions, dims: &ImageDimensions) -> OutputBox {
    let (width, height) = resolve_fractional_box(options, dims);
    OutputBox {
        width: round_to_pixels(width),
        height: round_to_pixels(height),
    }
}
