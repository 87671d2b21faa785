//! Presentation-facing text formatting.
//!
//! Every function here is pure: numbers in, display strings out. The
//! presentation layer renders these strings verbatim so sizes, percentages
//! and labels read the same everywhere.
//!
//! # Output Format
//!
//! ```text
//! Quality (80%)
//! Original:   2.41 MB
//! Compressed: 612.07 KB (75.2% reduction)
//! Download:   compressed.jpeg
//! ```

use crate::imaging::{OutputFormat, Quality};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Human-readable byte count.
///
/// - below 1 KB: whole bytes (`"500 B"`)
/// - below 1 MB: two-decimal kilobytes (`"2.00 KB"`)
/// - otherwise: two-decimal megabytes (`"5.00 MB"`)
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}

/// Percentage saved by compression: `(1 - compressed / original) * 100`.
///
/// `None` when `original` is 0, where the ratio is undefined. Negative when
/// the output is larger than the input.
pub fn reduction_percent(original: u64, compressed: u64) -> Option<f64> {
    if original == 0 {
        return None;
    }
    Some((1.0 - compressed as f64 / original as f64) * 100.0)
}

/// `"75.0% reduction"`, or `None` when there is nothing to compare against.
pub fn format_reduction(original: u64, compressed: u64) -> Option<String> {
    reduction_percent(original, compressed).map(|pct| format!("{:.1}% reduction", pct))
}

/// Label for the quality slider, e.g. `"Quality (80%)"`.
pub fn quality_label(quality: Quality) -> String {
    format!("Quality ({}%)", quality.percent())
}

/// Suggested filename for the download link, e.g. `"compressed.webp"`.
pub fn download_filename(format: OutputFormat) -> String {
    format!("compressed.{}", format.extension())
}

/// Text for the aspect-lock toggle: names the action a click performs.
pub fn lock_toggle_label(aspect_locked: bool) -> &'static str {
    if aspect_locked {
        "Unlock Ratio"
    } else {
        "Lock Ratio"
    }
}
