//! End-to-end session tests against the real `image`/`webp` codec.
//!
//! Run with: cargo test --test session_flow

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use imgsqueeze::imaging::OutputFormat;
use imgsqueeze::output::{format_reduction, format_size};
use imgsqueeze::types::DimensionField;
use imgsqueeze::{CompressorConfig, Session, SessionError, SessionStatus};

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
    });
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 95)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

fn session() -> Session {
    Session::from_config(&CompressorConfig::default())
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn jpeg_800x600_to_png_400x300() {
    let mut s = session();
    s.load_file(jpeg(800, 600), "image/jpeg").unwrap();
    s.set_output_format(OutputFormat::Png);
    s.set_quality(0.8);
    s.edit_dimension(DimensionField::Width, "400");
    assert_eq!(s.options().target(), (400, 300));

    let out = s.compress().unwrap();
    assert_eq!(out.format(), OutputFormat::Png);
    assert_eq!(out.dimensions(), (400, 300));
    assert!(out.byte_size() > 0);

    let decoded = image::load_from_memory(out.bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 300));
    assert_eq!(s.status(), SessionStatus::Ready);
}

#[test]
fn locked_box_fits_inside_requested_box() {
    let mut s = session();
    s.load_file(jpeg(800, 600), "image/jpeg").unwrap();
    s.toggle_aspect_lock();
    s.edit_dimension(DimensionField::Width, "1000");
    s.edit_dimension(DimensionField::Height, "300");
    s.toggle_aspect_lock();

    let out = s.compress().unwrap();
    assert_eq!(out.dimensions(), (400, 300));
}

#[test]
fn unlocked_box_stretches() {
    let mut s = session();
    s.load_file(jpeg(80, 60), "image/jpeg").unwrap();
    s.toggle_aspect_lock();
    s.edit_dimension(DimensionField::Height, "200");

    let out = s.compress().unwrap();
    assert_eq!(out.dimensions(), (80, 200));
}

#[test]
fn webp_output_is_riff() {
    let mut s = session();
    s.load_file(jpeg(120, 90), "image/jpeg").unwrap();
    s.set_output_format_mime("image/webp");

    let out = s.compress().unwrap();
    assert_eq!(&out.bytes()[..4], b"RIFF");
    assert_eq!(&out.bytes()[8..12], b"WEBP");
}

#[test]
fn lossy_formats_shrink_with_quality() {
    for format in [OutputFormat::Jpeg, OutputFormat::WebP] {
        let mut s = session();
        s.load_file(jpeg(256, 256), "image/jpeg").unwrap();
        s.set_output_format(format);

        s.set_quality(1.0);
        let high = s.compress().unwrap().byte_size();
        s.set_quality(0.1);
        let low = s.compress().unwrap().byte_size();
        assert!(low < high, "{format}: {low} should be < {high}");
    }
}

#[test]
fn png_ignores_quality() {
    let mut s = session();
    s.load_file(jpeg(64, 64), "image/jpeg").unwrap();
    s.set_output_format(OutputFormat::Png);

    s.set_quality(1.0);
    let high = s.compress().unwrap().digest().to_string();
    s.set_quality(0.1);
    let low = s.compress().unwrap().digest().to_string();
    assert_eq!(high, low);
}

// =============================================================================
// Failure paths
// =============================================================================

#[test]
fn text_file_is_unsupported_and_keeps_previous_image() {
    let mut s = session();
    s.load_file(jpeg(800, 600), "image/jpeg").unwrap();
    s.set_dimension(DimensionField::Width, 200);
    let options_before = *s.options();

    let err = s
        .load_file(b"just some text\n".to_vec(), "text/plain")
        .unwrap_err();
    assert!(matches!(err, SessionError::UnsupportedFileType { .. }));
    assert_eq!(s.status(), SessionStatus::Error);
    assert_eq!(*s.options(), options_before);
    assert_eq!(s.dimensions().unwrap().natural_width(), 800);
    assert_eq!(s.source().unwrap().mime_type(), "image/jpeg");

    // The untouched source can still be compressed.
    assert_eq!(s.compress().unwrap().dimensions(), (200, 150));
}

#[test]
fn huge_unlocked_box_fails_without_aborting() {
    let mut s = session();
    s.load_file(jpeg(8, 6), "image/jpeg").unwrap();
    s.toggle_aspect_lock();
    s.set_dimension(DimensionField::Width, 200_000);
    s.set_dimension(DimensionField::Height, 200_000);

    let err = s.compress().unwrap_err();
    assert!(matches!(err, SessionError::Compress(_)));
    assert_eq!(s.status(), SessionStatus::Error);
    assert!(s.output().is_none());

    // A sane box still works afterwards.
    s.set_dimension(DimensionField::Width, 80);
    s.set_dimension(DimensionField::Height, 60);
    assert_eq!(s.compress().unwrap().dimensions(), (80, 60));
}

#[test]
fn garbage_with_image_mime_is_invalid() {
    let mut s = session();
    let err = s
        .load_file(b"definitely not a jpeg".to_vec(), "image/jpeg")
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidImage(_)));
    assert_eq!(err.user_message(), "Please select a valid image file");
    assert!(s.dimensions().is_none());
}

#[test]
fn compress_before_load_is_not_ready() {
    let mut s = session();
    let err = s.compress().unwrap_err();
    assert!(matches!(err, SessionError::NoSourceAsset));
    assert_ne!(s.status(), SessionStatus::Ready);
    assert_eq!(s.view().error_message.as_deref(), Some("No image uploaded."));
}

// =============================================================================
// Handle accounting
// =============================================================================

#[test]
fn at_most_one_live_output() {
    let mut s = session();
    for (w, h) in [(40, 30), (64, 64), (30, 90)] {
        s.load_file(jpeg(w, h), "image/jpeg").unwrap();
        for format in OutputFormat::ALL {
            s.set_output_format(format);
            s.compress().unwrap();
            assert_eq!(s.live_encoded(), 1);
            assert_eq!(s.live_sources(), 1);
        }
        let _ = s.load_file(b"nope".to_vec(), "text/plain");
        assert!(s.live_encoded() <= 1);
    }
}

// =============================================================================
// View
// =============================================================================

#[test]
fn view_reports_reduction_against_source() {
    let mut s = session();
    let source = jpeg(400, 400);
    let original = source.len() as u64;
    s.load_file(source, "image/jpeg").unwrap();
    s.set_quality(0.1);
    s.edit_dimension(DimensionField::Width, "100");
    let compressed = s.compress().unwrap().byte_size();

    let view = s.view();
    assert_eq!(view.labels.original_size, Some(format_size(original)));
    assert_eq!(view.labels.compressed_size, Some(format_size(compressed)));
    assert_eq!(view.labels.reduction, format_reduction(original, compressed));
    assert_eq!(view.labels.download_filename.as_deref(), Some("compressed.jpeg"));
    assert_eq!(view.last_message.as_deref(), Some("Image compressed successfully!"));
}
