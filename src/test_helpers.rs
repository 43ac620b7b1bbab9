//! Shared test utilities for the photo-resizer test suite.
//!
//! Synthetic fixtures written into temp directories, plus a helper for
//! comparing the compressed payload of two JPEG streams.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("a.jpg"), 90, 60);
//! create_test_png(&tmp.path().join("b.png"), 40, 60);
//! ```

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::path::Path;

// =========================================================================
// Fixture files
// =========================================================================

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    ensure_parent(path);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid RGBA PNG file with a half-transparent gradient.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, 64, (y % 256) as u8, 128])
    });
    ensure_parent(path);
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Write bytes that pass the extension filter but do not decode.
pub fn create_corrupt_image(path: &Path) {
    ensure_parent(path);
    std::fs::write(path, b"\xFF\xD8\xFF\xE0 truncated garbage").unwrap();
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}

// =========================================================================
// JPEG inspection
// =========================================================================

/// Bytes from the start-of-scan marker to the end of the stream.
///
/// Byte stuffing keeps `FF DA` out of entropy-coded data, so the last
/// occurrence is the (single, baseline) SOS marker.
pub fn scan_data(jpeg: &[u8]) -> &[u8] {
    let sos = jpeg
        .windows(2)
        .rposition(|w| w == [0xFF, 0xDA])
        .unwrap_or_else(|| panic!("no SOS marker in {} byte stream", jpeg.len()));
    &jpeg[sos..]
}
