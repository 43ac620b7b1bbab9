//! Pure Rust codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, BMP, TIFF) | `image::ImageReader`, format sniffed from content, 4 GiB allocation cap |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (baseline, default quality) |
//! | Resolution tags | `img-parts` segment rewrite ([`exif_writer`](super::exif_writer)) |
//! | In-place replace | `tempfile::NamedTempFile::persist` (atomic rename) |

use super::backend::{BackendError, ImageBackend};
use super::exif_writer;
use super::params::{EncodeParams, ResolutionMetadata};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, Limits, RgbImage};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode RGB pixels to an in-memory baseline JPEG.
fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, BackendError> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| BackendError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Allocation cap for a single decode. The `image` default of 512 MiB
/// rejects large 16-bit TIFF scans.
const DECODE_ALLOC_LIMIT: u64 = 4 * 1024 * 1024 * 1024;

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_alloc = Some(DECODE_ALLOC_LIMIT);
    limits
}

/// Replace `path` with `data` via a temp file in the same directory, so the
/// old contents survive any failure before the final rename.
fn replace_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(path)?.permissions();
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    // Temp files are created 0600; keep the mode the encoder gave the file.
    tmp.as_file().set_permissions(permissions)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let mut reader = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?;
        reader.limits(decode_limits());
        reader.decode().map_err(|e| BackendError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), BackendError> {
        let bytes = encode_jpeg(image, params.quality.value())?;
        if let Some(parent) = params.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&params.output, &bytes)?;
        debug!(
            output = %params.output.display(),
            bytes = bytes.len(),
            "wrote JPEG"
        );
        Ok(())
    }

    fn tag_resolution(&self, path: &Path, meta: &ResolutionMetadata) -> Result<(), BackendError> {
        let data = std::fs::read(path)
            .map_err(|e| BackendError::Metadata(format!("cannot reopen {}: {e}", path.display())))?;
        let tagged = exif_writer::tag_jpeg(data, meta)
            .map_err(|e| BackendError::Metadata(format!("{}: {e}", path.display())))?;
        replace_file(path, &tagged).map_err(|e| {
            BackendError::Metadata(format!("cannot rewrite {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), dpi = meta.x_dpi, "tagged resolution");
        Ok(())
    }
}
