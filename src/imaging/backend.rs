//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three codec operations the pipeline
//! needs: decode a source, encode the output, and tag the written file with
//! resolution metadata. Geometry and resampling are pure functions and live
//! outside the backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust, statically
//! linked.

use super::params::{EncodeParams, ResolutionMetadata};
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Metadata write failed: {0}")]
    Metadata(String),
}

/// Pixel size of a decoded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image codec backends.
///
/// `encode` and `tag_resolution` are deliberately separate calls: the first
/// produces a complete file on disk, the second augments it in place and must
/// leave it intact when it fails.
pub trait ImageBackend {
    /// Read and decode an image file.
    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` to `params.output`, creating its parent directory if
    /// needed and replacing any existing file.
    fn encode(&self, image: &RgbImage, params: &EncodeParams) -> Result<(), BackendError>;

    /// Losslessly add resolution metadata to an already-written file.
    fn tag_resolution(&self, path: &Path, meta: &ResolutionMetadata) -> Result<(), BackendError>;
}
