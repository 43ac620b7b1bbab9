//! High-level image operations.
//!
//! These functions combine the pure calculation and transform steps with
//! backend execution. One call to [`resize_photo`] is the full pipeline for
//! one file:
//!
//! ```text
//! decode → compute_crop → transform → encode → tag_resolution
//! ```

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{CropPlan, GeometryError, Orientation, compute_crop};
use super::params::{EncodeParams, ResolutionMetadata};
use super::transform::{TransformError, transform};
use crate::config::ProcessingConfig;
use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Per-file pipeline failure.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Cannot read image: {0}")]
    Decode(#[source] BackendError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error("Cannot write {}: {source}", .output.display())]
    Write {
        output: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Pixels written to {} but resolution tagging failed: {source}", .output.display())]
    MetadataWrite {
        output: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// Short name for each failure, used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Decode,
    InvalidDimensions,
    RegionOutOfBounds,
    Write,
    MetadataWrite,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Decode => "decode error",
            Self::InvalidDimensions => "invalid dimensions",
            Self::RegionOutOfBounds => "region out of bounds",
            Self::Write => "write error",
            Self::MetadataWrite => "metadata write error",
        }
    }
}

impl PipelineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Decode(_) => FailureKind::Decode,
            Self::Geometry(_) => FailureKind::InvalidDimensions,
            Self::Transform(_) => FailureKind::RegionOutOfBounds,
            Self::Write { .. } => FailureKind::Write,
            Self::MetadataWrite { .. } => FailureKind::MetadataWrite,
        }
    }

    /// Output file left on disk by a failed run, if any.
    pub fn written_output(&self) -> Option<&Path> {
        match self {
            Self::MetadataWrite { output, .. } => Some(output),
            _ => None,
        }
    }
}

/// A successfully processed photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedPhoto {
    pub source: PathBuf,
    pub output: PathBuf,
    pub source_dimensions: Dimensions,
    pub plan: CropPlan,
}

impl ResizedPhoto {
    pub fn orientation(&self) -> Orientation {
        self.plan.orientation
    }

    /// Output dimensions (always the plan's target).
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.plan.target.width,
            height: self.plan.target.height,
        }
    }
}

/// Encode `image` to `output`, then tag it with resolution metadata.
///
/// The two phases fail separately: a tagging failure leaves the encoded file
/// in place and is reported as [`PipelineError::MetadataWrite`].
pub fn encode_and_tag(
    backend: &impl ImageBackend,
    image: &RgbImage,
    output: &Path,
    config: &ProcessingConfig,
) -> Result<(), PipelineError> {
    backend
        .encode(
            image,
            &EncodeParams {
                output: output.to_path_buf(),
                quality: config.quality,
            },
        )
        .map_err(|source| PipelineError::Write {
            output: output.to_path_buf(),
            source,
        })?;

    let meta = ResolutionMetadata::at_dpi(config.dpi, image.width(), image.height());
    backend
        .tag_resolution(output, &meta)
        .map_err(|source| PipelineError::MetadataWrite {
            output: output.to_path_buf(),
            source,
        })
}

/// Run the full pipeline for one source file.
pub fn resize_photo(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &ProcessingConfig,
) -> Result<ResizedPhoto, PipelineError> {
    let image = backend.decode(source).map_err(PipelineError::Decode)?;
    let source_dimensions = Dimensions {
        width: image.width(),
        height: image.height(),
    };

    let plan = compute_crop(source_dimensions.width, source_dimensions.height)?;
    debug!(
        source = %source.display(),
        width = source_dimensions.width,
        height = source_dimensions.height,
        orientation = plan.orientation.label(),
        corrected = plan.was_corrected(),
        "planned crop"
    );

    let resized = transform(&image, plan.region, plan.target)?;
    drop(image);

    encode_and_tag(backend, &resized, output, config)?;

    Ok(ResizedPhoto {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        source_dimensions,
        plan,
    })
}
