//! Crop + resample: turns a decoded source into the canonical output image.
//!
//! Pure pixel work, no I/O. Resampling uses Catmull-Rom (the `image` crate's
//! bicubic filter), which is deterministic: the same source and plan always
//! produce the same pixels.

use super::calculations::{CropRegion, TargetSpec};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error(
        "Crop region {}x{}+{}+{} is outside the {source_width}x{source_height} source",
        .region.width, .region.height, .region.x, .region.y
    )]
    RegionOutOfBounds {
        region: CropRegion,
        source_width: u32,
        source_height: u32,
    },
    #[error("Invalid target size {}x{}", .target.width, .target.height)]
    EmptyTarget { target: TargetSpec },
}

/// Extract `region` from `source` and resample it to exactly `target`.
///
/// The region must be non-empty and fully inside the source; the geometry
/// step guarantees this, but it is re-checked here because the region comes
/// in as plain data. Alpha is composited over black.
pub fn transform(
    source: &DynamicImage,
    region: CropRegion,
    target: TargetSpec,
) -> Result<RgbImage, TransformError> {
    let (source_width, source_height) = source.dimensions();
    if !region.fits_within(source_width, source_height) {
        return Err(TransformError::RegionOutOfBounds {
            region,
            source_width,
            source_height,
        });
    }
    if target.width == 0 || target.height == 0 {
        return Err(TransformError::EmptyTarget { target });
    }

    let cropped = source.crop_imm(region.x, region.y, region.width, region.height);
    let rgb = flatten(&cropped);
    Ok(imageops::resize(
        &rgb,
        target.width,
        target.height,
        FilterType::CatmullRom,
    ))
}

/// Drop alpha by compositing onto an opaque black canvas.
fn flatten(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([over_black(r, a), over_black(g, a), over_black(b, a)])
    })
}

#[inline]
fn over_black(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}
