//! Pure calculation functions for crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//!
//! ## Algorithm
//!
//! ```text
//! width > height   → Landscape        crop w = h * 3 / 2, target 1800x1200
//! width <= height  → PortraitOrSquare crop h = w * 3 / 2, target 1200x1800
//! ```
//!
//! The crop is anchored on the source centre, clamped to the top-left corner,
//! then shrunk to fit the source bounds. The shrink can break the nominal
//! ratio (a 4000x3000 source keeps its full 4000x3000 frame); the transformer
//! stretches whatever region comes out of here into the target size.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Invalid image dimensions {width}x{height}: both sides must be positive")]
    InvalidImageDimensions { width: u32, height: u32 },
}

/// Canonical output size for a landscape print (6 inch at 300 DPI).
pub const LANDSCAPE_TARGET: TargetSpec = TargetSpec {
    width: 1800,
    height: 1200,
};

/// Canonical output size for a portrait or square print.
pub const PORTRAIT_TARGET: TargetSpec = TargetSpec {
    width: 1200,
    height: 1800,
};

/// Which of the two print layouts a source falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Strictly wider than tall.
    Landscape,
    /// Taller than wide, or exactly square.
    PortraitOrSquare,
}

impl Orientation {
    pub fn of(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::PortraitOrSquare
        }
    }

    /// Nominal crop ratio as (width, height).
    pub fn ratio(self) -> (u32, u32) {
        match self {
            Self::Landscape => (3, 2),
            Self::PortraitOrSquare => (2, 3),
        }
    }

    pub fn target(self) -> TargetSpec {
        match self {
            Self::Landscape => LANDSCAPE_TARGET,
            Self::PortraitOrSquare => PORTRAIT_TARGET,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::PortraitOrSquare => "portrait",
        }
    }
}

/// Rectangle inside the source image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// True when the region is non-empty and lies entirely inside a
    /// `source_width` x `source_height` image.
    pub fn fits_within(&self, source_width: u32, source_height: u32) -> bool {
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        self.width > 0
            && self.height > 0
            && right <= u64::from(source_width)
            && bottom <= u64::from(source_height)
    }
}

/// Final output dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub width: u32,
    pub height: u32,
}

/// Everything the transformer needs for one source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropPlan {
    pub orientation: Orientation,
    /// Crop size before boundary correction: always exactly 3:2 or 2:3
    /// (up to integer truncation).
    pub nominal: (u32, u32),
    /// Crop after boundary correction; always inside the source.
    pub region: CropRegion,
    pub target: TargetSpec,
}

impl CropPlan {
    /// Whether boundary correction changed the nominal crop size.
    pub fn was_corrected(&self) -> bool {
        self.nominal != (self.region.width, self.region.height)
    }
}

/// Compute the centered crop and canonical target size for a source image.
///
/// # Arguments
/// * `width` - Source width in pixels
/// * `height` - Source height in pixels
///
/// # Examples
/// ```
/// # use photo_resizer::imaging::compute_crop;
/// // 6000x3000 landscape: 4500x3000 centered crop, 1800x1200 output
/// let plan = compute_crop(6000, 3000).unwrap();
/// assert_eq!((plan.region.x, plan.region.width), (750, 4500));
/// assert_eq!((plan.target.width, plan.target.height), (1800, 1200));
/// ```
pub fn compute_crop(width: u32, height: u32) -> Result<CropPlan, GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::InvalidImageDimensions { width, height });
    }

    let orientation = Orientation::of(width, height);
    let (src_w, src_h) = (u64::from(width), u64::from(height));

    let (mut crop_w, mut crop_h) = match orientation {
        Orientation::Landscape => (src_h * 3 / 2, src_h),
        Orientation::PortraitOrSquare => (src_w, src_w * 3 / 2),
    };
    let nominal = (crop_w, crop_h);

    let x = (src_w / 2).saturating_sub(crop_w / 2);
    let y = (src_h / 2).saturating_sub(crop_h / 2);

    if x + crop_w > src_w {
        crop_w = src_w - x;
    }
    if y + crop_h > src_h {
        crop_h = src_h - y;
    }

    // Every corrected value is bounded by the u32 source dimensions; the
    // nominal long side can reach 1.5x a u32 side, so saturate it.
    Ok(CropPlan {
        orientation,
        nominal: (saturate(nominal.0), saturate(nominal.1)),
        region: CropRegion {
            x: x as u32,
            y: y as u32,
            width: crop_w as u32,
            height: crop_h as u32,
        },
        target: orientation.target(),
    })
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
