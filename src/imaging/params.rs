//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides what to write) and the [`backend`](super::backend) (which
//! does the codec work).
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`ResolutionUnit`]: EXIF/JFIF density unit.
//! - [`ResolutionMetadata`]: DPI plus pixel dimensions tagged onto an encoded file.
//! - [`EncodeParams`]: Output path and quality for the encode phase.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    /// The JPEG encoder's customary default.
    fn default() -> Self {
        Self(75)
    }
}

/// Unit for resolution values, with the EXIF `ResolutionUnit` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionUnit {
    Inches,
    Centimeters,
}

impl ResolutionUnit {
    /// EXIF tag 0x0128 value.
    pub fn exif_code(self) -> u16 {
        match self {
            Self::Inches => 2,
            Self::Centimeters => 3,
        }
    }

    /// JFIF APP0 `units` byte.
    pub fn jfif_code(self) -> u8 {
        match self {
            Self::Inches => 1,
            Self::Centimeters => 2,
        }
    }
}

/// Resolution tags written after encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionMetadata {
    pub x_dpi: u32,
    pub y_dpi: u32,
    pub unit: ResolutionUnit,
    pub width: u32,
    pub height: u32,
}

impl ResolutionMetadata {
    /// Square pixels at `dpi` dots per inch.
    pub fn at_dpi(dpi: u32, width: u32, height: u32) -> Self {
        Self {
            x_dpi: dpi,
            y_dpi: dpi,
            unit: ResolutionUnit::Inches,
            width,
            height,
        }
    }
}

/// Parameters for the encode phase.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub quality: Quality,
}
