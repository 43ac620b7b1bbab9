//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, GIF, BMP, TIFF) |
//! | **Crop geometry** | [`compute_crop`]: integer math, no I/O |
//! | **Crop + resample** | [`transform`]: Catmull-Rom (bicubic) |
//! | **Encode** | `image` baseline JPEG encoder |
//! | **Resolution tags** | custom EXIF writer + `img-parts` segment rewrite |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Transform**: Pure pixel work on decoded images
//! - **Parameters**: Data structures describing codec operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining all of the above

pub mod backend;
mod calculations;
mod exif_writer;
pub mod operations;
mod params;
pub mod rust_backend;
mod transform;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    CropPlan, CropRegion, GeometryError, LANDSCAPE_TARGET, Orientation, PORTRAIT_TARGET,
    TargetSpec, compute_crop,
};
pub use exif_writer::{TagError, resolution_exif, tag_jpeg};
pub use operations::{FailureKind, PipelineError, ResizedPhoto, encode_and_tag, resize_photo};
pub use params::{EncodeParams, Quality, ResolutionMetadata, ResolutionUnit};
pub use rust_backend::RustBackend;
pub use transform::{TransformError, transform};
