//! # Photo Resizer
//!
//! Batch tool that turns a folder of photos into print-ready 6x4 JPEGs.
//! Each photo is center-cropped to 3:2 (landscape) or 2:3 (portrait and
//! square), resized to 1800×1200 or 1200×1800, and tagged with 300 DPI
//! resolution metadata.
//!
//! # Pipeline
//!
//! ```text
//! path ─► scan ─► (per file) decode → crop plan → resize → encode → tag ─► report
//! ```
//!
//! Files are processed one at a time. A failing file is recorded and the batch
//! moves on; only a bad argument or a broken directory walk stops the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the input path and yields candidate image files |
//! | [`naming`] | Candidate file-name rules and output path layout |
//! | [`imaging`] | Crop geometry, resampling, JPEG encoding, resolution tagging |
//! | [`process`] | Batch driver: runs the pipeline per file, collects the report |
//! | [`config`] | Typed processing settings and their validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Two-Pass Metadata
//!
//! The JPEG is encoded first and its resolution tags are written in a second,
//! lossless pass that only rewrites header segments. The compressed scan data
//! is never touched, so tagging cannot degrade the image, and a tagging
//! failure leaves a usable (if untagged) file behind. That case is reported
//! separately as [`imaging::PipelineError::MetadataWrite`].
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling and encoding use the `image` crate; header rewriting
//! uses `img-parts`. No system libraries, so the binary is self-contained.
//!
//! ## Backend Trait
//!
//! All pixel and file I/O goes through [`imaging::ImageBackend`]. The batch
//! logic is tested against a recording mock; the real backend has its own
//! tests on actual files.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
