//! File naming rules: which files are candidates, and where outputs go.
//!
//! ## Candidates
//!
//! A file is a candidate when its lower-cased name ends with one of
//! [`CANDIDATE_SUFFIXES`]. This is a plain suffix match, not an extension
//! parse: `photo.JPG` and `photo.jpeg` match, `photo.tiff` does not.
//!
//! ## Output paths
//!
//! ```text
//! trips/rome/001.jpg    →  trips/rome/output/001-out.jpg
//! trips/paris/night.png →  trips/paris/output/night-out.jpg
//! ```
//!
//! Each source directory gets its own `output/` folder. The stem is the file
//! name minus its last extension, so `photo.jpg` and `photo.png` in the same
//! folder both map to `output/photo-out.jpg`.

use crate::config::ProcessingConfig;
use std::path::{Path, PathBuf};

/// Accepted file name endings, lower case.
pub const CANDIDATE_SUFFIXES: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tif"];

/// Extension of every output file.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Whether `path` names an image the batch should process.
pub fn is_candidate(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| CANDIDATE_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Output location for `source`: `<parent>/<output_dir>/<stem><suffix>.jpg`.
pub fn output_path(source: &Path, config: &ProcessingConfig) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    parent.join(&config.output_dir).join(format!(
        "{}{}.{}",
        stem, config.output_suffix, OUTPUT_EXTENSION
    ))
}
