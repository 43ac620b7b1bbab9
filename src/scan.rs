//! Candidate discovery.
//!
//! Turns the path given on the command line into the sequence of image files
//! to process.
//!
//! ## Rules
//!
//! - A **file** root is the only candidate, whatever its name: the user
//!   asked for it explicitly.
//! - A **directory** root is walked recursively. Entries are visited in file
//!   name order, symlinked directories are not followed, and only files
//!   passing [`naming::is_candidate`] are yielded.
//! - Folders named like the configured output directory are skipped below
//!   the root, so results from earlier runs are never fed back in. Each skip
//!   is yielded as [`ScanEntry::SkippedOutput`] so callers can report it.
//!
//! The walk is lazy: [`candidates`] yields paths as directories are read, and
//! a traversal error ends the sequence. Callers that process while iterating
//! keep whatever was done before the error.

use crate::config::ProcessingConfig;
use crate::naming;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

#[derive(Error, Debug)]
#[error("Directory traversal failed: {0}")]
pub struct TraversalError(#[from] pub walkdir::Error);

/// What kind of root the user named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    File,
    Directory,
}

/// Classify `root`, or `None` if it is neither a file nor a directory.
pub fn root_kind(root: &Path) -> Option<RootKind> {
    if root.is_file() {
        Some(RootKind::File)
    } else if root.is_dir() {
        Some(RootKind::Directory)
    } else {
        None
    }
}

/// One item of a directory walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEntry {
    /// An image file to process.
    Photo(PathBuf),
    /// A folder named like the output directory, not descended into.
    SkippedOutput(PathBuf),
}

/// Lazily enumerate candidate image files under `root`.
///
/// Yields `Err` at most once; iteration stops after it.
pub fn candidates(
    root: &Path,
    config: &ProcessingConfig,
) -> Box<dyn Iterator<Item = Result<ScanEntry, TraversalError>>> {
    if root.is_file() {
        return Box::new(std::iter::once(Ok(ScanEntry::Photo(root.to_path_buf()))));
    }

    let output_dir = config.output_dir.clone();
    let mut walk = WalkDir::new(root).sort_by_file_name().into_iter();
    let mut failed = false;
    Box::new(std::iter::from_fn(move || {
        if failed {
            return None;
        }
        loop {
            let entry = match walk.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    failed = true;
                    return Some(Err(TraversalError(e)));
                }
            };
            if entry.depth() > 0
                && entry.file_type().is_dir()
                && entry.file_name() == output_dir.as_str()
            {
                walk.skip_current_dir();
                let path = entry.into_path();
                warn!(path = %path.display(), "skipping output folder");
                return Some(Ok(ScanEntry::SkippedOutput(path)));
            }
            let path = entry.into_path();
            if path.is_file() && naming::is_candidate(&path) {
                return Some(Ok(ScanEntry::Photo(path)));
            }
        }
    }))
}

/// Collect all photos under `root`, failing on the first traversal error.
pub fn list_candidates(
    root: &Path,
    config: &ProcessingConfig,
) -> Result<Vec<PathBuf>, TraversalError> {
    candidates(root, config)
        .filter_map(|entry| match entry {
            Ok(ScanEntry::Photo(path)) => Some(Ok(path)),
            Ok(ScanEntry::SkippedOutput(_)) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}
