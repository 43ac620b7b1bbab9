//! Batch processing.
//!
//! Takes the path from the command line, enumerates candidates through
//! [`scan`](crate::scan), and runs [`resize_photo`] on each one in turn.
//!
//! ## Failure policy
//!
//! | Failure | Effect |
//! |---|---|
//! | Root is neither file nor directory | [`ProcessError::InvalidPath`], nothing processed |
//! | Invalid [`ProcessingConfig`] | [`ProcessError::Config`], nothing processed |
//! | Traversal error | walk stops, report keeps finished files, error in [`BatchReport::interrupted`] |
//! | Any per-file [`PipelineError`] | recorded in that file's [`FileReport`], batch continues |
//!
//! ## Events
//!
//! Progress is pushed as [`ProcessEvent`]s over an optional channel so the
//! caller decides how (and whether) to display it. The library never prints.

use crate::config::{ConfigError, ProcessingConfig};
use crate::imaging::{
    FailureKind, ImageBackend, Orientation, PipelineError, ResizedPhoto, RustBackend, resize_photo,
};
use crate::naming;
use crate::scan::{self, ScanEntry, TraversalError};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Not a valid file or directory: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Progress notification: one per finished file, plus one per skipped
/// output folder.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    Resized {
        /// 1-based position in the batch.
        index: usize,
        source: PathBuf,
        output: PathBuf,
        orientation: Orientation,
        width: u32,
        height: u32,
    },
    Failed {
        index: usize,
        source: PathBuf,
        kind: FailureKind,
        message: String,
    },
    /// An output folder found during the walk and left alone.
    SkippedOutput { path: PathBuf },
}

impl ProcessEvent {
    fn from_report(index: usize, report: &FileReport) -> Self {
        match &report.outcome {
            Ok(photo) => {
                let dims = photo.dimensions();
                ProcessEvent::Resized {
                    index,
                    source: photo.source.clone(),
                    output: photo.output.clone(),
                    orientation: photo.orientation(),
                    width: dims.width,
                    height: dims.height,
                }
            }
            Err(e) => ProcessEvent::Failed {
                index,
                source: report.path.clone(),
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

/// Outcome for one candidate file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Result<ResizedPhoto, PipelineError>,
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    /// Output folders below the root that were not descended into.
    pub skipped: Vec<PathBuf>,
    /// Set when the directory walk failed part-way.
    pub interrupted: Option<TraversalError>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &PipelineError)> {
        self.files
            .iter()
            .filter_map(|f| f.outcome.as_ref().err().map(|e| (f.path.as_path(), e)))
    }
}

/// Process `root` with the production backend.
pub fn process(
    root: &Path,
    config: &ProcessingConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, ProcessError> {
    process_with_backend(&RustBackend::new(), root, config, events)
}

/// Process `root` using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    root: &Path,
    config: &ProcessingConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchReport, ProcessError> {
    config.validate()?;
    if scan::root_kind(root).is_none() {
        return Err(ProcessError::InvalidPath(root.to_path_buf()));
    }

    let mut report = BatchReport::default();
    for candidate in scan::candidates(root, config) {
        let source = match candidate {
            Ok(ScanEntry::Photo(path)) => path,
            Ok(ScanEntry::SkippedOutput(path)) => {
                if let Some(tx) = &events {
                    let _ = tx.send(ProcessEvent::SkippedOutput { path: path.clone() });
                }
                report.skipped.push(path);
                continue;
            }
            Err(e) => {
                warn!(root = %root.display(), error = %e, "traversal aborted");
                report.interrupted = Some(e);
                break;
            }
        };

        let output = naming::output_path(&source, config);
        let outcome = resize_photo(backend, &source, &output, config);
        if let Err(e) = &outcome {
            warn!(source = %source.display(), kind = e.kind().label(), error = %e, "file failed");
        }

        let file = FileReport {
            path: source,
            outcome,
        };
        if let Some(tx) = &events {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(ProcessEvent::from_report(report.files.len() + 1, &file));
        }
        report.files.push(file);
    }

    info!(
        processed = report.files.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn encoded_outputs(backend: &MockBackend) -> Vec<String> {
        backend
            .get_operations()
            .into_iter()
            .filter_map(|op| match op {
                RecordedOp::Encode { output, .. } => Some(output),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn processes_only_candidates() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("b.png"));
        touch(&tmp.path().join("notes.txt"));
        let backend = MockBackend::with_sources(&[("a.jpg", 30, 20), ("b.png", 20, 30)]);

        let report =
            process_with_backend(&backend, tmp.path(), &ProcessingConfig::default(), None)
                .unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.succeeded(), 2);
        let out = tmp.path().join("output");
        assert_eq!(
            encoded_outputs(&backend),
            vec![
                out.join("a-out.jpg").to_string_lossy().to_string(),
                out.join("b-out.jpg").to_string_lossy().to_string(),
            ]
        );
    }

    #[test]
    fn failed_file_does_not_stop_batch() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("broken.jpg"));
        touch(&tmp.path().join("c.jpg"));
        let backend = MockBackend::with_sources(&[("a.jpg", 30, 20), ("c.jpg", 30, 20)]);

        let report =
            process_with_backend(&backend, tmp.path(), &ProcessingConfig::default(), None)
                .unwrap();

        assert_eq!(report.files.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        let (path, err) = report.failures().next().unwrap();
        assert_eq!(path, tmp.path().join("broken.jpg"));
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn outputs_land_next_to_each_source() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("rome/1.jpg"));
        touch(&tmp.path().join("paris/2.jpg"));
        let backend = MockBackend::with_sources(&[("1.jpg", 30, 20), ("2.jpg", 30, 20)]);

        process_with_backend(&backend, tmp.path(), &ProcessingConfig::default(), None).unwrap();

        assert_eq!(
            encoded_outputs(&backend),
            vec![
                tmp.path()
                    .join("paris/output/2-out.jpg")
                    .to_string_lossy()
                    .to_string(),
                tmp.path()
                    .join("rome/output/1-out.jpg")
                    .to_string_lossy()
                    .to_string(),
            ]
        );
    }

    #[test]
    fn single_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("portrait.jpg");
        touch(&file);
        let backend = MockBackend::with_sources(&[("portrait.jpg", 20, 40)]);

        let report =
            process_with_backend(&backend, &file, &ProcessingConfig::default(), None).unwrap();

        assert_eq!(report.files.len(), 1);
        let photo = report.files[0].outcome.as_ref().unwrap();
        assert_eq!(photo.output, tmp.path().join("output/portrait-out.jpg"));
        assert_eq!(photo.orientation(), Orientation::PortraitOrSquare);
    }

    #[test]
    fn invalid_root_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let backend = MockBackend::new();

        let err = process_with_backend(&backend, &missing, &ProcessingConfig::default(), None)
            .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidPath(p) if p == missing));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        let backend = MockBackend::with_sources(&[("a.jpg", 30, 20)]);
        let config = ProcessingConfig {
            dpi: 0,
            ..ProcessingConfig::default()
        };

        let err = process_with_backend(&backend, tmp.path(), &config, None).unwrap_err();
        assert!(matches!(err, ProcessError::Config(_)));
        assert!(backend.get_operations().is_empty());
    }

    #[test]
    fn events_are_sent_per_file() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("b.jpg"));
        let backend = MockBackend::with_sources(&[("a.jpg", 30, 20)]);
        let (tx, rx) = mpsc::channel();

        process_with_backend(&backend, tmp.path(), &ProcessingConfig::default(), Some(tx))
            .unwrap();

        let events: Vec<ProcessEvent> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            ProcessEvent::Resized {
                index: 1,
                orientation: Orientation::Landscape,
                width: 1800,
                height: 1200,
                ..
            }
        ));
        assert!(matches!(
            &events[1],
            ProcessEvent::Failed {
                index: 2,
                kind: FailureKind::Decode,
                ..
            }
        ));
    }

    #[test]
    fn metadata_failure_is_reported_with_output() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        let backend = MockBackend::with_sources(&[("a.jpg", 30, 20)]).failing_tags();

        let report =
            process_with_backend(&backend, tmp.path(), &ProcessingConfig::default(), None)
                .unwrap();

        let (_, err) = report.failures().next().unwrap();
        assert_eq!(err.kind(), FailureKind::MetadataWrite);
        assert_eq!(
            err.written_output(),
            Some(tmp.path().join("output/a-out.jpg").as_path())
        );
    }

    #[test]
    fn skipped_output_folders_are_reported() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        touch(&tmp.path().join("output/a-out.jpg"));
        let backend = MockBackend::with_sources(&[("a.jpg", 30, 20), ("a-out.jpg", 30, 20)]);
        let (tx, rx) = mpsc::channel();

        let report =
            process_with_backend(&backend, tmp.path(), &ProcessingConfig::default(), Some(tx))
                .unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.skipped, vec![tmp.path().join("output")]);
        let events: Vec<ProcessEvent> = rx.iter().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            ProcessEvent::SkippedOutput {
                path: tmp.path().join("output")
            }
        );
    }

    #[test]
    fn empty_directory_is_an_empty_report() {
        let tmp = TempDir::new().unwrap();
        let report = process_with_backend(
            &MockBackend::new(),
            tmp.path(),
            &ProcessingConfig::default(),
            None,
        )
        .unwrap();
        assert!(report.files.is_empty());
        assert!(report.interrupted.is_none());
    }

    #[test]
    fn real_files_with_one_corrupt() {
        use crate::test_helpers::{create_corrupt_image, create_test_jpeg, create_test_png};

        let tmp = TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("a.jpg"), 300, 200);
        create_corrupt_image(&tmp.path().join("b.jpg"));
        create_test_png(&tmp.path().join("c.png"), 200, 300);

        let report = process(tmp.path(), &ProcessingConfig::default(), None).unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        let out = tmp.path().join("output");
        assert_eq!(
            image::image_dimensions(out.join("a-out.jpg")).unwrap(),
            (1800, 1200)
        );
        assert_eq!(
            image::image_dimensions(out.join("c-out.jpg")).unwrap(),
            (1200, 1800)
        );
        assert!(!out.join("b-out.jpg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_subdirectory_interrupts_walk() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.jpg"));
        let locked = tmp.path().join("b-locked");
        fs::create_dir(&locked).unwrap();
        touch(&locked.join("c.jpg"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root can read anything; nothing to test then
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let backend = MockBackend::with_sources(&[("a.jpg", 30, 20), ("c.jpg", 30, 20)]);
        let report =
            process_with_backend(&backend, tmp.path(), &ProcessingConfig::default(), None)
                .unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.succeeded(), 1);
        assert!(report.interrupted.is_some());
    }
}
