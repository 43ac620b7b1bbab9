//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each photo leads with its positional index and file name. Paths and the
//! outcome follow as indented context lines, so a long run reads as an
//! inventory of what was produced.
//!
//! # Output Format
//!
//! ```text
//! 001 dawn.jpg (landscape)
//!     Source: trips/dawn.jpg
//!     Output: trips/output/dawn-out.jpg (1800x1200)
//! 002 broken.jpg
//!     Source: trips/broken.jpg
//!     Failed: decode error: Cannot read image: ...
//!
//! Resized 1 photo, 1 failed
//! ```
//!
//! Folders named `output` below the root are never processed. Each one gets a
//! `Skipped trips/output (output folder)` line and is counted in the summary,
//! so a real photo folder with that name is not silently ignored.
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::process::{BatchReport, ProcessEvent};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Lines shown when the tool is started without a path.
pub fn usage_prompt() -> Vec<String> {
    vec![
        "Usage: photo-resizer <path>".to_string(),
        String::new(),
        format!(
            "{}Crops and resizes every photo under <path> to a 6x4 print (1800x1200 at 300 DPI).",
            indent(1)
        ),
        format!(
            "{}Results are written to an output/ folder next to each source photo.",
            indent(1)
        ),
    ]
}

pub fn print_usage_prompt() {
    for line in usage_prompt() {
        println!("{}", line);
    }
}

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Resized {
            index,
            source,
            output,
            orientation,
            width,
            height,
        } => vec![
            format!(
                "{} {} ({})",
                format_index(*index),
                file_name(source),
                orientation.label()
            ),
            format!("{}Source: {}", indent(1), source.display()),
            format!(
                "{}Output: {} ({}x{})",
                indent(1),
                output.display(),
                width,
                height
            ),
        ],
        ProcessEvent::Failed {
            index,
            source,
            kind,
            message,
        } => vec![
            format!("{} {}", format_index(*index), file_name(source)),
            format!("{}Source: {}", indent(1), source.display()),
            format!("{}Failed: {}: {}", indent(1), kind.label(), message),
        ],
        ProcessEvent::SkippedOutput { path } => {
            vec![format!("Skipped {} (output folder)", path.display())]
        }
    }
}

/// Format the closing summary for a finished batch.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![String::new()];
    if report.files.is_empty() {
        lines.push("No photos found".to_string());
    } else {
        let mut summary = format!("Resized {}", plural(report.succeeded(), "photo"));
        if report.failed() > 0 {
            summary.push_str(&format!(", {} failed", report.failed()));
        }
        lines.push(summary);
    }
    if !report.skipped.is_empty() {
        lines.push(format!(
            "Skipped {} named like the output folder",
            plural(report.skipped.len(), "folder")
        ));
    }
    if let Some(err) = &report.interrupted {
        lines.push(format!("Stopped early: {}", err));
    }
    lines
}

pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}
