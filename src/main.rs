use clap::Parser;
use photo_resizer::config::ProcessingConfig;
use photo_resizer::{output, process};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photo-resizer")]
#[command(version)]
#[command(about = "Batch-resize photos to 6x4 prints at 300 DPI")]
#[command(long_about = "\
Batch-resize photos to 6x4 prints at 300 DPI

Every photo is center-cropped to 3:2 (landscape) or 2:3 (portrait and square),
resized to 1800x1200 or 1200x1800, and saved as a JPEG tagged with 300 DPI.

  trips/
  ├── dawn.jpg            → trips/output/dawn-out.jpg
  └── rome/
      ├── forum.png       → trips/rome/output/forum-out.jpg
      └── output/         # previous results, never reprocessed

Accepted inputs: .jpg .jpeg .png .gif .bmp .tif (any case).
A single file is processed whatever its extension.

Set RUST_LOG=debug for diagnostics on stderr.")]
struct Cli {
    /// Photo file, or directory to process recursively
    path: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let Some(path) = cli.path else {
        output::print_usage_prompt();
        return ExitCode::SUCCESS;
    };

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });

    let result = process::process(&path, &ProcessingConfig::default(), Some(tx));
    if printer.join().is_err() {
        eprintln!("Error: output thread panicked");
    }

    match result {
        Ok(report) => {
            output::print_summary(&report);
            if report.interrupted.is_some() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
