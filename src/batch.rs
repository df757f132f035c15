//! Directory batch runner.
//!
//! Walks a source tree, runs one strategy over every supported image and
//! mirrors the relative layout under the output directory:
//!
//! ```text
//! photos/                    thumbs/
//! ├── a.jpg          ──►     ├── a.jpg
//! └── trips/                 └── trips/
//!     └── b.png      ──►         └── b.png
//! ```
//!
//! Files are processed in parallel on the global rayon pool. A failing file
//! is recorded in the [`BatchReport`] and does not stop the others; only
//! problems with the source tree itself abort the run.

use crate::imaging::supported_input_extensions;
use crate::strategy::{ImageProcessingStrategy, StrategyError};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Why a single file was skipped.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

#[derive(Debug)]
pub struct ProcessedImage {
    /// Path relative to the source root.
    pub source: PathBuf,
    /// Path of the written thumbnail.
    pub output: PathBuf,
    pub input_bytes: usize,
    pub output_bytes: usize,
}

#[derive(Debug)]
pub struct FailedImage {
    /// Path relative to the source root.
    pub source: PathBuf,
    pub error: ItemError,
}

/// Outcome of a batch run, ordered by relative source path.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
    pub failed: Vec<FailedImage>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Whether `path` has an extension the default engine can round-trip.
/// Comparison is case-insensitive.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            supported_input_extensions().contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Collect supported images under `source`, relative to it, in name order.
///
/// The `exclude` directory (usually the batch output) is not descended
/// into, so thumbnails written inside the source tree are never picked up
/// again on a later run.
pub fn find_images(source: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, BatchError> {
    if !source.is_dir() {
        return Err(BatchError::SourceNotFound(source.to_path_buf()));
    }
    let excluded = exclude.and_then(|dir| fs::canonicalize(dir).ok());

    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match &excluded {
            Some(dir) if entry.file_type().is_dir() => {
                !fs::canonicalize(entry.path()).is_ok_and(|path| path == *dir)
            }
            _ => true,
        });

    let mut images = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(source) {
            images.push(relative.to_path_buf());
        }
    }
    Ok(images)
}

/// Run `strategy` over every supported image under `source`, writing results
/// to the same relative path under `output`.
pub fn process_directory<S>(
    strategy: &S,
    source: &Path,
    output: &Path,
) -> Result<BatchReport, BatchError>
where
    S: ImageProcessingStrategy + Sync,
{
    if !source.is_dir() {
        return Err(BatchError::SourceNotFound(source.to_path_buf()));
    }
    fs::create_dir_all(output)?;
    let images = find_images(source, Some(output))?;
    info!(
        count = images.len(),
        source = %source.display(),
        output = %output.display(),
        "Processing directory"
    );

    let results: Vec<(PathBuf, Result<ProcessedImage, ItemError>)> = images
        .into_par_iter()
        .map(|relative| {
            let result = process_file(strategy, source, output, &relative);
            (relative, result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (relative, result) in results {
        match result {
            Ok(processed) => report.processed.push(processed),
            Err(error) => {
                warn!(file = %relative.display(), %error, "Skipping image");
                report.failed.push(FailedImage {
                    source: relative,
                    error,
                });
            }
        }
    }

    info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        "Batch finished"
    );
    Ok(report)
}

fn process_file<S: ImageProcessingStrategy>(
    strategy: &S,
    source_root: &Path,
    output_root: &Path,
    relative: &Path,
) -> Result<ProcessedImage, ItemError> {
    let data = fs::read(source_root.join(relative))?;
    let thumbnail = strategy.process(&data)?;

    let output_path = output_root.join(relative);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, &thumbnail)?;
    debug!(file = %relative.display(), bytes = thumbnail.len(), "Wrote thumbnail");

    Ok(ProcessedImage {
        source: relative.to_path_buf(),
        output: output_path,
        input_bytes: data.len(),
        output_bytes: thumbnail.len(),
    })
}
