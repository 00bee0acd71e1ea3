//! Directory runs: size guard, per-file evaluation, aggregation.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;

use crate::document::DocumentSource;
use crate::engine::Validator;
use crate::output::ScanProgress;
use crate::report::{ValidationReport, percentage};

/// A candidate that was never opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    /// `None` when the size could not be determined.
    pub size: Option<u64>,
    pub reason: String,
}

/// A candidate whose evaluation aborted with an input error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErroredFile {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate of one directory run.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryRunResult {
    pub root: PathBuf,
    /// Every discovered candidate, in listing order.
    pub discovered: Vec<PathBuf>,
    pub total_files: usize,
    pub passed_files: usize,
    pub failed_files: usize,
    pub success_rate: f64,
    pub per_file: IndexMap<PathBuf, ValidationReport>,
    pub skipped: Vec<SkippedFile>,
    pub errored: Vec<ErroredFile>,
}

impl DirectoryRunResult {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Evaluated files whose report has failures, in listing order.
    pub fn failed_reports(&self) -> impl Iterator<Item = (&PathBuf, &ValidationReport)> {
        self.per_file.iter().filter(|(_, r)| !r.summary.is_clean())
    }
}

enum FileOutcome {
    Evaluated(ValidationReport),
    Skipped(SkippedFile),
    Errored(ErroredFile),
}

fn evaluate_file<S: DocumentSource>(
    validator: &Validator<S>,
    path: &Path,
    ceiling: u64,
) -> FileOutcome {
    match validator.source().size(path) {
        Ok(size) if size > ceiling => {
            tracing::warn!(path = %path.display(), size, ceiling, "skipping oversized file");
            FileOutcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                size: Some(size),
                reason: format!("File too large ({}MB)", megabytes(size)),
            })
        }
        Ok(_) => match validator.validate(path) {
            Ok(report) => FileOutcome::Evaluated(report),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not test file");
                FileOutcome::Errored(ErroredFile {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                })
            }
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "skipping file with unknown size");
            FileOutcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                size: None,
                reason: format!("Could not determine file size: {err}"),
            })
        }
    }
}

/// Evaluate `files` under `root`.
///
/// Files larger than `ceiling` bytes, or whose size cannot be read, are skipped
/// without being read and count as failed. Evaluation runs on the rayon pool;
/// results are aggregated in the order of `files`.
pub fn run_directory<S: DocumentSource + Sync>(
    validator: &Validator<S>,
    root: &Path,
    files: Vec<PathBuf>,
    ceiling: u64,
    progress: Option<&ScanProgress>,
) -> DirectoryRunResult {
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| {
            let outcome = evaluate_file(validator, path, ceiling);
            if let Some(progress) = progress {
                progress.inc();
            }
            outcome
        })
        .collect();

    let mut result = DirectoryRunResult {
        root: root.to_path_buf(),
        total_files: files.len(),
        discovered: files,
        passed_files: 0,
        failed_files: 0,
        success_rate: 0.0,
        per_file: IndexMap::new(),
        skipped: Vec::new(),
        errored: Vec::new(),
    };
    for (path, outcome) in result.discovered.iter().zip(outcomes) {
        match outcome {
            FileOutcome::Evaluated(report) => {
                if report.summary.is_clean() {
                    result.passed_files += 1;
                } else {
                    result.failed_files += 1;
                }
                result.per_file.insert(path.clone(), report);
            }
            FileOutcome::Skipped(skip) => {
                result.failed_files += 1;
                result.skipped.push(skip);
            }
            FileOutcome::Errored(errored) => {
                result.failed_files += 1;
                result.errored.push(errored);
            }
        }
    }
    result.success_rate = percentage(result.passed_files, result.total_files, 1);

    tracing::info!(
        root = %root.display(),
        total = result.total_files,
        passed = result.passed_files,
        failed = result.failed_files,
        "directory run finished"
    );
    result
}

#[allow(clippy::cast_precision_loss)]
fn megabytes(size: u64) -> f64 {
    (size as f64 / 1024.0 / 1024.0 * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
