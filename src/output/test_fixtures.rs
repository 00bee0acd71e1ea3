//! Fixed reports and runs for formatter tests.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::report::{ReportBuilder, TestRecord, ValidationReport};
use crate::scanner::{DirectoryRunResult, SkippedFile};

pub fn passing_report() -> ValidationReport {
    let mut builder = ReportBuilder::new();
    builder.record(TestRecord::new("file_exists", "File exists", true));
    builder.record(TestRecord::new("valid_xml", "Valid XML structure", true));
    builder.finish_at("2026-01-02 03:04:05".to_string())
}

pub fn failing_report() -> ValidationReport {
    let mut builder = ReportBuilder::new();
    builder.record(TestRecord::new("file_exists", "File exists", true));
    builder.record(TestRecord::new(
        "no_g_elements",
        "No g elements (use direct SVG elements instead)",
        false,
    ));
    builder.warn("Dangerous functions detected: exec");
    builder.finish_at("2026-01-02 03:04:05".to_string())
}

pub fn sample_run() -> DirectoryRunResult {
    let mut per_file = IndexMap::new();
    per_file.insert(PathBuf::from("apps/a.svg"), passing_report());
    per_file.insert(PathBuf::from("apps/b.svg"), failing_report());
    DirectoryRunResult {
        root: PathBuf::from("apps"),
        discovered: vec![
            PathBuf::from("apps/a.svg"),
            PathBuf::from("apps/b.svg"),
            PathBuf::from("apps/huge.svg"),
        ],
        total_files: 3,
        passed_files: 1,
        failed_files: 2,
        success_rate: 33.3,
        per_file,
        skipped: vec![SkippedFile {
            path: PathBuf::from("apps/huge.svg"),
            size: Some(60 * 1024 * 1024),
            reason: "File too large (60MB)".to_string(),
        }],
        errored: Vec::new(),
    }
}

pub fn empty_run() -> DirectoryRunResult {
    DirectoryRunResult {
        root: PathBuf::from("empty"),
        discovered: Vec::new(),
        total_files: 0,
        passed_files: 0,
        failed_files: 0,
        success_rate: 0.0,
        per_file: IndexMap::new(),
        skipped: Vec::new(),
        errored: Vec::new(),
    }
}
