use std::path::Path;

use crate::error::Result;
use crate::report::ValidationReport;
use crate::scanner::DirectoryRunResult;

use super::OutputFormatter;

/// Pretty-printed JSON, the same payload the HTTP surface returns.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, _path: &Path, report: &ValidationReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_directory(&self, run: &DirectoryRunResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(run)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
