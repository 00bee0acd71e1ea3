mod json;
mod progress;
mod text;

pub use json::JsonFormatter;
pub use progress::ScanProgress;
pub use text::{ColorMode, TextFormatter};

use std::path::Path;

use crate::error::Result;
use crate::report::ValidationReport;
use crate::scanner::DirectoryRunResult;

/// Trait for rendering validation results.
pub trait OutputFormatter {
    /// Render the report of a single document.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_report(&self, path: &Path, report: &ValidationReport) -> Result<String>;

    /// Render the aggregate of a directory run.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_directory(&self, run: &DirectoryRunResult) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Formatter for `format`.
#[must_use]
pub fn formatter_for(format: OutputFormat, color: ColorMode) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(color)),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
