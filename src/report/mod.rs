//! Validation results: test records, the per-document report, and the
//! accumulator that finalizes the summary.

use serde::{Deserialize, Serialize};

/// Outcome label of a single test record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
}

/// Overall status of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Passed,
    Failed,
}

impl RunStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        }
    }
}

/// One named rule check and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub name: String,
    pub description: String,
    pub passed: bool,
    pub status: TestStatus,
}

impl TestRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            passed,
            status: if passed {
                TestStatus::Pass
            } else {
                TestStatus::Fail
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    pub success_rate: f64,
    pub status: RunStatus,
}

impl Summary {
    #[must_use]
    pub fn from_counts(total: usize, passed: usize, warnings: usize) -> Self {
        let failed = total - passed;
        Self {
            total,
            passed,
            failed,
            warnings,
            success_rate: percentage(passed, total, 2),
            status: if failed > 0 {
                RunStatus::Failed
            } else {
                RunStatus::Passed
            },
        }
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.passed == self.total
    }
}

/// Report for one evaluated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub timestamp: String,
    pub version: String,
    pub tests: Vec<TestRecord>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub summary: Summary,
}

impl ValidationReport {
    /// Report for a target that could not be evaluated at all. `failed` names
    /// the precondition that did not hold, so the summary always fails.
    #[must_use]
    pub fn aborted(failed: TestRecord, error: impl Into<String>) -> Self {
        let mut builder = ReportBuilder::new();
        builder.record(TestRecord {
            passed: false,
            status: TestStatus::Fail,
            ..failed
        });
        builder.error(error);
        builder.finish()
    }

    pub fn failed_tests(&self) -> impl Iterator<Item = &TestRecord> {
        self.tests.iter().filter(|t| !t.passed)
    }

    #[must_use]
    pub fn test(&self, name: &str) -> Option<&TestRecord> {
        self.tests.iter().find(|t| t.name == name)
    }
}

/// Records produced by one rule group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOutcome {
    pub tests: Vec<TestRecord>,
    pub warnings: Vec<String>,
}

/// Collects records, errors and warnings for one evaluation and builds the
/// final report.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    tests: Vec<TestRecord>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ReportBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: TestRecord) {
        self.tests.push(record);
    }

    pub fn merge(&mut self, outcome: GroupOutcome) {
        self.tests.extend(outcome.tests);
        self.warnings.extend(outcome.warnings);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Finalize with the current local time.
    #[must_use]
    pub fn finish(self) -> ValidationReport {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.finish_at(timestamp)
    }

    #[must_use]
    pub fn finish_at(self, timestamp: String) -> ValidationReport {
        let passed = self.tests.iter().filter(|t| t.passed).count();
        let summary = Summary::from_counts(self.tests.len(), passed, self.warnings.len());
        ValidationReport {
            timestamp,
            version: crate::ENGINE_VERSION.to_string(),
            tests: self.tests,
            errors: self.errors,
            warnings: self.warnings,
            summary,
        }
    }
}

/// `part / whole * 100` rounded to `places` decimals, `0` when `whole` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percentage(part: usize, whole: usize, places: i32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let scale = 10f64.powi(places);
    (part as f64 / whole as f64 * 100.0 * scale).round() / scale
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
