use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::report::{TestRecord, ValidationReport};
use crate::scanner::DirectoryRunResult;

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

const RULE_WIDTH: usize = 80;

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                // Check if stdout is a TTY
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn status_icon(passed: bool) -> &'static str {
        if passed { "✓" } else { "✗" }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn status_label(&self, passed: bool) -> String {
        if passed {
            self.colorize("✓ PASSED", ansi::GREEN)
        } else {
            self.colorize("✗ FAILED", ansi::RED)
        }
    }

    fn format_test(&self, test: &TestRecord, output: &mut Vec<u8>) {
        let icon = Self::status_icon(test.passed);
        let icon = self.colorize(icon, if test.passed { ansi::GREEN } else { ansi::RED });
        writeln!(output, "{:<28} {icon} {}", test.name, test.description).ok();
    }

    fn format_messages(&self, heading: &str, color: &str, messages: &[String], output: &mut Vec<u8>) {
        if messages.is_empty() {
            return;
        }
        writeln!(output).ok();
        writeln!(output, "{}", self.colorize(heading, color)).ok();
        writeln!(output, "{}", "-".repeat(heading.chars().count())).ok();
        for message in messages {
            writeln!(output, "• {message}").ok();
        }
    }

    fn format_summary(&self, report: &ValidationReport, output: &mut Vec<u8>) {
        let summary = &report.summary;
        writeln!(output, "Test Results Summary:").ok();
        writeln!(output, "---------------------").ok();
        writeln!(output, "Total Tests:  {}", summary.total).ok();
        writeln!(
            output,
            "Passed:       {} {}",
            summary.passed,
            self.colorize("✓", ansi::GREEN)
        )
        .ok();
        writeln!(
            output,
            "Failed:       {} {}",
            summary.failed,
            self.colorize("✗", ansi::RED)
        )
        .ok();
        writeln!(
            output,
            "Warnings:     {} {}",
            summary.warnings,
            self.colorize("⚠", ansi::YELLOW)
        )
        .ok();
        writeln!(output, "Success Rate: {}%", summary.success_rate).ok();
        writeln!(
            output,
            "Status:       {}",
            self.status_label(summary.failed == 0)
        )
        .ok();
    }

    fn format_file_line(&self, path: &Path, report: &ValidationReport, output: &mut Vec<u8>) {
        let summary = &report.summary;
        let clean = summary.is_clean();
        writeln!(
            output,
            "{} {} ({}/{} tests)",
            self.status_label(clean),
            path.display(),
            summary.passed,
            summary.total
        )
        .ok();
        for test in report.failed_tests() {
            writeln!(output, "   ✗ {}: {}", test.name, test.description).ok();
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, path: &Path, report: &ValidationReport) -> Result<String> {
        let mut output = Vec::new();
        let title = format!("Testing SVG file: {}", path.display());
        writeln!(output, "{}", self.colorize(&title, ansi::CYAN)).ok();
        writeln!(output, "{}", "=".repeat(title.chars().count())).ok();
        writeln!(output).ok();

        self.format_summary(report, &mut output);

        if !report.tests.is_empty() {
            writeln!(output).ok();
            writeln!(output, "Detailed Test Results:").ok();
            writeln!(output, "----------------------").ok();
            for test in &report.tests {
                self.format_test(test, &mut output);
            }
        }

        self.format_messages("Errors:", ansi::RED, &report.errors, &mut output);
        self.format_messages("⚠ Warnings:", ansi::YELLOW, &report.warnings, &mut output);

        writeln!(output).ok();
        writeln!(output, "Test completed at: {}", report.timestamp).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }

    fn format_directory(&self, run: &DirectoryRunResult) -> Result<String> {
        let mut output = Vec::new();
        let title = format!("Scanning directory recursively: {}", run.root.display());
        writeln!(output, "{}", self.colorize(&title, ansi::CYAN)).ok();
        writeln!(output, "{}", "=".repeat(title.chars().count())).ok();
        writeln!(output).ok();

        if run.is_empty() {
            writeln!(
                output,
                "No SVG files found in directory: {}",
                run.root.display()
            )
            .ok();
            return Ok(String::from_utf8_lossy(&output).to_string());
        }

        writeln!(output, "Found {} SVG files:", run.total_files).ok();
        for path in &run.discovered {
            writeln!(output, "   {}", path.display()).ok();
        }
        writeln!(output).ok();

        for path in &run.discovered {
            if let Some(report) = run.per_file.get(path) {
                self.format_file_line(path, report, &mut output);
            } else if let Some(skip) = run.skipped.iter().find(|s| &s.path == path) {
                writeln!(
                    output,
                    "{} {}: {}",
                    self.colorize("⚠ SKIPPED", ansi::YELLOW),
                    path.display(),
                    skip.reason
                )
                .ok();
            } else if let Some(errored) = run.errored.iter().find(|e| &e.path == path) {
                writeln!(
                    output,
                    "{} {}: {}",
                    self.colorize("✗ ERROR", ansi::RED),
                    path.display(),
                    errored.error
                )
                .ok();
            }
        }

        writeln!(output).ok();
        writeln!(output, "{}", "=".repeat(RULE_WIDTH)).ok();
        writeln!(output, "DIRECTORY SCAN SUMMARY").ok();
        writeln!(output, "{}", "=".repeat(RULE_WIDTH)).ok();
        writeln!(output, "Total Files:  {}", run.total_files).ok();
        writeln!(
            output,
            "Passed:       {}",
            self.colorize(&run.passed_files.to_string(), ansi::GREEN)
        )
        .ok();
        writeln!(
            output,
            "Failed:       {}",
            self.colorize(&run.failed_files.to_string(), ansi::RED)
        )
        .ok();
        writeln!(output, "Success Rate: {}%", run.success_rate).ok();

        let mut failed = run.failed_reports().peekable();
        if failed.peek().is_some() {
            writeln!(output).ok();
            writeln!(output, "{}", self.colorize("Failed Files:", ansi::RED)).ok();
            for (path, report) in failed {
                writeln!(
                    output,
                    "   {} ({}/{})",
                    path.display(),
                    report.summary.passed,
                    report.summary.total
                )
                .ok();
            }
        }

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
