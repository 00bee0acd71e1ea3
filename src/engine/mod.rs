//! Single-document evaluation.

use std::path::Path;

use crate::config::Config;
use crate::document::{Document, DocumentSource, FsDocumentSource};
use crate::error::{Result, ValidatorError};
use crate::report::{ReportBuilder, TestRecord, ValidationReport};
use crate::rules::{PrimitiveOptions, Primitives, RuleContext, RuleGroup, RuleSet};
use crate::syntax::{CommandSyntaxChecker, SyntaxChecker};

/// Runs every rule group over one document and builds its report.
///
/// Groups run in a fixed order against the same snapshot; each returns its own
/// outcome and none sees another's records.
pub struct Validator<S: DocumentSource = FsDocumentSource> {
    source: S,
    primitives: Primitives,
    rule_sets: Vec<RuleSet>,
    syntax_checker: Option<Box<dyn SyntaxChecker>>,
}

impl Validator<FsDocumentSource> {
    /// Validator over the real filesystem.
    ///
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_source(FsDocumentSource, config)
    }
}

impl<S: DocumentSource> Validator<S> {
    /// Validator reading documents through `source`.
    ///
    /// The runtime group and its command-backed syntax checker are enabled
    /// when `rules.runtime_checks` is set.
    ///
    /// # Errors
    /// Returns an error if a rule pattern fails to compile.
    pub fn with_source(source: S, config: &Config) -> Result<Self> {
        let primitives = Primitives::new(&PrimitiveOptions::from(config))?;
        let rule_sets = RuleGroup::CORE
            .iter()
            .map(|group| RuleSet::for_group(*group))
            .collect::<Result<Vec<_>>>()?;
        let mut validator = Self {
            source,
            primitives,
            rule_sets,
            syntax_checker: None,
        };
        if config.rules.runtime_checks {
            validator = validator.with_syntax_checker(Box::new(
                CommandSyntaxChecker::from_config(&config.syntax_check),
            ))?;
        }
        Ok(validator)
    }

    /// Enable the runtime group with the given checker.
    ///
    /// # Errors
    /// Returns an error if a runtime rule pattern fails to compile.
    pub fn with_syntax_checker(mut self, checker: Box<dyn SyntaxChecker>) -> Result<Self> {
        if !self.runs_group(RuleGroup::Runtime) {
            self.rule_sets.push(RuleSet::for_group(RuleGroup::Runtime)?);
        }
        self.syntax_checker = Some(checker);
        Ok(self)
    }

    #[must_use]
    pub fn runs_group(&self, group: RuleGroup) -> bool {
        self.rule_sets.iter().any(|set| set.group() == group)
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Evaluate the document at `path`.
    ///
    /// # Errors
    /// Returns [`crate::ValidatorError::FileNotFound`] for a missing path and
    /// [`crate::ValidatorError::FileRead`] when a readable file fails to load.
    pub fn validate(&self, path: &Path) -> Result<ValidationReport> {
        let document = Document::load(&self.source, path)?;
        Ok(self.validate_document(&document))
    }

    /// Evaluate an already loaded snapshot.
    #[must_use]
    pub fn validate_document(&self, document: &Document) -> ValidationReport {
        let syntax = self
            .syntax_checker
            .as_ref()
            .map(|checker| checker.check(document.path()));
        let ctx = RuleContext {
            document,
            primitives: &self.primitives,
            syntax: syntax.as_ref(),
        };

        let mut builder = ReportBuilder::new();
        builder.record(TestRecord::new("file_exists", "File exists", true));
        if !document.is_readable() {
            builder.error(format!(
                "Could not read file contents: {}",
                document.path().display()
            ));
        }
        for set in &self.rule_sets {
            builder.merge(set.evaluate(&ctx));
        }

        let report = builder.finish();
        tracing::debug!(
            path = %document.path().display(),
            total = report.summary.total,
            failed = report.summary.failed,
            "validated document"
        );
        report
    }

    /// Evaluate `path`, folding input errors into an aborted report.
    #[must_use]
    pub fn validate_or_report(&self, path: &Path) -> ValidationReport {
        self.validate(path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "could not validate");
            let failed = match err {
                ValidatorError::FileNotFound(_) => {
                    TestRecord::new("file_exists", "File exists", false)
                }
                _ => TestRecord::new("file_readable", "File is readable", false),
            };
            ValidationReport::aborted(failed, err.to_string())
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
