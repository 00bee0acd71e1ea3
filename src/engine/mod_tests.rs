use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::document::test_fixtures::MockSource;
use crate::report::RunStatus;
use crate::rules::test_fixtures::{HYBRID_FORM, PLAIN_SVG};
use crate::syntax::SyntaxOutcome;
use crate::ValidatorError;

struct StubChecker {
    outcome: SyntaxOutcome,
    calls: Arc<AtomicUsize>,
}

impl SyntaxChecker for StubChecker {
    fn check(&self, _path: &Path) -> SyntaxOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

fn validator(source: MockSource) -> Validator<MockSource> {
    Validator::with_source(source, &Config::default()).unwrap()
}

#[test]
fn first_record_is_file_exists() {
    let v = validator(MockSource::new().with_file("a.svg", PLAIN_SVG));
    let report = v.validate(Path::new("a.svg")).unwrap();
    let first = &report.tests[0];
    assert_eq!(first.name, "file_exists");
    assert_eq!(first.description, "File exists");
    assert!(first.passed);
}

#[test]
fn core_groups_produce_thirty_one_records() {
    let v = validator(MockSource::new().with_file("a.svg", HYBRID_FORM));
    let report = v.validate(Path::new("a.svg")).unwrap();
    // file_exists + 8 structure + 4 pwa + 7 embedded + 3 browser + 3 preview + 5 forms
    assert_eq!(report.summary.total, 31);
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.summary.status, RunStatus::Passed);
    assert!(report.errors.is_empty());
    assert!(!v.runs_group(RuleGroup::Runtime));
}

#[test]
fn missing_file_is_an_input_error() {
    let v = validator(MockSource::new());
    let err = v.validate(Path::new("gone.svg")).unwrap_err();
    assert!(matches!(err, ValidatorError::FileNotFound(ref p) if p == &PathBuf::from("gone.svg")));
    assert!(err.is_input_error());
}

#[test]
fn missing_file_folds_into_aborted_report() {
    let v = validator(MockSource::new());
    let report = v.validate_or_report(Path::new("gone.svg"));
    assert_eq!(report.tests.len(), 1);
    assert_eq!(report.tests[0].name, "file_exists");
    assert!(!report.tests[0].passed);
    assert_eq!(report.errors, vec!["File not found: gone.svg".to_string()]);
    assert_eq!(report.summary.total, 1);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.status, RunStatus::Failed);
}

#[test]
fn unreadable_file_is_reported_not_aborted() {
    let source = MockSource::new()
        .with_file("locked.svg", PLAIN_SVG)
        .with_unreadable("locked.svg");
    let v = validator(source);
    let report = v.validate(Path::new("locked.svg")).unwrap();
    assert!(v.source().reads().is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(!report.test("file_readable").unwrap().passed);
    assert_eq!(report.summary.status, RunStatus::Failed);
}

#[test]
fn invalid_utf8_fails_only_the_encoding_rule() {
    let mut bytes = HYBRID_FORM.as_bytes().to_vec();
    bytes.insert(HYBRID_FORM.find("Send").unwrap() + 2, 0xFF);
    let v = validator(MockSource::new().with_bytes("a.svg", &bytes));

    let report = v.validate(Path::new("a.svg")).unwrap();
    let failed: Vec<_> = report.failed_tests().map(|t| t.name.as_str()).collect();
    assert_eq!(failed, ["utf8_encoding"]);
    assert_eq!(report.summary.total, 31);
    assert!(report.errors.is_empty());
}

#[test]
fn document_is_read_once_per_validation() {
    let v = validator(MockSource::new().with_file("a.svg", HYBRID_FORM));
    v.validate(Path::new("a.svg")).unwrap();
    assert_eq!(v.source().reads(), vec![PathBuf::from("a.svg")]);
}

#[test]
fn repeated_runs_are_identical() {
    let v = validator(MockSource::new().with_file("a.svg", "<svg><rect onclick='x()'/></svg>"));
    let first = v.validate(Path::new("a.svg")).unwrap();
    let second = v.validate(Path::new("a.svg")).unwrap();
    assert_eq!(first.tests, second.tests);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn summary_counts_failures_and_warnings() {
    let text = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1" viewBox="0 0 1 1"><?php exec('x'); ?></svg>"#;
    let v = validator(MockSource::new().with_file("a.svg", text));
    let report = v.validate(Path::new("a.svg")).unwrap();
    let failed: Vec<_> = report.failed_tests().map(|t| t.name.as_str()).collect();
    assert!(failed.contains(&"security_dangerous_functions"));
    assert!(failed.contains(&"foreign_object_present"));
    assert_eq!(report.summary.failed, failed.len());
    assert_eq!(report.summary.passed + report.summary.failed, report.summary.total);
    assert_eq!(report.summary.warnings, report.warnings.len());
    assert_eq!(report.summary.status, RunStatus::Failed);
}

#[test]
fn syntax_checker_enables_runtime_group() {
    let calls = Arc::new(AtomicUsize::new(0));
    let checker = StubChecker {
        outcome: SyntaxOutcome::Valid,
        calls: Arc::clone(&calls),
    };
    let v = validator(MockSource::new().with_file("a.svg", HYBRID_FORM))
        .with_syntax_checker(Box::new(checker))
        .unwrap();
    assert!(v.runs_group(RuleGroup::Runtime));

    let report = v.validate(Path::new("a.svg")).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.summary.total, 35);
    assert!(report.test("php_syntax").unwrap().passed);
    assert_eq!(report.tests.last().unwrap().name, "output_order");
}

#[test]
fn replacing_checker_keeps_one_runtime_group() {
    let stub = |outcome| StubChecker {
        outcome,
        calls: Arc::new(AtomicUsize::new(0)),
    };
    let v = validator(MockSource::new().with_file("a.svg", HYBRID_FORM))
        .with_syntax_checker(Box::new(stub(SyntaxOutcome::Valid)))
        .unwrap()
        .with_syntax_checker(Box::new(stub(SyntaxOutcome::Invalid {
            message: "Parse error".to_string(),
        })))
        .unwrap();
    let report = v.validate(Path::new("a.svg")).unwrap();
    assert_eq!(report.summary.total, 35);
    assert!(!report.test("php_syntax").unwrap().passed);
    assert!(report
        .warnings
        .contains(&"PHP syntax check failed: Parse error".to_string()));
}

#[test]
fn punctuation_in_deny_list_is_escaped() {
    let mut config = Config::default();
    config.rules.dangerous_functions = vec!["(".to_string()];
    // Names are escaped, so even punctuation compiles.
    assert!(Validator::with_source(MockSource::new(), &config).is_ok());
}
