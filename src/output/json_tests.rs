use std::path::Path;

use super::*;
use crate::output::test_fixtures::{failing_report, sample_run};

#[test]
fn report_keys_match_payload_shape() {
    let output = JsonFormatter
        .format_report(Path::new("b.svg"), &failing_report())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    for key in ["timestamp", "version", "tests", "errors", "warnings", "summary"] {
        assert!(keys.contains(&key), "missing {key}");
    }
    assert_eq!(value["tests"][1]["status"], "FAIL");
    assert_eq!(value["tests"][1]["passed"], false);
    assert_eq!(value["summary"]["status"], "FAILED");
    assert_eq!(value["summary"]["success_rate"], 50.0);
}

#[test]
fn report_round_trips() {
    let report = failing_report();
    let output = JsonFormatter.format_report(Path::new("b.svg"), &report).unwrap();
    let parsed: crate::report::ValidationReport = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn directory_run_keeps_file_order() {
    let output = JsonFormatter.format_directory(&sample_run()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["total_files"], 3);
    assert_eq!(value["failed_files"], 2);
    assert_eq!(value["skipped"][0]["path"], "apps/huge.svg");
    let a = output.find("\"apps/a.svg\": {").unwrap();
    let b = output.find("\"apps/b.svg\": {").unwrap();
    assert!(a < b);
}
