use crate::config::{validate_config, Config};
use crate::error::ValidatorError;

#[test]
fn default_config_is_valid() {
    assert!(validate_config(&Config::default()).is_ok());
}

#[test]
fn empty_extensions_rejected() {
    let mut config = Config::default();
    config.scan.extensions = vec![" ".to_string()];
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("scan.extensions"));
}

#[test]
fn zero_ceilings_rejected() {
    let mut config = Config::default();
    config.scan.max_file_size = 0;
    assert!(matches!(
        validate_config(&config),
        Err(ValidatorError::Config(_))
    ));

    let mut config = Config::default();
    config.rules.max_document_size = 0;
    assert!(matches!(
        validate_config(&config),
        Err(ValidatorError::Config(_))
    ));
}

#[test]
fn blank_deny_list_entry_rejected() {
    let mut config = Config::default();
    config.rules.dangerous_functions.push(String::new());
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("blank"));
}

#[test]
fn zero_timeout_rejected() {
    let mut config = Config::default();
    config.syntax_check.timeout_secs = 0;
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn invalid_exclude_glob_rejected() {
    let mut config = Config::default();
    config.scan.exclude = vec!["[unclosed".to_string()];
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ValidatorError::InvalidGlob { .. }));
}
