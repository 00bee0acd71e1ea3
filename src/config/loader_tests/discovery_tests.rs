use std::path::Path;

use super::mock_fs::MockFileSystem;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::ValidatorError;

#[test]
fn load_without_local_file_returns_defaults() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let config = loader.load().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_finds_config_in_current_dir() {
    let fs = MockFileSystem::new()
        .with_current_dir("/work")
        .with_file(
            "/work/.svg-pwa-validator.toml",
            "[rules]\nruntime_checks = true\n",
        );
    let loader = FileConfigLoader::with_fs(fs);
    let config = loader.load().unwrap();
    assert!(config.rules.runtime_checks);
}

#[test]
fn load_ignores_config_in_other_dirs() {
    let fs = MockFileSystem::new()
        .with_current_dir("/work")
        .with_file(
            "/elsewhere/.svg-pwa-validator.toml",
            "[rules]\nruntime_checks = true\n",
        );
    let loader = FileConfigLoader::with_fs(fs);
    assert!(!loader.load().unwrap().rules.runtime_checks);
}

#[test]
fn load_from_missing_path_reports_file_read() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let err = loader.load_from_path(Path::new("/nope.toml")).unwrap_err();
    assert!(matches!(err, ValidatorError::FileRead { .. }));
}
