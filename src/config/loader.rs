use std::path::{Path, PathBuf};

use globset::Glob;

use crate::error::{Result, ValidatorError};

use super::filesystem::{FileSystem, RealFileSystem};
use super::Config;

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

pub const LOCAL_CONFIG_NAME: &str = ".svg-pwa-validator.toml";

/// Loads configuration from the filesystem.
///
/// Looks for `.svg-pwa-validator.toml` in the current directory and falls back
/// to `Config::default()` when there is none.
#[derive(Debug)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate_config(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<Config> {
        match self.local_config_path() {
            Some(path) if self.fs.exists(&path) => self.load_from_path(&path),
            _ => Ok(Config::default()),
        }
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| ValidatorError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::parse_config(&content)
    }
}

/// Check semantic constraints serde cannot express.
///
/// # Errors
/// Returns [`ValidatorError::Config`] or [`ValidatorError::InvalidGlob`] for
/// the first violated constraint.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.scan.extensions.iter().all(|e| e.trim().is_empty()) {
        return Err(ValidatorError::Config(
            "scan.extensions must name at least one extension".to_string(),
        ));
    }
    if config.scan.max_file_size == 0 {
        return Err(ValidatorError::Config(
            "scan.max_file_size must be greater than 0".to_string(),
        ));
    }
    if config.rules.max_document_size == 0 {
        return Err(ValidatorError::Config(
            "rules.max_document_size must be greater than 0".to_string(),
        ));
    }
    if let Some(blank) = config
        .rules
        .dangerous_functions
        .iter()
        .chain(&config.rules.disallowed_elements)
        .find(|name| name.trim().is_empty())
    {
        return Err(ValidatorError::Config(format!(
            "rules lists may not contain blank entries (found {blank:?})"
        )));
    }
    if config.syntax_check.command.trim().is_empty() {
        return Err(ValidatorError::Config(
            "syntax_check.command must not be empty".to_string(),
        ));
    }
    if config.syntax_check.timeout_secs == 0 {
        return Err(ValidatorError::Config(
            "syntax_check.timeout_secs must be greater than 0".to_string(),
        ));
    }
    for pattern in &config.scan.exclude {
        Glob::new(pattern).map_err(|source| ValidatorError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests/mod.rs"]
mod tests;
