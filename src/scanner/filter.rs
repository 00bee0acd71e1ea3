use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, ValidatorError};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Keeps files with a target extension (case-insensitive) that match no
/// exclude glob.
pub struct ExtensionFilter {
    extensions: Vec<String>,
    exclude_patterns: GlobSet,
}

impl ExtensionFilter {
    /// Create a new filter with the given extensions and exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(extensions: &[String], exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| ValidatorError::InvalidGlob {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder
            .build()
            .map_err(|e| ValidatorError::InvalidGlob {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self {
            extensions: extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            exclude_patterns,
        })
    }

    fn has_target_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_match(path)
    }
}

impl FileFilter for ExtensionFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_target_extension(path) && !self.is_excluded(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
