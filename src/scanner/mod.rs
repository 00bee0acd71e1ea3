mod filter;
mod run;

pub use filter::{ExtensionFilter, FileFilter};
pub use run::{DirectoryRunResult, ErroredFile, SkippedFile, run_directory};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::error::{Result, ValidatorError};

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Recursive discovery of candidate documents, sorted by path.
pub struct DocumentScanner<F: FileFilter> {
    filter: F,
}

impl DocumentScanner<ExtensionFilter> {
    /// Scanner for the configured extensions and exclude globs.
    ///
    /// # Errors
    /// Returns an error if an exclude pattern is invalid.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Ok(Self::new(ExtensionFilter::new(
            &config.extensions,
            &config.exclude,
        )?))
    }
}

impl<F: FileFilter> DocumentScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.path().is_file() && self.filter.should_include(e.path()))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
        files
    }
}

impl<F: FileFilter> FileScanner for DocumentScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(ValidatorError::Io(std::io::Error::new(
                std::io::ErrorKind::NotADirectory,
                format!("not a directory: {}", root.display()),
            )));
        }
        let files = self.scan_impl(root);
        tracing::debug!(root = %root.display(), found = files.len(), "scanned directory");
        Ok(files)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
