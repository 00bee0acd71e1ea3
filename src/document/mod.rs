//! Document loading.
//!
//! The engine never touches the filesystem directly: it goes through a
//! [`DocumentSource`], so tests can count reads and simulate unreadable files.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, ValidatorError};

/// Capability for querying and loading candidate documents.
pub trait DocumentSource {
    /// Check whether the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check whether the path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Size of the file in bytes, without reading its contents.
    ///
    /// # Errors
    /// Returns an error if the metadata cannot be read.
    fn size(&self, path: &Path) -> io::Result<u64>;

    /// Whether the current process can open the file for reading.
    fn is_readable(&self, path: &Path) -> bool;

    /// Read the full file contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`DocumentSource`] backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDocumentSource;

impl DocumentSource for FsDocumentSource {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn size(&self, path: &Path) -> io::Result<u64> {
        std::fs::metadata(path).map(|m| m.len())
    }

    fn is_readable(&self, path: &Path) -> bool {
        File::open(path).is_ok()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Immutable snapshot of one document, shared by every rule group.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    bytes: Vec<u8>,
    text: String,
    size: u64,
    readable: bool,
}

impl Document {
    /// Build a snapshot from raw bytes.
    ///
    /// Invalid UTF-8 is decoded lossily for pattern matching; the encoding rule
    /// still inspects the original bytes.
    #[must_use]
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>, size: u64, readable: bool) -> Self {
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Self {
            path: path.into(),
            bytes,
            text,
            size,
            readable,
        }
    }

    /// In-memory document, mostly for tests and the rule runner.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let bytes = text.as_bytes().to_vec();
        let size = bytes.len() as u64;
        Self::from_bytes(path, bytes, size, true)
    }

    /// Load a document through `source`.
    ///
    /// A file that exists but cannot be read yields an empty snapshot with
    /// `readable == false`; the rule groups report on it instead of aborting.
    ///
    /// # Errors
    /// Returns [`ValidatorError::FileNotFound`] if the path does not exist.
    pub fn load<S: DocumentSource + ?Sized>(source: &S, path: &Path) -> Result<Self> {
        if !source.exists(path) {
            return Err(ValidatorError::FileNotFound(path.to_path_buf()));
        }
        let size = source.size(path).unwrap_or(0);
        let readable = source.is_readable(path);
        let bytes = if readable {
            source.read(path).map_err(|e| ValidatorError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Vec::new()
        };
        Ok(Self::from_bytes(path, bytes, size, readable))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.readable
    }

    /// Lower-cased file extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
