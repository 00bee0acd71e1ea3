//! In-memory [`DocumentSource`] shared by engine and scanner tests.

use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::DocumentSource;

pub struct MockSource {
    files: HashMap<PathBuf, Vec<u8>>,
    sizes: HashMap<PathBuf, u64>,
    unreadable: HashSet<PathBuf>,
    reads: Mutex<Vec<PathBuf>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            sizes: HashMap::new(),
            unreadable: HashSet::new(),
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.as_bytes().to_vec());
        self
    }

    pub fn with_bytes(mut self, path: impl Into<PathBuf>, content: &[u8]) -> Self {
        self.files.insert(path.into(), content.to_vec());
        self
    }

    /// Report `size` for the path regardless of its content length.
    pub fn with_size(mut self, path: impl Into<PathBuf>, size: u64) -> Self {
        self.sizes.insert(path.into(), size);
        self
    }

    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }
}

impl DocumentSource for MockSource {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn is_dir(&self, _path: &Path) -> bool {
        false
    }

    fn size(&self, path: &Path) -> std::io::Result<u64> {
        if let Some(size) = self.sizes.get(path) {
            return Ok(*size);
        }
        self.files
            .get(path)
            .map(|b| b.len() as u64)
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn is_readable(&self, path: &Path) -> bool {
        self.files.contains_key(path) && !self.unreadable.contains(path)
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        if self.unreadable.contains(path) {
            return Err(Error::new(ErrorKind::PermissionDenied, "permission denied"));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }
}
