//! In-memory scanner for testing.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use kamel_runner_core::application::ports::FileScanner;

/// Scanner over a fixed list of paths, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryScanner {
    inner: Arc<RwLock<Vec<PathBuf>>>,
}

impl MemoryScanner {
    /// Create a new empty scanner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner seeded with `paths`.
    pub fn with_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let scanner = Self::new();
        for path in paths {
            scanner.add_file(path);
        }
        scanner
    }

    /// Register a file (testing helper).
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.push(path.into());
        }
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileScanner for MemoryScanner {
    fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        inner
            .iter()
            .filter(|p| p.starts_with(root) && p.as_path() != root)
            .cloned()
            .collect()
    }
}
