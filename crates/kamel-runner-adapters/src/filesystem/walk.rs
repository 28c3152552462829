//! Directory scanner backed by `walkdir`.

use std::path::{Path, PathBuf};

use kamel_runner_core::application::ports::FileScanner;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// Production scanner: recursive descent that follows symlinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirScanner {
    sorted: bool,
}

impl WalkDirScanner {
    /// Create a scanner that yields entries in directory-listing order.
    pub fn new() -> Self {
        Self { sorted: false }
    }

    /// Sort entries by file name within each directory.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}

impl FileScanner for WalkDirScanner {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn scan(&self, root: &Path) -> Vec<PathBuf> {
        if !root.is_dir() {
            debug!("root missing or not a directory");
            return Vec::new();
        }

        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let mut walker = WalkDir::new(&root).follow_links(true);
        if self.sorted {
            walker = walker.sort_by_file_name();
        }

        walker
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn missing_root_yields_nothing() {
        let temp = TempDir::new().unwrap();
        assert!(WalkDirScanner::new().scan(&temp.path().join("nope")).is_empty());
    }

    #[test]
    fn lists_files_recursively_without_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.json");
        touch(temp.path(), "api/doc/b.yaml");
        touch(temp.path(), "deep/er/still/c.txt");
        fs::create_dir_all(temp.path().join("empty")).unwrap();

        let files = WalkDirScanner::new().sorted(true).scan(temp.path());
        let rel: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(temp.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(rel, vec!["a.json", "api/doc/b.yaml", "deep/er/still/c.txt"]);
        assert!(files.iter().all(|f| f.is_absolute()));
    }

    #[test]
    fn file_root_is_not_scanned() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "single.json");
        assert!(WalkDirScanner::new().scan(&temp.path().join("single.json")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinked_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "real/linked.json");
        fs::create_dir_all(temp.path().join("root")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("root/link"))
            .unwrap();

        let files = WalkDirScanner::new().scan(&temp.path().join("root"));
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("link/linked.json"));
    }
}
