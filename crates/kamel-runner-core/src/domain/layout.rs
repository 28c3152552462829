//! Module layout: the primary module and its sibling `generics` module.

use std::path::{self, Path, PathBuf};

use super::DomainError;

/// Name of the shared sibling module.
pub const GENERICS_MODULE: &str = "generics";

const RESOURCES_DIR: &str = "src/main/resources";
const SOURCES_DIR: &str = "src/main/java";
const PROPERTIES_FILE: &str = "application.properties";

/// Directory roots of one run, computed once and never mutated.
///
/// Invariant: `generics_dir == parent_dir/generics` and
/// `module_dir.parent() == parent_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    module_dir: PathBuf,
    parent_dir: PathBuf,
    generics_dir: PathBuf,
}

impl ModuleLayout {
    /// Build the layout for `module_dir`.
    ///
    /// A relative `module_dir` is resolved against the working directory so it
    /// compares textually with the absolute paths produced by the scanner.
    pub fn from_module_dir(module_dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let module_dir = module_dir.into();
        let module_dir: PathBuf = path::absolute(&module_dir)
            .map_err(|e| DomainError::InvalidModuleDir {
                path: module_dir.clone(),
                reason: format!("cannot resolve against the working directory: {e}"),
            })?
            .components()
            .collect();
        let parent_dir = module_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .ok_or_else(|| DomainError::InvalidModuleDir {
                path: module_dir.clone(),
                reason: "directory has no parent".into(),
            })?;
        let generics_dir = parent_dir.join(GENERICS_MODULE);

        Ok(Self {
            module_dir,
            parent_dir,
            generics_dir,
        })
    }

    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    pub fn parent_dir(&self) -> &Path {
        &self.parent_dir
    }

    pub fn generics_dir(&self) -> &Path {
        &self.generics_dir
    }

    /// Roots to scan, in processing order: module resources, module sources,
    /// generics resources, generics sources.
    pub fn search_roots(&self) -> [PathBuf; 4] {
        [
            self.module_dir.join(RESOURCES_DIR),
            self.module_dir.join(SOURCES_DIR),
            self.generics_dir.join(RESOURCES_DIR),
            self.generics_dir.join(SOURCES_DIR),
        ]
    }

    /// The module's `application.properties`.
    pub fn properties_path(&self) -> PathBuf {
        self.module_dir.join(RESOURCES_DIR).join(PROPERTIES_FILE)
    }
}
