//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kamel-runner-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{AssembledCommand, Dependency, ExclusionList, Properties, Settings};
use crate::error::RunnerResult;

/// Port for recursive file discovery.
///
/// Implemented by:
/// - `kamel_runner_adapters::filesystem::WalkDirScanner` (production)
/// - `kamel_runner_adapters::filesystem::MemoryScanner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait FileScanner: Send + Sync {
    /// Every regular file reachable from `root`, as absolute paths.
    ///
    /// A missing or unreadable root yields an empty list, not an error.
    /// No ordering is guaranteed beyond what the directory listing yields.
    fn scan(&self, root: &Path) -> Vec<PathBuf>;
}

/// Port for the default settings and the dependency exclusion list.
///
/// Implemented by:
/// - `kamel_runner_adapters::settings::BundledSettings`
#[cfg_attr(test, mockall::automock)]
pub trait SettingsSource: Send + Sync {
    /// Baked-in flags and traits, before caller overrides.
    fn default_settings(&self) -> RunnerResult<Settings>;

    /// Artifact names never passed to the runtime.
    fn exclusions(&self) -> RunnerResult<ExclusionList>;
}

/// Port for the module's build descriptor.
///
/// Implemented by:
/// - `kamel_runner_adapters::descriptor::PomDescriptor`
#[cfg_attr(test, mockall::automock)]
pub trait DescriptorReader: Send + Sync {
    /// Declared dependencies of the module rooted at `module_dir`.
    fn dependencies(&self, module_dir: &Path) -> RunnerResult<Vec<Dependency>>;
}

/// Port for key/value properties files.
///
/// Implemented by:
/// - `kamel_runner_adapters::properties::PropertiesFile`
#[cfg_attr(test, mockall::automock)]
pub trait PropertiesSource: Send + Sync {
    /// Load `path`, keeping declaration order.
    fn load(&self, path: &Path) -> RunnerResult<Properties>;
}

/// Port for running an assembled command.
///
/// Implemented by:
/// - `kamel_runner_adapters::process::ShellLauncher`
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLauncher: Send + Sync {
    /// Run `command` in `working_dir`, forwarding output as it arrives, and
    /// wait for it to exit.
    ///
    /// A non-zero exit status is reported in the outcome, not as an error.
    fn launch(&self, command: &AssembledCommand, working_dir: &Path)
    -> RunnerResult<LaunchOutcome>;
}

/// What happened to a launched command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout_lines: usize,
    pub stderr_lines: usize,
}

impl LaunchOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
