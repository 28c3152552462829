//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `KAMEL_RUNNER__<SECTION>__<KEY>`
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use kamel_runner_adapters::process::DEFAULT_SHELL;
use kamel_runner_core::domain::{DEFAULT_RUNTIME_COMMAND, SettingsOverrides};

const ENV_PREFIX: &str = "KAMEL_RUNNER";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How the command is launched.
    pub runtime: RuntimeConfig,
    /// Replacement settings documents.
    pub settings: SettingsConfig,
    /// Overrides applied to every run.
    pub run: RunConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub command: String,
    pub shell: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_RUNTIME_COMMAND.into(),
            shell: PathBuf::from(DEFAULT_SHELL),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub configs: Vec<String>,
    pub traits: IndexMap<String, String>,
}

impl RunConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            configs: self.configs.clone(),
            traits: self.traits.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("run.configs")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kamel-runner.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "kamel-runner", "kamel-runner")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kamel-runner.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_runtime() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.runtime.command, "kamel run");
        assert_eq!(cfg.runtime.shell, PathBuf::from("/bin/sh"));
        assert!(!cfg.output.no_color);
        assert!(cfg.run.overrides().is_empty());
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[runtime]
command = "kamel run -n staging"

[settings]
defaults_file = "/etc/kamel/defaults.json"

[run]
configs = ["wait"]

[run.traits]
"logging.level" = "DEBUG"
"container.image" = "acme/orders:1"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.runtime.command, "kamel run -n staging");
        assert_eq!(cfg.runtime.shell, PathBuf::from("/bin/sh"));
        assert_eq!(
            cfg.settings.defaults_file,
            Some(PathBuf::from("/etc/kamel/defaults.json"))
        );
        let overrides = cfg.run.overrides();
        assert_eq!(overrides.configs, vec!["wait"]);
        let keys: Vec<_> = overrides.traits.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["logging.level", "container.image"]);
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&temp.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[runtime\ncommand = ").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
