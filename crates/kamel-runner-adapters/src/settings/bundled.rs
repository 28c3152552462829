//! Default settings and dependency exclusions.
//!
//! Both documents ship inside the binary. Either can be replaced by a file
//! on disk, which is read on every call.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use kamel_runner_core::{
    application::{ApplicationError, SettingsDocument, ports::SettingsSource},
    domain::{ExclusionList, Settings},
    error::RunnerResult,
};

const DEFAULT_SETTINGS_JSON: &str = include_str!("../../resources/default-settings.json");
const EXCLUDED_DEPENDENCIES_JSON: &str =
    include_str!("../../resources/excluded-dependencies.json");

/// Where a JSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Compiled into the binary under a resource name.
    Embedded {
        name: &'static str,
        content: &'static str,
    },
    /// Read from disk.
    File(PathBuf),
}

impl DocumentSource {
    fn read(&self, document: SettingsDocument) -> RunnerResult<String> {
        match self {
            Self::Embedded { content, .. } => Ok((*content).to_string()),
            Self::File(path) => fs::read_to_string(path).map_err(|e| {
                ApplicationError::SettingsLoad {
                    document,
                    resource: self.to_string(),
                    reason: e.to_string(),
                }
                .into()
            }),
        }
    }

    fn parse<T: DeserializeOwned>(&self, document: SettingsDocument) -> RunnerResult<T> {
        let raw = self.read(document)?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::SettingsLoad {
                document,
                resource: self.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded { name, .. } => write!(f, "bundled {name}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Settings source backed by the bundled JSON documents.
#[derive(Debug, Clone)]
pub struct BundledSettings {
    defaults: DocumentSource,
    exclusions: DocumentSource,
}

impl BundledSettings {
    /// Use the documents compiled into the binary.
    pub fn new() -> Self {
        Self {
            defaults: DocumentSource::Embedded {
                name: "default-settings.json",
                content: DEFAULT_SETTINGS_JSON,
            },
            exclusions: DocumentSource::Embedded {
                name: "excluded-dependencies.json",
                content: EXCLUDED_DEPENDENCIES_JSON,
            },
        }
    }

    /// Replace the default settings document with a file.
    pub fn with_defaults_file(mut self, path: impl AsRef<Path>) -> Self {
        self.defaults = DocumentSource::File(path.as_ref().to_path_buf());
        self
    }

    /// Replace the exclusion document with a file.
    pub fn with_exclusions_file(mut self, path: impl AsRef<Path>) -> Self {
        self.exclusions = DocumentSource::File(path.as_ref().to_path_buf());
        self
    }

    pub fn defaults_source(&self) -> &DocumentSource {
        &self.defaults
    }

    pub fn exclusions_source(&self) -> &DocumentSource {
        &self.exclusions
    }
}

impl Default for BundledSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsSource for BundledSettings {
    #[instrument(skip(self), fields(source = %self.defaults))]
    fn default_settings(&self) -> RunnerResult<Settings> {
        let settings: Settings = self.defaults.parse(SettingsDocument::Defaults)?;
        debug!(
            configs = settings.configs.len(),
            traits = settings.traits.len(),
            "default settings loaded"
        );
        Ok(settings)
    }

    #[instrument(skip(self), fields(source = %self.exclusions))]
    fn exclusions(&self) -> RunnerResult<ExclusionList> {
        let list: ExclusionList = self.exclusions.parse(SettingsDocument::Exclusions)?;
        debug!(count = list.len(), "exclusions loaded");
        Ok(list)
    }
}
