//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not domain
//! rules. Domain rule errors are `DomainError` from `crate::domain`.

use std::{fmt, path::PathBuf};
use thiserror::Error;

use crate::error::ErrorCategory;

/// Which settings document failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsDocument {
    /// `{"configs": [...], "traits": {...}}`
    Defaults,
    /// `{"excludedDependencies": [...]}`
    Exclusions,
}

impl SettingsDocument {
    /// App config key that points at a replacement file.
    pub fn config_key(self) -> &'static str {
        match self {
            Self::Defaults => "settings.defaults_file",
            Self::Exclusions => "settings.exclusions_file",
        }
    }

    fn expected_shape(self) -> &'static str {
        match self {
            Self::Defaults => r#"{"configs": [...], "traits": {...}}"#,
            Self::Exclusions => r#"{"excludedDependencies": [...]}"#,
        }
    }
}

impl fmt::Display for SettingsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("default settings"),
            Self::Exclusions => f.write_str("dependency exclusions"),
        }
    }
}

/// Errors that occur while assembling or launching a run.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A bundled or configured settings document is missing or malformed.
    #[error("Failed to load {document} from {resource}: {reason}")]
    SettingsLoad {
        document: SettingsDocument,
        resource: String,
        reason: String,
    },

    /// The build descriptor could not be read or parsed.
    #[error("Failed to read build descriptor {path}: {reason}")]
    DescriptorError { path: PathBuf, reason: String },

    /// The module properties file could not be read.
    #[error("Failed to load properties from {path}: {reason}")]
    PropertiesError { path: PathBuf, reason: String },

    /// The subprocess could not be spawned or awaited.
    #[error("Failed to launch `{program}`: {reason}")]
    LaunchFailed { program: String, reason: String },

    /// Reading subprocess output failed.
    #[error("Failed to read command output: {reason}")]
    StreamFailed { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SettingsLoad {
                document, resource, ..
            } => vec![
                format!("Check the contents of {}", resource),
                format!("Expected shape: {}", document.expected_shape()),
                format!(
                    "Remove {} from your config to use the bundled {}",
                    document.config_key(),
                    document
                ),
            ],
            Self::DescriptorError { path, .. } => vec![
                format!("Check that {} is well-formed XML", path.display()),
                "Try: mvn validate".into(),
            ],
            Self::PropertiesError { path, .. } => vec![
                format!("Expected a properties file at {}", path.display()),
                "Create an empty application.properties if the module has no properties".into(),
            ],
            Self::LaunchFailed { program, .. } => vec![
                format!("Could not start {}", program),
                "Ensure the shell exists and `kamel` is installed and in your PATH".into(),
            ],
            Self::StreamFailed { .. } => vec![
                "The command was started but its output could not be read".into(),
                "Check the command output above for details".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SettingsLoad { .. }
            | Self::DescriptorError { .. }
            | Self::PropertiesError { .. } => ErrorCategory::Configuration,
            Self::LaunchFailed { .. } | Self::StreamFailed { .. } => ErrorCategory::Launch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_error(document: SettingsDocument) -> ApplicationError {
        ApplicationError::SettingsLoad {
            document,
            resource: "/etc/kamel/doc.json".into(),
            reason: "expected value".into(),
        }
    }

    #[test]
    fn settings_suggestions_follow_failing_document() {
        let defaults = settings_error(SettingsDocument::Defaults).suggestions().join("\n");
        assert!(defaults.contains("\"traits\""));
        assert!(defaults.contains("settings.defaults_file"));
        assert!(!defaults.contains("excludedDependencies"));

        let exclusions = settings_error(SettingsDocument::Exclusions).suggestions().join("\n");
        assert!(exclusions.contains("\"excludedDependencies\""));
        assert!(exclusions.contains("settings.exclusions_file"));
        assert!(!exclusions.contains("traits"));
    }

    #[test]
    fn settings_error_names_document_and_resource() {
        let message = settings_error(SettingsDocument::Exclusions).to_string();
        assert_eq!(
            message,
            "Failed to load dependency exclusions from /etc/kamel/doc.json: expected value"
        );
    }
}
