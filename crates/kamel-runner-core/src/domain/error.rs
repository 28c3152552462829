// ============================================================================
// domain/error.rs - DOMAIN RULE VIOLATIONS
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried through `RunnerError`)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Layout Errors
    // ========================================================================
    #[error("Invalid module directory '{path}': {reason}")]
    InvalidModuleDir { path: PathBuf, reason: String },

    // ========================================================================
    // Input Errors
    // ========================================================================
    #[error("Invalid trait '{input}': expected KEY=VALUE")]
    InvalidTrait { input: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidModuleDir { path, .. } => vec![
                format!("Module directory: {}", path.display()),
                "Run from inside a Maven module, or pass --module-dir".into(),
                "The module must live next to a sibling 'generics' module".into(),
            ],
            Self::InvalidTrait { input } => vec![
                format!("Could not split '{}' into a key and a value", input),
                "Example: --trait logging.level=DEBUG".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidModuleDir { .. } | Self::InvalidTrait { .. } => ErrorCategory::Validation,
        }
    }
}
