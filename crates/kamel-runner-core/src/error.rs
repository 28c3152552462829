//! Unified error handling for Kamel Runner Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Kamel Runner Core operations.
///
/// This enum wraps all possible errors that can occur when using
/// kamel-runner-core, providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum RunnerError {
    /// Errors from the domain layer (rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (loading and launching).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl RunnerError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }

    /// `true` when the run failed before any subprocess was spawned.
    pub fn is_pre_launch(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Launch)
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad caller input.
    Validation,
    /// A settings document, descriptor or properties file is unusable.
    Configuration,
    /// The subprocess could not be started or followed.
    Launch,
}

/// Convenient result type alias.
pub type RunnerResult<T> = Result<T, RunnerError>;
