//! Application layer for the Kamel runner.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RunService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! rules itself. Classification, merging and filtering live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{RunReport, RunRequest, RunService};

// Re-export port traits (for adapter implementation)
pub use ports::{
    DescriptorReader, FileScanner, LaunchOutcome, ProcessLauncher, PropertiesSource,
    SettingsSource,
};

pub use error::{ApplicationError, SettingsDocument};
