//! Kamel Runner Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Kamel
//! runner, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        kamel-runner-cli (CLI)           │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │              (RunService)               │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Scanner, Settings, Descriptor,        │
//! │   Properties, Launcher)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   kamel-runner-adapters (Infrastructure)│
//! │ (WalkDirScanner, PomDescriptor, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ModuleLayout, Classifier, Settings,    │
//! │  DependencyFilter, CommandBuilder)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kamel_runner_core::{
//!     application::{RunRequest, RunService},
//!     domain::{SettingsOverrides, Variant},
//! };
//!
//! // 1. Describe the run
//! let request = RunRequest::new("/work/orders-module")
//!     .overrides(SettingsOverrides::default())
//!     .variant(Variant::Dev);
//!
//! // 2. Use application service (with injected adapters)
//! let service = RunService::new(scanner, settings, descriptor, properties, launcher);
//! service.run(&request).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        LaunchOutcome, RunRequest, RunService,
        ports::{DescriptorReader, FileScanner, ProcessLauncher, PropertiesSource, SettingsSource},
    };
    pub use crate::domain::{
        AssembledCommand, ClassifiedArgument, Classifier, CommandBuilder, Dependency,
        DependencyFilter, ExclusionList, ModuleLayout, Properties, Settings, SettingsOverrides,
        Variant,
    };
    pub use crate::error::{RunnerError, RunnerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
