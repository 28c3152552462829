//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kamel-runner-adapters`
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FileScanner`: recursive file discovery
//!   - `SettingsSource`: default settings and exclusions
//!   - `DescriptorReader`: build descriptor dependencies
//!   - `PropertiesSource`: module properties
//!   - `ProcessLauncher`: subprocess execution
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DescriptorReader, FileScanner, LaunchOutcome, ProcessLauncher, PropertiesSource,
    SettingsSource,
};

#[cfg(test)]
pub use output::{
    MockDescriptorReader, MockFileScanner, MockProcessLauncher, MockPropertiesSource,
    MockSettingsSource,
};
