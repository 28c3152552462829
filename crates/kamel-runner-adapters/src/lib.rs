//! Infrastructure adapters for Kamel Runner.
//!
//! This crate implements the ports defined in `kamel-runner-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod descriptor;
pub mod filesystem;
pub mod process;
pub mod properties;
pub mod settings;

// Re-export commonly used adapters
pub use descriptor::PomDescriptor;
pub use filesystem::{MemoryScanner, WalkDirScanner};
pub use process::ShellLauncher;
pub use properties::PropertiesFile;
pub use settings::BundledSettings;
