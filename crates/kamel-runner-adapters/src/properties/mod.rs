//! Properties file adapters.

pub mod file;

pub use file::{PropertiesFile, parse_properties};
