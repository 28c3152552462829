//! Build descriptor adapters.

pub mod pom;

pub use pom::{POM_FILE, PomDescriptor, parse_dependencies};
