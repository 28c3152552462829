//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "assemble the command" or "run the module".

pub mod run_service;

pub use run_service::{RunReport, RunRequest, RunService};
