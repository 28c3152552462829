//! Core domain layer for the Kamel runner.
//!
//! This module contains pure rules with no I/O. Scanning, file reading and
//! process execution are handled via ports defined in the application layer.
//!
//! - **No I/O**: paths arrive as data, commands leave as strings
//! - **Ordered containers**: traits, properties and dependencies keep their
//!   first-seen order so the assembled command is deterministic
pub mod classifier;
pub mod command;
pub mod dependency;
pub mod error;
pub mod layout;
pub mod settings;

pub use classifier::{
    ArgumentKind, Classification, ClassificationRule, ClassifiedArgument, Classifier,
    GENERICS_RULES, MODULE_RULES, Origin,
};
pub use command::{AssembledCommand, CommandBuilder, DEFAULT_RUNTIME_COMMAND, Properties, Variant};
pub use dependency::{Dependency, DependencyFilter, ExclusionList, Rejection};
pub use error::DomainError;
pub use layout::{GENERICS_MODULE, ModuleLayout};
pub use settings::{Settings, SettingsOverrides, normalize_flag};
