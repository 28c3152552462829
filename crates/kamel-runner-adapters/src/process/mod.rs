//! Subprocess adapters.

pub mod shell;

pub use shell::{DEFAULT_SHELL, OutputStream, ShellLauncher};
