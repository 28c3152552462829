//! Command-line assembly.
//!
//! The command is built by sequential append in a fixed order: prefix,
//! classified arguments, flags, traits, properties, dependencies, then the
//! connector block, then the variant suffix. Every line except the connector
//! block ends in a shell line continuation.

use std::fmt;

use indexmap::{IndexMap, IndexSet};

use super::{Classification, Settings};

/// Runtime invocation used when nothing else is configured.
pub const DEFAULT_RUNTIME_COMMAND: &str = "kamel run";

const CONTINUATION: &str = " \\";

/// Key/value pairs from the module's properties file, in file order.
pub type Properties = IndexMap<String, String>;

/// Named entry points; each may add one trailing flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Run,
    Dev,
}

impl Variant {
    pub fn extra_flag(self) -> Option<&'static str> {
        match self {
            Self::Run => None,
            Self::Dev => Some("--dev"),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => write!(f, "run"),
            Self::Dev => write!(f, "dev"),
        }
    }
}

/// The final shell command. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledCommand(String);

impl AssembledCommand {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of physical lines.
    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl fmt::Display for AssembledCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AssembledCommand {
    fn from(command: String) -> Self {
        Self(command)
    }
}

impl AsRef<str> for AssembledCommand {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collects the pieces of a run and renders them in the fixed order.
#[derive(Debug, Clone)]
pub struct CommandBuilder<'a> {
    runtime: &'a str,
    classification: Option<&'a Classification>,
    settings: Option<&'a Settings>,
    properties: Option<&'a Properties>,
    dependencies: Option<&'a IndexSet<String>>,
    variant: Variant,
}

impl<'a> CommandBuilder<'a> {
    pub fn new() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME_COMMAND,
            classification: None,
            settings: None,
            properties: None,
            dependencies: None,
            variant: Variant::Run,
        }
    }

    pub fn runtime(mut self, runtime: &'a str) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn classification(mut self, classification: &'a Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn settings(mut self, settings: &'a Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn properties(mut self, properties: &'a Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn dependencies(mut self, dependencies: &'a IndexSet<String>) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn build(self) -> AssembledCommand {
        let mut command = String::with_capacity(256);
        command.push_str(self.runtime);
        command.push_str(CONTINUATION);

        let mut line = |entry: &dyn fmt::Display| {
            command.push('\n');
            command.push_str(&entry.to_string());
            command.push_str(CONTINUATION);
        };

        if let Some(classification) = self.classification {
            for arg in &classification.arguments {
                line(arg);
            }
        }

        if let Some(settings) = self.settings {
            for flag in &settings.configs {
                line(flag);
            }
            for (key, value) in &settings.traits {
                line(&format_args!("--trait {key}={value}"));
            }
        }

        if let Some(properties) = self.properties {
            for (key, value) in properties {
                line(&format_args!("--property {key}={value}"));
            }
        }

        if let Some(dependencies) = self.dependencies {
            for dep in dependencies {
                line(&format_args!("--dependency {dep}"));
            }
        }

        if let Some(classification) = self.classification {
            for connector in &classification.connectors {
                command.push('\n');
                command.push_str(&connector.path);
            }
        }

        if let Some(flag) = self.variant.extra_flag() {
            command.push(' ');
            command.push_str(flag);
        }

        AssembledCommand(command)
    }
}

impl Default for CommandBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
