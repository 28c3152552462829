//! Run Service - main application orchestrator.
//!
//! This service coordinates one run:
//! 1. Resolve the module layout
//! 2. Scan and classify files
//! 3. Merge settings, read properties, resolve dependencies
//! 4. Assemble the command
//! 5. Launch it
//!
//! Steps 1-4 finish before anything is spawned, so configuration errors
//! never leave a half-started subprocess behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{
        DescriptorReader, FileScanner, LaunchOutcome, ProcessLauncher, PropertiesSource,
        SettingsSource,
    },
    domain::{
        AssembledCommand, Classifier, CommandBuilder, DEFAULT_RUNTIME_COMMAND, DependencyFilter,
        ModuleLayout, SettingsOverrides, Variant,
    },
    error::RunnerResult,
};

/// Input of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub module_dir: PathBuf,
    pub overrides: SettingsOverrides,
    pub variant: Variant,
    pub runtime: String,
}

impl RunRequest {
    pub fn new(module_dir: impl Into<PathBuf>) -> Self {
        Self {
            module_dir: module_dir.into(),
            overrides: SettingsOverrides::default(),
            variant: Variant::Run,
            runtime: DEFAULT_RUNTIME_COMMAND.to_string(),
        }
    }

    pub fn overrides(mut self, overrides: SettingsOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }
}

/// Result of a launched run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub command: AssembledCommand,
    pub outcome: LaunchOutcome,
}

/// Main run service.
///
/// Orchestrates scanning, classification, settings, dependencies and launch.
pub struct RunService {
    scanner: Box<dyn FileScanner>,
    settings: Box<dyn SettingsSource>,
    descriptor: Box<dyn DescriptorReader>,
    properties: Box<dyn PropertiesSource>,
    launcher: Box<dyn ProcessLauncher>,
}

impl RunService {
    /// Create a new run service with the given adapters.
    pub fn new(
        scanner: Box<dyn FileScanner>,
        settings: Box<dyn SettingsSource>,
        descriptor: Box<dyn DescriptorReader>,
        properties: Box<dyn PropertiesSource>,
        launcher: Box<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            scanner,
            settings,
            descriptor,
            properties,
            launcher,
        }
    }

    /// Assemble the command for `request` without launching it.
    #[instrument(
        skip_all,
        fields(module = %request.module_dir.display(), variant = %request.variant)
    )]
    pub fn assemble(&self, request: &RunRequest) -> RunnerResult<AssembledCommand> {
        let layout = ModuleLayout::from_module_dir(&request.module_dir)?;

        // 1. Scan and classify
        let files = self.scan_all(&layout.search_roots());
        let classification = Classifier::new(&layout).classify_all(&files);
        debug!(
            files = files.len(),
            arguments = classification.arguments.len(),
            connectors = classification.connectors.len(),
            "Files classified"
        );

        // 2. Settings
        let settings = self.settings.default_settings()?.merged(&request.overrides);
        debug!(
            configs = settings.configs.len(),
            traits = settings.traits.len(),
            "Settings merged"
        );

        // 3. Properties
        let properties = self.properties.load(&layout.properties_path())?;

        // 4. Dependencies
        let filter = DependencyFilter::new(self.settings.exclusions()?);
        let declared = self.descriptor.dependencies(layout.module_dir())?;
        let dependencies = filter.resolve(&declared);
        debug!(
            declared = declared.len(),
            kept = dependencies.len(),
            "Dependencies resolved"
        );

        // 5. Assemble
        let command = CommandBuilder::new()
            .runtime(&request.runtime)
            .classification(&classification)
            .settings(&settings)
            .properties(&properties)
            .dependencies(&dependencies)
            .variant(request.variant)
            .build();

        info!(lines = command.line_count(), "Command assembled");
        Ok(command)
    }

    /// Assemble and launch, waiting for the subprocess to exit.
    ///
    /// The subprocess exit status is reported but never turned into an error.
    #[instrument(skip_all, fields(module = %request.module_dir.display()))]
    pub fn run(&self, request: &RunRequest) -> RunnerResult<RunReport> {
        let command = self.assemble(request)?;
        let outcome = self.launch(&command, &request.module_dir)?;
        Ok(RunReport { command, outcome })
    }

    /// Launch an already assembled command.
    pub fn launch(
        &self,
        command: &AssembledCommand,
        working_dir: &Path,
    ) -> RunnerResult<LaunchOutcome> {
        info!("{}", command);
        let outcome = self.launcher.launch(command, working_dir)?;

        match outcome.exit_code {
            Some(0) => info!("Command finished"),
            Some(code) => warn!(code, "Command exited with a non-zero status"),
            None => warn!("Command was terminated by a signal"),
        }

        Ok(outcome)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Scan each root in order and concatenate the results.
    fn scan_all(&self, roots: &[PathBuf]) -> Vec<PathBuf> {
        roots
            .iter()
            .flat_map(|root| {
                let files = self.scanner.scan(root);
                debug!(root = %root.display(), count = files.len(), "Scanned");
                files
            })
            .collect()
    }
}
