//! `kamel-runner run` / `kamel-runner dev`: assemble and launch.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

use kamel_runner_adapters::{
    BundledSettings, PomDescriptor, PropertiesFile, ShellLauncher, WalkDirScanner,
};
use kamel_runner_core::{
    application::{LaunchOutcome, RunRequest, RunService},
    domain::Variant,
};

use crate::{
    cli::RunArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute `run` or `dev`.
#[instrument(skip_all, fields(variant = %variant))]
pub fn execute(
    args: RunArgs,
    variant: Variant,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let module_dir = resolve_module_dir(args.module_dir.as_deref())?;
    debug!(module = %module_dir.display(), "Module resolved");

    let request = build_request(&args, variant, &config, &module_dir);
    let shell = args.shell.clone().unwrap_or_else(|| config.runtime.shell.clone());
    let service = build_service(&config, shell);

    let command = service.assemble(&request)?;
    output.emit(command.as_str())?;

    if args.dry_run {
        info!("Dry run, not launching");
        return Ok(());
    }

    let outcome = service.launch(&command, &module_dir)?;
    report(&outcome, &request.runtime, &output)?;
    Ok(())
}

/// Config-file overrides first, then the command line.
fn build_request(
    args: &RunArgs,
    variant: Variant,
    config: &AppConfig,
    module_dir: &Path,
) -> RunRequest {
    let overrides = config.run.overrides().layer(args.overrides());
    let runtime = args
        .runtime
        .clone()
        .unwrap_or_else(|| config.runtime.command.clone());

    RunRequest::new(module_dir)
        .overrides(overrides)
        .variant(variant)
        .runtime(runtime)
}

fn build_service(config: &AppConfig, shell: PathBuf) -> RunService {
    let mut settings = BundledSettings::new();
    if let Some(path) = &config.settings.defaults_file {
        settings = settings.with_defaults_file(path);
    }
    if let Some(path) = &config.settings.exclusions_file {
        settings = settings.with_exclusions_file(path);
    }

    RunService::new(
        Box::new(WalkDirScanner::new().sorted(true)),
        Box::new(settings),
        Box::new(PomDescriptor::new()),
        Box::new(PropertiesFile::new()),
        Box::new(ShellLauncher::new().with_shell(shell)),
    )
}

/// `--module-dir`, else the working directory, as a canonical path.
fn resolve_module_dir(explicit: Option<&Path>) -> CliResult<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => env::current_dir().with_cli_context(|| "Failed to read the working directory")?,
    };

    if !dir.is_dir() {
        return Err(CliError::ModuleDirNotFound { path: dir });
    }

    fs::canonicalize(&dir).with_cli_context(|| format!("Failed to resolve {}", dir.display()))
}

fn report(outcome: &LaunchOutcome, runtime: &str, output: &OutputManager) -> CliResult<()> {
    match outcome.exit_code {
        Some(0) => output.success(&format!("{runtime} finished"))?,
        Some(code) => output.warning(&format!("{runtime} exited with status {code}"))?,
        None => output.warning(&format!("{runtime} was terminated by a signal"))?,
    }
    Ok(())
}
