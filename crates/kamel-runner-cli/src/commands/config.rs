//! `kamel-runner config`: inspect the effective configuration.

use std::path::{Path, PathBuf};

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<&Path>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show => {
            output.header("Current Configuration:")?;
            output.emit(&render(&config)?)?;
        }

        ConfigCommands::Path => {
            output.emit(&active_path(config_file).display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn render(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn active_path(config_file: Option<&Path>) -> PathBuf {
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::config_path)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_default_config() {
        let rendered = render(&AppConfig::default()).unwrap();
        assert!(rendered.contains("[runtime]"));
        assert!(rendered.contains(r#"command = "kamel run""#));
        assert!(rendered.contains(r#"shell = "/bin/sh""#));
        assert!(!rendered.contains("defaults_file"));
    }

    #[test]
    fn rendered_config_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.run.configs.push("--wait".into());
        config
            .run
            .traits
            .insert("logging.level".into(), "DEBUG".into());

        let parsed: AppConfig = toml::from_str(&render(&config).unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = Path::new("/etc/kamel-runner.toml");
        assert_eq!(active_path(Some(explicit)), explicit);
        assert_eq!(active_path(None), AppConfig::config_path());
    }
}
