//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kamel_runner_core::domain::SettingsOverrides;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kamel-runner",
    bin_name = "kamel-runner",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Assemble and launch `kamel run` for a Maven module",
    long_about = "kamel-runner scans a Maven module and its sibling `generics` module, \
                  turns OpenAPI documents, JSON resources and connector sources into \
                  `kamel run` arguments, adds settings, properties and dependencies, \
                  and runs the result while streaming its output.",
    after_help = "EXAMPLES:\n\
        \x20 kamel-runner run\n\
        \x20 kamel-runner run --module-dir services/orders --trait logging.level=DEBUG\n\
        \x20 kamel-runner dev --configs verbose,wait\n\
        \x20 kamel-runner run --dry-run\n\
        \x20 kamel-runner completions bash > /usr/share/bash-completion/completions/kamel-runner",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble and launch `kamel run`.
    #[command(
        visible_alias = "r",
        about = "Run the module",
        after_help = "EXAMPLES:\n\
            \x20 kamel-runner run\n\
            \x20 kamel-runner run --configs logs,wait --trait container.image=acme/orders:1\n\
            \x20 kamel-runner run --runtime \"kamel run -n staging\""
    )]
    Run(RunArgs),

    /// Same as `run`, with `--dev` appended.
    #[command(
        visible_alias = "d",
        about = "Run the module in dev mode",
        after_help = "EXAMPLES:\n\
            \x20 kamel-runner dev\n\
            \x20 kamel-runner dev --dry-run"
    )]
    Dev(RunArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kamel-runner completions bash > ~/.local/share/bash-completion/completions/kamel-runner\n\
            \x20 kamel-runner completions zsh  > ~/.zfunc/_kamel-runner\n\
            \x20 kamel-runner completions fish > ~/.config/fish/completions/kamel-runner.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kamel-runner config show\n\
            \x20 kamel-runner config path"
    )]
    Config(ConfigCommands),
}

// ── run / dev ─────────────────────────────────────────────────────────────────

/// Arguments shared by `run` and `dev`.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Module to run. Defaults to the current directory.
    #[arg(
        short = 'm',
        long = "module-dir",
        value_name = "DIR",
        help = "Maven module directory (default: current directory)"
    )]
    pub module_dir: Option<PathBuf>,

    /// Extra runtime flags, comma separated. `--` is added when missing.
    #[arg(
        long = "configs",
        value_name = "FLAGS",
        value_delimiter = ',',
        help = "Extra flags, comma separated (e.g. logs,wait)"
    )]
    pub configs: Vec<String>,

    /// Trait overrides; a key given twice keeps the last value.
    #[arg(
        short = 't',
        long = "trait",
        value_name = "KEY=VALUE",
        value_parser = parse_trait,
        help = "Trait override, repeatable"
    )]
    pub traits: Vec<(String, String)>,

    /// Replace the `kamel run` prefix.
    #[arg(long = "runtime", value_name = "CMD", help = "Command prefix (default: kamel run)")]
    pub runtime: Option<String>,

    /// Shell used to run the assembled command.
    #[arg(long = "shell", value_name = "PATH", help = "Shell to launch with (default: /bin/sh)")]
    pub shell: Option<PathBuf>,

    /// Print the command without launching it.
    #[arg(long = "dry-run", help = "Print the command without running it")]
    pub dry_run: bool,
}

impl RunArgs {
    /// Overrides given on the command line.
    pub fn overrides(&self) -> SettingsOverrides {
        let mut overrides = SettingsOverrides::new();
        for flag in &self.configs {
            overrides = overrides.config(flag.clone());
        }
        for (key, value) in &self.traits {
            overrides = overrides.trait_value(key.clone(), value.clone());
        }
        overrides
    }
}

fn parse_trait(input: &str) -> Result<(String, String), String> {
    SettingsOverrides::parse_trait(input).map_err(|e| e.to_string())
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kamel-runner completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kamel-runner config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_run_command() {
        let cli = Cli::parse_from(["kamel-runner", "run"]);
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn configs_split_on_commas() {
        let cli = Cli::parse_from(["kamel-runner", "run", "--configs", "logs,--wait"]);
        let Commands::Run(args) = cli.command else {
            panic!("expected Run command");
        };
        assert_eq!(args.configs, vec!["logs", "--wait"]);
    }

    #[test]
    fn traits_split_on_first_equals() {
        let cli = Cli::parse_from([
            "kamel-runner",
            "dev",
            "--trait",
            "env.vars=A=B",
            "-t",
            "logging.level=DEBUG",
        ]);
        let Commands::Dev(args) = cli.command else {
            panic!("expected Dev command");
        };
        assert_eq!(
            args.traits,
            vec![
                ("env.vars".to_string(), "A=B".to_string()),
                ("logging.level".to_string(), "DEBUG".to_string()),
            ]
        );
    }

    #[test]
    fn trait_without_equals_is_rejected() {
        let result = Cli::try_parse_from(["kamel-runner", "run", "--trait", "novalue"]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_keep_last_trait_value() {
        let args = RunArgs {
            configs: vec!["logs".into()],
            traits: vec![
                ("k".into(), "1".into()),
                ("k".into(), "2".into()),
            ],
            ..RunArgs::default()
        };
        let overrides = args.overrides();
        assert_eq!(overrides.configs, vec!["logs"]);
        assert_eq!(overrides.traits["k"], "2");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["kamel-runner", "--quiet", "--verbose", "run"]);
        assert!(result.is_err());
    }
}
