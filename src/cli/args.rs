//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use super::{resolve_config_path, LaunchProfile};
use crate::bundle::PythonVersion;

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub profile: LaunchProfile,
    pub command: CliCommand,
}

/// Top-level CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the arguments that start the debug adapter in listen mode.
    Args(LauncherArgsArgs),
    /// Print the filesystem path of the debug adapter package.
    Path,
    /// Print the JSON schema of the remote debug options record.
    Schema,
    /// Print the debugpy library directory used for a Python version.
    LibDir(LibDirArgs),
    /// Print the wheel install plan computed from saved PyPI metadata.
    Plan(PlanArgs),
    /// Install already-downloaded wheels into the bundled library directories.
    #[command(
        after_help = "Hint: run `debugpy-launch plan --index <FILE>` first to see which wheel files are expected in --wheels."
    )]
    Install(InstallArgs),
    /// Print the resolved configuration as TOML.
    Config,
}

/// Output format for `args`.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ArgsFormat {
    /// JSON array of strings.
    #[default]
    Json,
    /// One argument per line.
    Lines,
}

/// Arguments for `args`.
#[derive(Debug, Clone, Args)]
pub struct LauncherArgsArgs {
    /// Host the adapter listens on (defaults to `[debugger].host`).
    #[arg(long)]
    pub host: Option<String>,
    /// Port the adapter listens on (defaults to `[debugger].port`).
    #[arg(long)]
    pub port: Option<u16>,
    /// Block until a debugger client attaches.
    #[arg(long, conflicts_with = "no_wait_for_client")]
    pub wait_for_client: bool,
    /// Do not wait for a client even if the configuration says so.
    #[arg(long)]
    pub no_wait_for_client: bool,
    /// Use this adapter path instead of the bundled one.
    #[arg(long)]
    pub debugger_path: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ArgsFormat::Json)]
    pub format: ArgsFormat,
}

impl LauncherArgsArgs {
    /// Resolve the wait flag against the configured default.
    pub fn wait_for_client_or(&self, default: bool) -> bool {
        if self.wait_for_client {
            true
        } else if self.no_wait_for_client {
            false
        } else {
            default
        }
    }
}

/// Arguments for `lib-dir`.
#[derive(Debug, Clone, Args)]
pub struct LibDirArgs {
    /// Interpreter version such as `3.6` or `3.11.4`.
    #[arg(long)]
    pub python_version: PythonVersion,
}

/// Arguments for `plan`.
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// PyPI JSON metadata for debugpy (saved from https://pypi.org/pypi/debugpy/json).
    #[arg(long)]
    pub index: PathBuf,
}

/// Arguments for `install`.
#[derive(Debug, Clone, Args)]
pub struct InstallArgs {
    /// PyPI JSON metadata for debugpy.
    #[arg(long)]
    pub index: PathBuf,
    /// Directory containing the wheel files named in the plan.
    #[arg(long)]
    pub wheels: PathBuf,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "debugpy-launch",
    author,
    version,
    about = "Build launcher arguments for the bundled debugpy adapter",
    long_about = None
)]
pub struct LaunchArgs {
    /// Path to the configuration file (overrides DEBUGPY_LAUNCH_CONFIG).
    #[arg(long = "config", global = true)]
    pub config_override: Option<PathBuf>,
    /// Install root containing `pythonFiles` (overrides `[install].root`).
    #[arg(long = "install-root", global = true)]
    pub install_root_override: Option<PathBuf>,
    #[command(subcommand)]
    pub command: CliCommand,
}

impl LaunchArgs {
    /// Build a `LaunchProfile` from the global flags.
    pub fn build_profile(&self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override.clone())?;
        Ok(LaunchProfile {
            config_path,
            install_root_override: self.install_root_override.clone(),
        })
    }

    /// Split CLI args into the launch profile and the command to run.
    pub fn into_command(self) -> Result<ParsedCommand> {
        validate_command(&self.command)?;
        let profile = self.build_profile()?;
        Ok(ParsedCommand {
            profile,
            command: self.command,
        })
    }
}

fn validate_command(command: &CliCommand) -> Result<()> {
    if let CliCommand::Args(args) = command {
        if matches!(args.debugger_path.as_deref(), Some(path) if path.trim().is_empty()) {
            return Err(anyhow!("invalid --debugger-path: must not be empty"));
        }
    }
    Ok(())
}
