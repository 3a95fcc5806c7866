//! CLI entrypoint module structure.
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use crate::{
    bundle::{install_plan, DispatchLayout, InstallPlan, PackageIndex},
    config::LauncherConfig,
    launcher::{DebugpyLauncher, RemoteDebugOptions},
};

pub mod args;
pub mod exit;
pub mod profile;

pub use args::{
    ArgsFormat, CliCommand, InstallArgs, LaunchArgs, LauncherArgsArgs, LibDirArgs, ParsedCommand,
    PlanArgs,
};
pub use exit::RunExit;
pub use profile::{resolve_config_path, resolve_install_root, LaunchProfile};

/// Execute a parsed command and return the text to print on stdout.
pub fn execute_cli_command(parsed: ParsedCommand) -> Result<String> {
    let ParsedCommand { profile, command } = parsed;
    let config = LauncherConfig::load(profile.config_path.clone())
        .context("failed to load configuration")?;
    let install_root = resolve_install_root(profile.install_root_override.clone(), &config)?;

    match command {
        CliCommand::Args(args) => render_launcher_args(&install_root, &config, &args),
        CliCommand::Path => Ok(DebugpyLauncher::new(&install_root)
            .package_path()
            .display()
            .to_string()),
        CliCommand::Schema => {
            let schema = schemars::schema_for!(RemoteDebugOptions);
            Ok(serde_json::to_string_pretty(&schema)?)
        }
        CliCommand::LibDir(args) => Ok(DispatchLayout::new(&install_root)
            .library_dir(args.python_version)
            .display()
            .to_string()),
        CliCommand::Plan(args) => {
            let plan = build_plan(&install_root, &config, &args.index)?;
            Ok(serde_json::to_string_pretty(&plan)?)
        }
        CliCommand::Install(args) => install_wheels(&install_root, &config, &args),
        CliCommand::Config => config
            .to_toml()
            .context("failed to render configuration as TOML"),
    }
}

fn render_launcher_args(
    install_root: &Path,
    config: &LauncherConfig,
    args: &LauncherArgsArgs,
) -> Result<String> {
    let options = RemoteDebugOptions::new(
        args.host
            .clone()
            .unwrap_or_else(|| config.debugger.host.clone()),
        args.port.unwrap_or(config.debugger.port),
        args.wait_for_client_or(config.debugger.wait_for_client),
    );
    let launcher = DebugpyLauncher::new(install_root);
    let launcher_args = launcher.launcher_args_with(&options, args.debugger_path.as_deref());

    info!(
        target: "debugpy_launch::cli",
        listen = %options.listen_address(),
        wait_for_client = options.wait_until_debugger_attaches,
        launcher_args = ?launcher_args,
        "Built debug adapter launcher arguments"
    );

    match args.format {
        ArgsFormat::Json => Ok(serde_json::to_string_pretty(&launcher_args)?),
        ArgsFormat::Lines => Ok(launcher_args.join("\n")),
    }
}

fn build_plan(install_root: &Path, config: &LauncherConfig, index: &Path) -> Result<InstallPlan> {
    let index = PackageIndex::load(index)?;
    let layout = DispatchLayout::new(install_root);
    Ok(InstallPlan::build(&index, &layout, &config.debugpy)?)
}

/// Install wheels and format a JSON response payload.
fn install_wheels(
    install_root: &Path,
    config: &LauncherConfig,
    args: &InstallArgs,
) -> Result<String> {
    let plan = build_plan(install_root, config, &args.index)?;
    let installed = install_plan(&plan, &args.wheels).with_context(|| {
        format!(
            "failed to install wheels from {}",
            args.wheels.to_string_lossy()
        )
    })?;

    let payload = json!({
        "status": "installed",
        "install_root": install_root.to_string_lossy(),
        "wheels": plan.wheel_count(),
        "targets": installed,
    });

    Ok(serde_json::to_string_pretty(&payload)?)
}
