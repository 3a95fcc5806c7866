//! LaunchProfile and config/install-root resolution.
use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::LauncherConfig;

const INSTALL_ROOT_ENV: &str = "DEBUGPY_LAUNCH_ROOT";

/// Resolved global options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchProfile {
    /// Explicit config file; `None` defers to the environment and default lookup.
    pub config_path: Option<PathBuf>,
    pub install_root_override: Option<PathBuf>,
}

/// Make a CLI config override absolute.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    override_path.map(absolutize).transpose()
}

/// Resolve the install root in the order: CLI override → config → env var → current directory.
pub fn resolve_install_root(
    override_root: Option<PathBuf>,
    config: &LauncherConfig,
) -> Result<PathBuf> {
    let root = override_root
        .or_else(|| config.install.root.clone())
        .or_else(|| env::var_os(INSTALL_ROOT_ENV).map(PathBuf::from))
        .filter(|path| !path.as_os_str().is_empty());

    match root {
        Some(root) => absolutize(root),
        None => env::current_dir().context("failed to obtain current directory"),
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = env::current_dir().context("failed to obtain current directory")?;
    Ok(cwd.join(path))
}
