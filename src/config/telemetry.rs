use tracing::{debug, info};

use super::{LauncherConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_env_source(path: &std::path::Path, from_env: bool) {
    if from_env {
        info!(
            target: "debugpy_launch::config",
            path = %path.display(),
            "Loading configuration using DEBUGPY_LAUNCH_CONFIG environment variable"
        );
    } else {
        debug!(
            target: "debugpy_launch::config",
            path = %path.display(),
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "DEBUGPY_LAUNCH_CONFIG not set; looking for debugpy-launch.toml"
        );
    }
}

pub fn log_defaults() {
    debug!(
        target: "debugpy_launch::config",
        "No configuration file found; using built-in defaults"
    );
}

pub fn log_loaded(config: &LauncherConfig) {
    info!(
        target: "debugpy_launch::config",
        path = ?config.source_path,
        install_root = ?config.install.root,
        host = %config.debugger.host,
        port = config.debugger.port,
        wait_for_client = config.debugger.wait_for_client,
        debugpy_version = %config.debugpy.version,
        legacy_debugpy_version = %config.debugpy.legacy_version,
        "Configuration file loaded successfully"
    );
}
