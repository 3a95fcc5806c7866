//! Load and validate launcher configuration.
use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::lib::errors::ConfigError;

pub mod debugger;
pub mod debugpy;
pub mod install;
pub mod telemetry;

pub use debugger::{
    parse_debugger_section, DebuggerSection, RawDebuggerSection, DEFAULT_HOST, DEFAULT_PORT,
};
pub use debugpy::{
    parse_debugpy_section, DebugpySection, RawDebugpySection, DEFAULT_ABI_TAGS,
    DEFAULT_DEBUGPY_VERSION, DEFAULT_LEGACY_ABI_TAGS, DEFAULT_LEGACY_DEBUGPY_VERSION,
};
pub use install::{parse_install_section, InstallSection, RawInstallSection};

pub(crate) const CONFIG_ENV_KEY: &str = "DEBUGPY_LAUNCH_CONFIG";
pub(crate) const DEFAULT_CONFIG_PATH: &str = "debugpy-launch.toml";

/// Top-level configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LauncherConfig {
    pub install: InstallSection,
    pub debugger: DebuggerSection,
    pub debugpy: DebugpySection,
    /// File the configuration was read from; `None` when running on defaults.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawLauncherConfig {
    install: Option<RawInstallSection>,
    debugger: Option<RawDebuggerSection>,
    debugpy: Option<RawDebugpySection>,
}

impl LauncherConfig {
    /// Prefer `DEBUGPY_LAUNCH_CONFIG` if set; otherwise read `debugpy-launch.toml` when present.
    pub fn load_from_env_or_default() -> Result<Self, ConfigError> {
        match env::var(CONFIG_ENV_KEY) {
            Ok(value) if !value.trim().is_empty() => {
                let path = PathBuf::from(value);
                telemetry::log_env_source(&path, true);
                Self::load_from_path(path)
            }
            _ => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                telemetry::log_env_source(&path, false);
                if path.is_file() {
                    Self::load_from_path(path)
                } else {
                    telemetry::log_defaults();
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from an explicit path, or fall back to the environment lookup.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_env_or_default(),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        info!(
            target: "debugpy_launch::config",
            path = %path.display(),
            "Starting configuration load"
        );

        let builder = config::Config::builder().add_source(
            config::File::from(path.as_path()).format(config::FileFormat::Toml),
        );
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "debugpy_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawLauncherConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "debugpy_launch::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        let config = Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "debugpy_launch::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })?;

        telemetry::log_loaded(&config);
        Ok(config)
    }

    fn from_raw(raw: RawLauncherConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let install = parse_install_section(raw.install, &path)?;
        let debugger = parse_debugger_section(raw.debugger, &path)?;
        let debugpy = parse_debugpy_section(raw.debugpy, &path)?;

        Ok(Self {
            install,
            debugger,
            debugpy,
            source_path: Some(path),
        })
    }

    /// Render the resolved configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
