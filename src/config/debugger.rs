use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{launcher::RemoteDebugOptions, lib::errors::ConfigError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5678;

/// Default listen settings for the remote adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebuggerSection {
    pub host: String,
    pub port: u16,
    pub wait_for_client: bool,
}

impl Default for DebuggerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            wait_for_client: false,
        }
    }
}

impl DebuggerSection {
    pub fn to_options(&self) -> RemoteDebugOptions {
        RemoteDebugOptions::new(self.host.clone(), self.port, self.wait_for_client)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawDebuggerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub wait_for_client: Option<bool>,
}

pub fn parse_debugger_section(
    raw: Option<RawDebuggerSection>,
    path: &Path,
) -> Result<DebuggerSection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let host = raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    if host.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field: "debugger.host",
            message: "host must not be empty".into(),
        });
    }
    Ok(DebuggerSection {
        host,
        port: raw.port.unwrap_or(DEFAULT_PORT),
        wait_for_client: raw.wait_for_client.unwrap_or(false),
    })
}
