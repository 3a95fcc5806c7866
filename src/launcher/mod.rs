//! Launcher arguments for the bundled debugpy adapter.
//!
//! The adapter lives at `<install root>/pythonFiles/dispatch_debugpy`. A
//! [`DebugpyLauncher`] resolves that path once from the install root it is
//! constructed with and turns [`RemoteDebugOptions`] into the ordered argument
//! list that starts the adapter in listen mode.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lib::{paths::python_files_path, quoting::file_to_command_argument};

/// Adapter entry point directory under `pythonFiles`.
pub const DISPATCH_DIR: &str = "dispatch_debugpy";
pub const LISTEN_FLAG: &str = "--listen";
pub const WAIT_FOR_CLIENT_FLAG: &str = "--wait-for-client";

/// Where the remote adapter should listen and whether it blocks until a client attaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDebugOptions {
    /// Host or address the adapter listens on. Passed through unchecked.
    pub host: String,
    /// TCP port the adapter listens on.
    pub port: u16,
    /// Block the debuggee until a client connects.
    pub wait_until_debugger_attaches: bool,
}

impl RemoteDebugOptions {
    pub fn new(host: impl Into<String>, port: u16, wait_until_debugger_attaches: bool) -> Self {
        Self {
            host: host.into(),
            port,
            wait_until_debugger_attaches,
        }
    }

    /// `<host>:<port>` as handed to `--listen`.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builds adapter launch arguments against a fixed adapter path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugpyLauncher {
    package_path: PathBuf,
}

impl DebugpyLauncher {
    /// Resolve the adapter path under `install_root`.
    pub fn new(install_root: impl AsRef<Path>) -> Self {
        Self {
            package_path: python_files_path(install_root.as_ref(), &[DISPATCH_DIR]),
        }
    }

    /// Filesystem path of the adapter package. Not checked for existence.
    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Launcher arguments using this launcher's adapter path.
    pub fn launcher_args(&self, options: &RemoteDebugOptions) -> Vec<String> {
        build_launcher_args(options, &self.package_path.to_string_lossy())
    }

    /// Launcher arguments, optionally overriding the adapter path.
    pub fn launcher_args_with(
        &self,
        options: &RemoteDebugOptions,
        debugger_path: Option<&str>,
    ) -> Vec<String> {
        match debugger_path {
            Some(path) => build_launcher_args(options, path),
            None => self.launcher_args(options),
        }
    }
}

/// `[<quoted path>, --listen, <host>:<port>]`, followed by `--wait-for-client`
/// when the options ask the adapter to wait.
pub fn build_launcher_args(options: &RemoteDebugOptions, debugger_path: &str) -> Vec<String> {
    let mut args = vec![
        file_to_command_argument(debugger_path),
        LISTEN_FLAG.to_string(),
        options.listen_address(),
    ];
    if options.wait_until_debugger_attaches {
        args.push(WAIT_FOR_CLIENT_FLAG.to_string());
    }
    args
}
