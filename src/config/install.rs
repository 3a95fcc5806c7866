use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lib::{errors::ConfigError, paths::is_nonempty_absolute};

/// Where the extension (and its `pythonFiles` tree) is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawInstallSection {
    pub root: Option<PathBuf>,
}

pub fn parse_install_section(
    raw: Option<RawInstallSection>,
    path: &Path,
) -> Result<InstallSection, ConfigError> {
    let root = raw.unwrap_or_default().root;
    if let Some(root) = &root {
        if !is_nonempty_absolute(root) {
            return Err(ConfigError::InvalidField {
                path: path.to_path_buf(),
                field: "install.root",
                message: format!("{} must be an absolute path", root.display()),
            });
        }
    }
    Ok(InstallSection { root })
}
