use std::{fmt, path::PathBuf, str::FromStr};

use crate::lib::paths::python_files_path;

pub const CURRENT_LIB_DIR: &str = "python";
pub const LEGACY_LIB_DIR: &str = "python36";

/// Interpreters older than this load debugpy from the legacy library directory.
const LEGACY_CUTOFF: PythonVersion = PythonVersion { major: 3, minor: 7 };

/// `major.minor` of a Python interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PythonVersion {
    pub major: u32,
    pub minor: u32,
}

impl PythonVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub fn is_legacy(&self) -> bool {
        *self < LEGACY_CUTOFF
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = String;

    /// Accepts `3`, `3.10` or `3.10.4`; anything after the minor component is ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts = value.trim().split('.');
        let major = parts
            .next()
            .filter(|part| !part.is_empty())
            .ok_or_else(|| format!("invalid Python version `{value}`"))?
            .parse::<u32>()
            .map_err(|_| format!("invalid Python major version in `{value}`"))?;
        let minor = match parts.next() {
            Some(part) => part
                .parse::<u32>()
                .map_err(|_| format!("invalid Python minor version in `{value}`"))?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

/// Directory layout of the bundled debugger under an install root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchLayout {
    root: PathBuf,
}

impl DispatchLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/pythonFiles/lib/python`
    pub fn current_lib_dir(&self) -> PathBuf {
        python_files_path(&self.root, &["lib", CURRENT_LIB_DIR])
    }

    /// `<root>/pythonFiles/lib/python36`
    pub fn legacy_lib_dir(&self) -> PathBuf {
        python_files_path(&self.root, &["lib", LEGACY_LIB_DIR])
    }

    /// Library directory the adapter dispatcher puts on `sys.path` for `version`.
    pub fn library_dir(&self, version: PythonVersion) -> PathBuf {
        if version.is_legacy() {
            self.legacy_lib_dir()
        } else {
            self.current_lib_dir()
        }
    }
}
