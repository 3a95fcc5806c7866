//! Shared path helpers for the install root and the bundled `pythonFiles` tree.

use std::path::{Path, PathBuf};

/// Directory shipped under the install root that holds the debugger bundle.
pub const PYTHON_FILES_DIR: &str = "pythonFiles";

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Join `<root>/pythonFiles/<segments...>`.
pub fn python_files_path(root: &Path, segments: &[&str]) -> PathBuf {
    segments
        .iter()
        .fold(root.join(PYTHON_FILES_DIR), |path, segment| path.join(segment))
}
