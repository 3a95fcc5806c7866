//! The debugpy bundle shipped under `pythonFiles`: library layout, wheel selection and installation.
pub mod extract;
pub mod layout;
pub mod release;

pub use extract::{extract_wheel, install_plan, sha256_hex, verify_digest, InstalledTarget};
pub use layout::{DispatchLayout, PythonVersion, CURRENT_LIB_DIR, LEGACY_LIB_DIR};
pub use release::{
    resolve_version, select_wheels, InstallPlan, InstallTarget, PackageIndex, ReleaseFile,
    ReleaseVersion, VersionRequest,
};
