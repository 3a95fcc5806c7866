//! Wheel digest verification and extraction into the bundled library directories.

use std::{
    fs::{self, File},
    io::{self, Cursor, Read, Seek},
    path::{Path, PathBuf},
};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use zip::ZipArchive;

use super::release::{InstallPlan, ReleaseFile};
use crate::lib::{errors::BundleError, telemetry::InstallSpan};

/// Entries under this marker are skipped; several wheels are merged into one directory.
const DIST_INFO_MARKER: &str = ".dist-info/";

/// Files extracted for one install target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledTarget {
    pub destination: PathBuf,
    pub version: String,
    pub wheels: Vec<String>,
    pub files: Vec<PathBuf>,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Compare `bytes` against the metadata digest, if the metadata has one.
pub fn verify_digest(file: &ReleaseFile, bytes: &[u8]) -> Result<(), BundleError> {
    let Some(expected) = file.digests.sha256.as_deref() else {
        warn!(
            target: "debugpy_launch::bundle",
            wheel = file.file_name(),
            "Package index has no sha256 for wheel; skipping verification"
        );
        return Ok(());
    };

    let actual = sha256_hex(bytes);
    if actual.eq_ignore_ascii_case(expected) {
        return Ok(());
    }
    Err(BundleError::DigestMismatch {
        filename: file.file_name().to_string(),
        expected: expected.to_string(),
        actual,
    })
}

/// Extract `archive` into `destination`, skipping `.dist-info/` entries.
///
/// Returns the extracted file paths relative to `destination`.
pub fn extract_wheel<R: Read + Seek>(
    archive: R,
    archive_path: &Path,
    destination: &Path,
) -> Result<Vec<PathBuf>, BundleError> {
    let mut archive = ZipArchive::new(archive).map_err(|source| BundleError::Archive {
        path: archive_path.to_path_buf(),
        source,
    })?;

    let mut extracted = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|source| BundleError::Archive {
            path: archive_path.to_path_buf(),
            source,
        })?;
        if entry.name().contains(DIST_INFO_MARKER) {
            continue;
        }
        let relative = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| BundleError::UnsafeEntry {
                entry: entry.name().to_string(),
            })?;
        let target = destination.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|source| BundleError::io(&target, source))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| BundleError::io(parent, source))?;
        }
        let mut output =
            File::create(&target).map_err(|source| BundleError::io(&target, source))?;
        io::copy(&mut entry, &mut output).map_err(|source| BundleError::io(&target, source))?;
        debug!(
            target: "debugpy_launch::bundle",
            entry = %relative.display(),
            "Extracted wheel entry"
        );
        extracted.push(relative);
    }
    Ok(extracted)
}

/// A wheel read from disk whose digest has been checked.
struct VerifiedWheel<'a> {
    name: &'a str,
    path: PathBuf,
    bytes: Vec<u8>,
}

/// Resolve a metadata file name inside `wheels_dir`, refusing anything that is not a bare name.
fn wheel_path(wheels_dir: &Path, file_name: &str) -> Result<PathBuf, BundleError> {
    let bare = !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.contains(['/', '\\']);
    if !bare {
        return Err(BundleError::UnsafeWheelName {
            filename: file_name.to_string(),
        });
    }
    Ok(wheels_dir.join(file_name))
}

fn read_verified<'a>(
    wheels_dir: &Path,
    wheel: &'a ReleaseFile,
) -> Result<VerifiedWheel<'a>, BundleError> {
    let path = wheel_path(wheels_dir, wheel.file_name())?;
    let bytes = fs::read(&path).map_err(|source| BundleError::io(&path, source))?;
    verify_digest(wheel, &bytes)?;
    ZipArchive::new(Cursor::new(bytes.as_slice())).map_err(|source| BundleError::Archive {
        path: path.clone(),
        source,
    })?;
    Ok(VerifiedWheel {
        name: wheel.file_name(),
        path,
        bytes,
    })
}

/// Install every wheel in `plan` from files already present in `wheels_dir`.
///
/// Every wheel of every target is read and verified before anything is
/// extracted, so a bad wheel leaves the library directories untouched.
pub fn install_plan(
    plan: &InstallPlan,
    wheels_dir: &Path,
) -> Result<Vec<InstalledTarget>, BundleError> {
    let verified = plan
        .targets
        .iter()
        .map(|target| {
            target
                .wheels
                .iter()
                .map(|wheel| read_verified(wheels_dir, wheel))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut installed = Vec::with_capacity(plan.targets.len());
    for (target, wheels) in plan.targets.iter().zip(verified) {
        let span = InstallSpan::start(&target.destination, &target.version);
        let mut files = Vec::new();
        let mut names = Vec::with_capacity(wheels.len());
        for wheel in wheels {
            files.extend(extract_wheel(
                Cursor::new(wheel.bytes),
                &wheel.path,
                &target.destination,
            )?);
            names.push(wheel.name.to_string());
        }
        span.finish(names.len(), files.len());
        installed.push(InstalledTarget {
            destination: target.destination.clone(),
            version: target.version.clone(),
            wheels: names,
            files,
        });
    }
    Ok(installed)
}
