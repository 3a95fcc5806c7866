use std::{io, path::PathBuf};

use config::ConfigError as ConfigLoaderError;
use thiserror::Error;
use zip::result::ZipError;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised while selecting or installing debugpy wheels.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The saved PyPI metadata file could not be read.
    #[error("Failed to read package index {path}: {source}")]
    IndexRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The metadata file is not valid PyPI JSON.
    #[error("Failed to parse package index {path}: {source}")]
    IndexParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// `latest` was requested but no release key parses as a version.
    #[error("Package index has no releases")]
    NoReleases,
    /// A pinned release is absent from the metadata.
    #[error("Release `{version}` is not listed in the package index")]
    ReleaseNotFound { version: String },
    /// None of the release files carries a requested ABI tag.
    #[error("Release `{version}` has no wheels matching ABI tags {abi_tags:?}")]
    NoMatchingWheels {
        version: String,
        abi_tags: Vec<String>,
    },
    /// Wheel contents do not hash to the metadata digest.
    #[error("Wheel {filename} has sha256 {actual}, expected {expected}")]
    DigestMismatch {
        filename: String,
        expected: String,
        actual: String,
    },
    /// An archive entry would be written outside the destination.
    #[error("Wheel entry `{entry}` escapes the destination directory")]
    UnsafeEntry { entry: String },
    /// A metadata file name is not a bare file name inside the wheels directory.
    #[error("Wheel file name `{filename}` must not contain path components")]
    UnsafeWheelName { filename: String },
    /// The wheel is not a readable zip archive.
    #[error("Failed to read wheel archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    /// Filesystem access failed.
    #[error("I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BundleError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
