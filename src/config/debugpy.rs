use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::{bundle::VersionRequest, lib::errors::ConfigError};

pub const DEFAULT_DEBUGPY_VERSION: &str = "1.6.7";
pub const DEFAULT_ABI_TAGS: &[&str] = &["cp310"];
/// Last debugpy release that supports Python 3.6 and below.
pub const DEFAULT_LEGACY_DEBUGPY_VERSION: &str = "1.5.1";
pub const DEFAULT_LEGACY_ABI_TAGS: &[&str] = &["cp39"];

/// Which debugpy releases and wheels make up the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugpySection {
    #[serde(serialize_with = "serialize_request")]
    pub version: VersionRequest,
    pub abi_tags: Vec<String>,
    #[serde(serialize_with = "serialize_request")]
    pub legacy_version: VersionRequest,
    pub legacy_abi_tags: Vec<String>,
}

impl Default for DebugpySection {
    fn default() -> Self {
        Self {
            version: VersionRequest::Exact(DEFAULT_DEBUGPY_VERSION.to_string()),
            abi_tags: to_owned(DEFAULT_ABI_TAGS),
            legacy_version: VersionRequest::Exact(DEFAULT_LEGACY_DEBUGPY_VERSION.to_string()),
            legacy_abi_tags: to_owned(DEFAULT_LEGACY_ABI_TAGS),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawDebugpySection {
    pub version: Option<String>,
    pub abi_tags: Option<Vec<String>>,
    pub legacy_version: Option<String>,
    pub legacy_abi_tags: Option<Vec<String>>,
}

pub fn parse_debugpy_section(
    raw: Option<RawDebugpySection>,
    path: &Path,
) -> Result<DebugpySection, ConfigError> {
    let raw = raw.unwrap_or_default();
    let defaults = DebugpySection::default();

    let version = parse_version(raw.version, defaults.version, "debugpy.version", path)?;
    let legacy_version = parse_version(
        raw.legacy_version,
        defaults.legacy_version,
        "debugpy.legacy_version",
        path,
    )?;
    let abi_tags = parse_abi_tags(raw.abi_tags, defaults.abi_tags, "debugpy.abi_tags", path)?;
    let legacy_abi_tags = parse_abi_tags(
        raw.legacy_abi_tags,
        defaults.legacy_abi_tags,
        "debugpy.legacy_abi_tags",
        path,
    )?;

    Ok(DebugpySection {
        version,
        abi_tags,
        legacy_version,
        legacy_abi_tags,
    })
}

fn parse_version(
    raw: Option<String>,
    default: VersionRequest,
    field: &'static str,
    path: &Path,
) -> Result<VersionRequest, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: "version must be `latest` or a release number".into(),
        });
    }
    Ok(VersionRequest::from(value.as_str()))
}

fn parse_abi_tags(
    raw: Option<Vec<String>>,
    default: Vec<String>,
    field: &'static str,
    path: &Path,
) -> Result<Vec<String>, ConfigError> {
    let Some(tags) = raw else {
        return Ok(default);
    };
    let tags: Vec<String> = tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(ConfigError::InvalidField {
            path: path.to_path_buf(),
            field,
            message: "list at least one ABI tag such as `cp310`".into(),
        });
    }
    Ok(tags)
}

fn serialize_request<S: Serializer>(
    request: &VersionRequest,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(request)
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
