//! Release and wheel selection from PyPI JSON metadata.

use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::layout::DispatchLayout;
use crate::{config::DebugpySection, lib::errors::BundleError};

const LATEST: &str = "latest";

/// The subset of the PyPI `/pypi/<package>/json` document used for wheel selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageIndex {
    #[serde(default)]
    pub releases: BTreeMap<String, Vec<ReleaseFile>>,
}

/// One distribution file of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFile {
    pub url: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub digests: Digests,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digests {
    #[serde(default)]
    pub sha256: Option<String>,
}

impl ReleaseFile {
    /// The metadata file name, falling back to the last URL segment.
    pub fn file_name(&self) -> &str {
        match self.filename.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.url.rsplit('/').next().unwrap_or(&self.url),
        }
    }

    pub fn matches_any_abi(&self, abi_tags: &[String]) -> bool {
        abi_tags.iter().any(|tag| self.url.contains(tag.as_str()))
    }
}

impl PackageIndex {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a metadata file saved from PyPI.
    pub fn load(path: &Path) -> Result<Self, BundleError> {
        let json = fs::read_to_string(path).map_err(|source| BundleError::IndexRead {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::from_json(&json).map_err(|source| BundleError::IndexParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            target: "debugpy_launch::bundle",
            path = %path.display(),
            releases = index.releases.len(),
            "Loaded package index"
        );
        Ok(index)
    }
}

/// Which release to install: a pinned version or the highest listed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    Latest,
    Exact(String),
}

impl From<&str> for VersionRequest {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(LATEST) {
            Self::Latest
        } else {
            Self::Exact(value.to_string())
        }
    }
}

impl FromStr for VersionRequest {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(value))
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequest::Latest => f.write_str(LATEST),
            VersionRequest::Exact(version) => f.write_str(version),
        }
    }
}

/// Release stage of a version, in PEP 440 order.
///
/// `DevOnly` is a bare development release such as `1.0.dev1`, which sorts
/// below every pre-release of `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    DevOnly,
    Alpha(u64),
    Beta(u64),
    Candidate(u64),
    Final,
}

/// Development marker; a release without one sorts above any `.devN` of itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Dev {
    Snapshot(u64),
    Released,
}

/// Orderable release number following PEP 440 precedence.
///
/// `1.6` and `1.6.0` compare equal. For one release number the order is
/// `.devN` < `aN` < `bN` < `rcN` < final < `.postN`, with `N` compared
/// numerically. Local labels (`+...`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion {
    release: Vec<u64>,
    stage: Stage,
    post: Option<u64>,
    dev: Dev,
}

impl ReleaseVersion {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().trim_start_matches(['v', 'V']);
        let value = value.split('+').next().unwrap_or(value);
        let split = value
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(value.len());
        let (numeric, suffix) = value.split_at(split);

        let mut release = numeric
            .trim_end_matches('.')
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        while release.len() > 1 && release.last() == Some(&0) {
            release.pop();
        }

        let (pre, post, dev) = parse_suffix(&suffix.to_ascii_lowercase())?;
        let stage = match (pre, post, dev) {
            (Some(stage), _, _) => stage,
            (None, None, Some(_)) => Stage::DevOnly,
            (None, _, _) => Stage::Final,
        };
        Some(Self {
            release,
            stage,
            post,
            dev: dev.map_or(Dev::Released, Dev::Snapshot),
        })
    }
}

type Suffix = (Option<Stage>, Option<u64>, Option<u64>);

/// Split `[pre][post][dev]` segments such as `rc1`, `.post2`, `.dev0`.
fn parse_suffix(suffix: &str) -> Option<Suffix> {
    let (mut pre, mut post, mut dev) = (None, None, None);
    let mut rest = suffix;
    loop {
        rest = rest.trim_start_matches(['.', '-', '_']);
        if rest.is_empty() {
            return Some((pre, post, dev));
        }

        let label_end = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let (label, tail) = rest.split_at(label_end);
        let digits_end = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        let number = match &tail[..digits_end] {
            "" => 0,
            digits => digits.parse::<u64>().ok()?,
        };
        rest = &tail[digits_end..];

        let ordered = pre.is_none() && post.is_none() && dev.is_none();
        match label {
            "a" | "alpha" if ordered => pre = Some(Stage::Alpha(number)),
            "b" | "beta" if ordered => pre = Some(Stage::Beta(number)),
            "rc" | "c" | "pre" | "preview" if ordered => pre = Some(Stage::Candidate(number)),
            "post" | "rev" | "r" if post.is_none() && dev.is_none() => post = Some(number),
            "dev" if dev.is_none() => dev = Some(number),
            _ => return None,
        }
    }
}

/// Resolve `request` to a release key present in `index`.
pub fn resolve_version(
    index: &PackageIndex,
    request: &VersionRequest,
) -> Result<String, BundleError> {
    match request {
        VersionRequest::Exact(version) => {
            if index.releases.contains_key(version) {
                Ok(version.clone())
            } else {
                Err(BundleError::ReleaseNotFound {
                    version: version.clone(),
                })
            }
        }
        VersionRequest::Latest => index
            .releases
            .keys()
            .filter_map(|key| ReleaseVersion::parse(key).map(|parsed| (parsed, key)))
            .max_by(|(left, _), (right, _)| left.cmp(right))
            .map(|(_, key)| key.clone())
            .ok_or(BundleError::NoReleases),
    }
}

/// Files of `version` whose URL mentions one of `abi_tags`, in metadata order.
pub fn select_wheels(
    index: &PackageIndex,
    version: &str,
    abi_tags: &[String],
) -> Result<Vec<ReleaseFile>, BundleError> {
    let files = index
        .releases
        .get(version)
        .ok_or_else(|| BundleError::ReleaseNotFound {
            version: version.to_string(),
        })?;

    let wheels: Vec<ReleaseFile> = files
        .iter()
        .filter(|file| file.matches_any_abi(abi_tags))
        .cloned()
        .collect();

    if wheels.is_empty() {
        return Err(BundleError::NoMatchingWheels {
            version: version.to_string(),
            abi_tags: abi_tags.to_vec(),
        });
    }
    Ok(wheels)
}

/// Wheels to extract into one library directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallTarget {
    pub destination: PathBuf,
    pub version: String,
    pub wheels: Vec<ReleaseFile>,
}

/// Current and legacy install targets of the bundled debugger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub targets: Vec<InstallTarget>,
}

impl InstallPlan {
    pub fn build(
        index: &PackageIndex,
        layout: &DispatchLayout,
        debugpy: &DebugpySection,
    ) -> Result<Self, BundleError> {
        let current = plan_target(
            index,
            layout.current_lib_dir(),
            &debugpy.version,
            &debugpy.abi_tags,
        )?;
        let legacy = plan_target(
            index,
            layout.legacy_lib_dir(),
            &debugpy.legacy_version,
            &debugpy.legacy_abi_tags,
        )?;
        Ok(Self {
            targets: vec![current, legacy],
        })
    }

    pub fn wheel_count(&self) -> usize {
        self.targets.iter().map(|target| target.wheels.len()).sum()
    }
}

fn plan_target(
    index: &PackageIndex,
    destination: PathBuf,
    request: &VersionRequest,
    abi_tags: &[String],
) -> Result<InstallTarget, BundleError> {
    let version = resolve_version(index, request)?;
    let wheels = select_wheels(index, &version, abi_tags)?;
    info!(
        target: "debugpy_launch::bundle",
        destination = %destination.display(),
        requested = %request,
        version = %version,
        wheels = wheels.len(),
        "Planned debugpy install target"
    );
    Ok(InstallTarget {
        destination,
        version,
        wheels,
    })
}
