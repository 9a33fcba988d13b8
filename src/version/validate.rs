//! Version validation against the release catalog

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::catalog::VersionCatalog;
use crate::version::error::VersionError;

/// Major prefix: `go<N>.<M>` with no leading zeros
static MAJOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^go[1-9][0-9]*\.(?:0|[1-9][0-9]*)").unwrap());

/// Rejects anything that is not a bare, single path segment.
///
/// Runs before the catalog is consulted, so traversal-style input such as
/// `../go1.19` never reaches a lookup.
pub fn check_version_syntax(version: &str) -> Result<(), VersionError> {
    let invalid = || VersionError::InvalidVersion(version.to_string());

    if version.is_empty() || version.contains(['/', '\\']) {
        return Err(invalid());
    }
    match Path::new(version).file_name() {
        Some(name) if name == version => Ok(()),
        _ => Err(invalid()),
    }
}

/// Returns whether the given Go version exists in the catalog.
///
/// The catalog is fetched on first use.
pub async fn valid_version(catalog: &VersionCatalog, version: &str) -> Result<(), VersionError> {
    check_version_syntax(version)?;

    let versions = catalog.load().await?;
    if versions.contains_key(version) {
        Ok(())
    } else {
        Err(VersionError::InvalidVersion(version.to_string()))
    }
}

/// Returns whether the given Go version exists and is marked stable.
pub async fn stable_version(catalog: &VersionCatalog, version: &str) -> Result<bool, VersionError> {
    check_version_syntax(version)?;

    let versions = catalog.load().await?;
    versions
        .get(version)
        .copied()
        .ok_or_else(|| VersionError::InvalidVersion(version.to_string()))
}

/// Extracts the major prefix, e.g. "go1.18" from "go1.18.5".
///
/// Returns an empty string when the version has no recognizable prefix.
pub fn major_version(version: &str) -> &str {
    MAJOR_RE.find(version).map_or("", |m| m.as_str())
}
