//! Ordering of releases that share a major prefix

use std::cmp::Ordering;

use crate::version::source::VersionMap;

/// Release maturity, ordered so that `Stable` is the greatest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseKind {
    Beta,
    ReleaseCandidate,
    Stable,
}

impl ReleaseKind {
    /// Classifies the suffix left after stripping the major prefix.
    ///
    /// An empty or patch suffix (".5") is stable, "rc2" is a release
    /// candidate and "beta1" a beta. Anything unrecognized counts as stable.
    pub fn classify(suffix: &str) -> Self {
        if suffix.starts_with("beta") {
            ReleaseKind::Beta
        } else if suffix.starts_with("rc") {
            ReleaseKind::ReleaseCandidate
        } else {
            ReleaseKind::Stable
        }
    }

    /// Classifies `version` relative to its major prefix
    pub fn of(major: &str, version: &str) -> Self {
        Self::classify(version.strip_prefix(major).unwrap_or(version))
    }
}

/// Orders two versions of the same major prefix, latest first.
///
/// Release kind decides first. Within a kind the longer string wins, then
/// the lexically greater one. This is a length heuristic, not numeric
/// comparison: "go1.15.10" beats "go1.15.9" because it is longer.
pub fn compare_latest(major: &str, a: &str, b: &str) -> Ordering {
    ReleaseKind::of(major, b)
        .cmp(&ReleaseKind::of(major, a))
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| b.cmp(a))
}

/// Lists catalog versions starting with `major`, latest first.
///
/// Expects a loaded catalog; an empty map simply yields no candidates.
pub fn find_candidates(versions: &VersionMap, major: &str) -> Vec<String> {
    let mut candidates: Vec<String> = versions
        .keys()
        .filter(|v| v.starts_with(major))
        .cloned()
        .collect();
    candidates.sort_by(|a, b| compare_latest(major, a, b));
    candidates
}
