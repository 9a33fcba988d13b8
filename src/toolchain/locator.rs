//! Locating a local go executable for a requested version

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join;
use tracing::{debug, info};

use crate::config::{DEFAULT_COMMAND, ResolverConfig};
use crate::toolchain::cache::CommandVersionCache;
use crate::toolchain::command::{CommandRunner, SystemCommandRunner};
use crate::toolchain::error::{CommandError, LookupError};
use crate::version::catalog::VersionCatalog;
use crate::version::candidates::find_candidates;
use crate::version::source::CatalogSource;
use crate::version::sources::{GoDevSource, SnapshotSource};
use crate::version::validate::{major_version, valid_version};

/// `go env` key holding the toolchain version
const GOVERSION: &str = "GOVERSION";

/// Finds go executables whose reported version matches a target
pub struct Locator {
    catalog: Arc<VersionCatalog>,
    runner: Arc<dyn CommandRunner>,
    cache: CommandVersionCache,
    default_command: String,
}

impl Locator {
    pub fn new(catalog: Arc<VersionCatalog>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            catalog,
            runner,
            cache: CommandVersionCache::new(),
            default_command: DEFAULT_COMMAND.to_string(),
        }
    }

    /// Builds a locator over the real environment as described by `config`
    pub fn from_config(config: &ResolverConfig) -> Self {
        let source: Arc<dyn CatalogSource> = if config.offline {
            Arc::new(SnapshotSource)
        } else {
            Arc::new(GoDevSource::with_timeout(
                &config.catalog_url,
                Duration::from_millis(config.fetch_timeout_ms),
            ))
        };
        let runner = match &config.search_path {
            Some(path) => SystemCommandRunner::with_search_path(path),
            None => SystemCommandRunner::new(),
        };

        Self::new(Arc::new(VersionCatalog::new(source)), Arc::new(runner))
            .with_default_command(&config.default_command)
    }

    pub fn with_default_command(mut self, command: impl Into<String>) -> Self {
        self.default_command = command.into();
        self
    }

    pub fn catalog(&self) -> &VersionCatalog {
        &self.catalog
    }

    pub fn runner(&self) -> &Arc<dyn CommandRunner> {
        &self.runner
    }

    pub fn default_command(&self) -> &str {
        &self.default_command
    }

    pub(crate) fn is_default_command(&self, command: &Path) -> bool {
        command == Path::new(&self.default_command)
    }

    /// Version reported by `command`, queried once per locator
    pub async fn command_version(&self, command: &str) -> Result<String, CommandError> {
        if let Some(version) = self.cache.get(command) {
            debug!("Using cached version {} for {}", version, command);
            return Ok(version);
        }

        let version = self.runner.go_env(command, GOVERSION).await?;
        debug!("{} reports {}", command, version);
        Ok(self.cache.insert(command, version))
    }

    /// Version reported by the default command
    pub async fn current_version(&self) -> Result<String, CommandError> {
        self.command_version(&self.default_command).await
    }

    async fn check_command_version(&self, command: &str, version: &str) -> Result<(), CommandError> {
        let got = self.command_version(command).await?;
        if got != version {
            return Err(CommandError::UnexpectedVersion {
                command: command.to_string(),
                expected: version.to_string(),
                got,
            });
        }
        Ok(())
    }

    async fn probe_named(&self, version: &str) -> Result<PathBuf, CommandError> {
        let full = self.runner.look_path(version)?;
        self.check_command_version(&full.to_string_lossy(), version)
            .await?;
        Ok(full)
    }

    /// Finds a go executable reporting exactly `version`.
    ///
    /// The default command and an executable named `version` are probed
    /// concurrently and both probes always finish. The default command wins
    /// when both match. Fails with [`LookupError::NotFound`] only when the
    /// named executable does not exist; other probe failures are returned
    /// as they are.
    pub async fn lookup(&self, version: &str) -> Result<PathBuf, LookupError> {
        valid_version(&self.catalog, version).await?;

        let (default_probe, named_probe) = join(
            self.check_command_version(&self.default_command, version),
            self.probe_named(version),
        )
        .await;

        match (default_probe, named_probe) {
            (Ok(()), _) => Ok(PathBuf::from(&self.default_command)),
            (Err(_), Ok(full)) => Ok(full),
            (Err(_), Err(CommandError::NotFound(_))) => {
                Err(LookupError::NotFound(version.to_string()))
            }
            (Err(_), Err(e)) => Err(e.into()),
        }
    }

    /// Finds the latest go executable sharing the major prefix of `version`.
    ///
    /// The default command is returned as soon as its version has the same
    /// major prefix. Otherwise candidates are probed latest first and the
    /// first executable reporting its own name is returned.
    pub async fn lookup_latest(&self, version: &str) -> Result<PathBuf, LookupError> {
        valid_version(&self.catalog, version).await?;

        let major = major_version(version);
        let current = self.current_version().await?;
        if current.starts_with(major) {
            debug!("Default command {} satisfies {}", current, major);
            return Ok(PathBuf::from(&self.default_command));
        }

        let versions = self.catalog.versions().await;
        for candidate in find_candidates(&versions, major) {
            let Ok(full) = self.runner.look_path(&candidate) else {
                continue;
            };
            match self
                .check_command_version(&full.to_string_lossy(), &candidate)
                .await
            {
                Ok(()) => {
                    info!("Selected {} for {}", full.display(), version);
                    return Ok(full);
                }
                Err(e) => debug!("Skipping {}: {}", candidate, e),
            }
        }

        Err(LookupError::NotFound(version.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolchain::test_utils::{FakeRunner, snapshot_locator};

    #[tokio::test]
    async fn lookup_prefers_default_command_when_it_matches() {
        let runner = FakeRunner::new("go1.19.5").with_executable("go1.19.5", "go1.19.5");
        let locator = snapshot_locator(runner);

        let path = locator.lookup("go1.19.5").await.unwrap();

        assert_eq!(path, PathBuf::from("go"));
    }

    #[tokio::test]
    async fn lookup_returns_named_executable_path() {
        let runner = FakeRunner::new("go1.19.5").with_executable("go1.18.5", "go1.18.5");
        let locator = snapshot_locator(runner);

        let path = locator.lookup("go1.18.5").await.unwrap();

        assert_eq!(path, PathBuf::from("/sdk/bin/go1.18.5"));
    }

    #[tokio::test]
    async fn lookup_returns_not_found_when_named_executable_is_missing() {
        let locator = snapshot_locator(FakeRunner::new("go1.19.5"));

        let result = locator.lookup("go1.19rc2").await;

        assert!(matches!(result, Err(LookupError::NotFound(v)) if v == "go1.19rc2"));
    }

    #[tokio::test]
    async fn lookup_propagates_version_mismatch_of_named_executable() {
        let runner = FakeRunner::new("go1.19.5").with_executable("go1.18.5", "go1.18.4");
        let locator = snapshot_locator(runner);

        let result = locator.lookup("go1.18.5").await;

        assert!(matches!(
            result,
            Err(LookupError::Command(CommandError::UnexpectedVersion { .. }))
        ));
    }

    #[tokio::test]
    async fn lookup_rejects_unknown_version_before_probing() {
        let runner = FakeRunner::new("go1.19.5");
        let calls = runner.calls();
        let locator = snapshot_locator(runner);

        let result = locator.lookup("unknown").await;

        assert!(matches!(result, Err(LookupError::InvalidVersion(_))));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lookup_latest_prefers_default_command_with_same_major() {
        let runner = FakeRunner::new("go1.19.5").with_executable("go1.19.4", "go1.19.4");
        let locator = snapshot_locator(runner);

        let path = locator.lookup_latest("go1.19").await.unwrap();

        assert_eq!(path, PathBuf::from("go"));
    }

    #[tokio::test]
    async fn lookup_latest_picks_newest_installed_candidate() {
        let runner = FakeRunner::new("go1.19.5")
            .with_executable("go1.18.4", "go1.18.4")
            .with_executable("go1.18.5", "go1.18.5")
            .with_executable("go1.18rc1", "go1.18rc1");
        let locator = snapshot_locator(runner);

        let path = locator.lookup_latest("go1.18").await.unwrap();

        assert_eq!(path, PathBuf::from("/sdk/bin/go1.18.5"));
    }

    #[tokio::test]
    async fn lookup_latest_skips_candidates_reporting_other_versions() {
        let runner = FakeRunner::new("go1.19.5")
            .with_executable("go1.18.10", "go1.17")
            .with_executable("go1.18.2", "go1.18.2");
        let locator = snapshot_locator(runner);

        let path = locator.lookup_latest("go1.18.7").await.unwrap();

        assert_eq!(path, PathBuf::from("/sdk/bin/go1.18.2"));
    }

    #[tokio::test]
    async fn lookup_latest_returns_not_found_without_candidates() {
        let locator = snapshot_locator(FakeRunner::new("go1.19.5"));

        let result = locator.lookup_latest("go1.17").await;

        assert!(matches!(result, Err(LookupError::NotFound(_))));
    }

    #[tokio::test]
    async fn lookup_latest_propagates_broken_default_command() {
        let locator = snapshot_locator(FakeRunner::broken());

        let result = locator.lookup_latest("go1.18").await;

        assert!(matches!(result, Err(LookupError::Command(_))));
    }

    #[tokio::test]
    async fn command_version_queries_each_command_once() {
        let runner = FakeRunner::new("go1.19.5");
        let calls = runner.calls();
        let locator = snapshot_locator(runner);

        assert_eq!(locator.current_version().await.unwrap(), "go1.19.5");
        assert_eq!(locator.current_version().await.unwrap(), "go1.19.5");

        assert_eq!(calls.lock().unwrap().as_slice(), ["go env GOVERSION"]);
    }

    #[tokio::test]
    async fn with_default_command_changes_probed_command() {
        let runner = FakeRunner::new("go1.19.5").with_executable("go1.18.5", "go1.18.5");
        let locator = snapshot_locator(runner).with_default_command("/sdk/bin/go1.18.5");

        let path = locator.lookup("go1.18.5").await.unwrap();

        assert_eq!(path, PathBuf::from("/sdk/bin/go1.18.5"));
        assert!(locator.is_default_command(&path));
    }
}
