//! Sources of a module's declared go version

use std::path::PathBuf;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::config::DEFAULT_COMMAND;
use crate::module::error::ModuleError;
use crate::module::go_mod::{find_go_mod, read_go_mod};
use crate::toolchain::command::CommandRunner;
use crate::version::catalog::VersionCatalog;
use crate::version::validate::valid_version;

/// Path `go env GOMOD` reports when no module is active
#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Trait for obtaining the go version a module declares
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ModuleVersionSource: Send + Sync {
    /// Returns the declared version in catalog spelling, e.g. "go1.19"
    async fn module_go_version(&self) -> Result<String, ModuleError>;
}

/// Reads the nearest go.mod at or above a directory
pub struct GoModDirectory {
    dir: PathBuf,
}

impl GoModDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait::async_trait]
impl ModuleVersionSource for GoModDirectory {
    async fn module_go_version(&self) -> Result<String, ModuleError> {
        let path = find_go_mod(&self.dir)?;
        read_go_mod(&path).await?.go_version()
    }
}

/// Reads the go.mod that the go command itself considers active
pub struct GoEnvModule {
    runner: Arc<dyn CommandRunner>,
    command: String,
}

impl GoEnvModule {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            command: DEFAULT_COMMAND.to_string(),
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

#[async_trait::async_trait]
impl ModuleVersionSource for GoEnvModule {
    async fn module_go_version(&self) -> Result<String, ModuleError> {
        let gomod = self.runner.go_env(&self.command, "GOMOD").await?;
        if gomod.is_empty() || gomod == NULL_DEVICE {
            debug!("{} reports no active module", self.command);
            return Err(ModuleError::NotFound(PathBuf::from(gomod)));
        }

        read_go_mod(&PathBuf::from(gomod)).await?.go_version()
    }
}

/// Checks that `version` exists and belongs to the module's declared version.
///
/// "go1.19.1" and "go1.19rc1" both satisfy a module declaring "go1.19".
pub async fn valid_module_go_version(
    catalog: &VersionCatalog,
    module: &dyn ModuleVersionSource,
    version: &str,
) -> Result<(), ModuleError> {
    valid_version(catalog, version).await?;

    let declared = module.module_go_version().await?;
    if version.starts_with(&declared) {
        Ok(())
    } else {
        Err(ModuleError::UnexpectedGoVersion {
            version: version.to_string(),
            declared,
        })
    }
}
