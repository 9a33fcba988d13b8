//! Selection of a toolchain under a matching mode

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{info, warn};

use crate::module::ModuleVersionSource;
use crate::toolchain::error::DetermineError;
use crate::toolchain::locator::Locator;
use crate::version::validate::major_version;

/// How strictly the found executable has to match the requested version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Reported version must equal the requested one
    #[default]
    Exact,
    /// Any executable sharing the major prefix, latest first
    Latest,
    /// Like `Latest`, but settle for the default command
    Fallback,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Exact => "exact",
            Mode::Latest => "latest",
            Mode::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown mode {0:?} (expected exact, latest or fallback)")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Mode::Exact),
            "latest" => Ok(Mode::Latest),
            "fallback" => Ok(Mode::Fallback),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Selected executable and the version it stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub command: PathBuf,
    pub version: String,
}

impl Locator {
    /// Chooses an executable for `version` according to `mode`.
    ///
    /// Only `Mode::Fallback` swallows a lookup failure. Even then a broken
    /// default command still fails when its version is queried.
    pub async fn determine(&self, version: &str, mode: Mode) -> Result<Toolchain, DetermineError> {
        let command = match mode {
            Mode::Exact => {
                self.lookup(version)
                    .await
                    .map_err(|source| DetermineError::ExactNotFound {
                        version: version.to_string(),
                        source,
                    })?
            }
            Mode::Latest => {
                self.lookup_latest(version)
                    .await
                    .map_err(|source| DetermineError::MajorNotFound {
                        version: version.to_string(),
                        major: major_version(version).to_string(),
                        source,
                    })?
            }
            Mode::Fallback => match self.lookup_latest(version).await {
                Ok(command) => command,
                Err(e) => {
                    warn!(
                        "No go executable for {}, falling back to {}: {}",
                        version,
                        self.default_command(),
                        e
                    );
                    PathBuf::from(self.default_command())
                }
            },
        };

        self.toolchain_for(command).await
    }

    /// Chooses an executable for the go version declared by a module.
    ///
    /// The declared version is a minimum, so `Exact` and `Latest` both
    /// accept any executable with the same major prefix.
    pub async fn determine_from_module(
        &self,
        module: &dyn ModuleVersionSource,
        mode: Mode,
    ) -> Result<Toolchain, DetermineError> {
        let version = module
            .module_go_version()
            .await
            .map_err(DetermineError::ModuleVersion)?;
        info!("Module declares {}", version);

        let command = match self.lookup_latest(&version).await {
            Ok(command) => command,
            Err(e) if mode == Mode::Fallback => {
                warn!(
                    "No go executable for module version {}, falling back to {}: {}",
                    version,
                    self.default_command(),
                    e
                );
                PathBuf::from(self.default_command())
            }
            Err(source) => {
                return Err(DetermineError::MajorNotFound {
                    major: major_version(&version).to_string(),
                    version,
                    source,
                });
            }
        };

        self.toolchain_for(command).await
    }

    async fn toolchain_for(&self, command: PathBuf) -> Result<Toolchain, DetermineError> {
        let version = if self.is_default_command(&command) {
            self.current_version()
                .await
                .map_err(DetermineError::CurrentVersion)?
        } else {
            executable_version(&command)
        };

        Ok(Toolchain { command, version })
    }
}

/// Version a named executable stands for: its file name without any
/// platform executable suffix
fn executable_version(command: &std::path::Path) -> String {
    let name = command
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match std::env::consts::EXE_SUFFIX {
        "" => name,
        suffix => name.strip_suffix(suffix).map(str::to_string).unwrap_or(name),
    }
}
