//! Invocation of Go toolchain executables

use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::debug;

use crate::toolchain::error::CommandError;

/// Trait for running toolchain commands and searching the execution path
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `<command> env <key>` and returns stdout with surrounding
    /// whitespace trimmed
    async fn go_env(&self, command: &str, key: &str) -> Result<String, CommandError>;

    /// Resolves an executable name against the search path
    fn look_path(&self, name: &str) -> Result<PathBuf, CommandError>;
}

/// Runs real processes found on `PATH` or an explicit search path
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    search_path: Option<OsString>,
}

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches `search_path` (same syntax as `PATH`) instead of the
    /// process environment
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    /// Bare names go through the search path, anything else is used as given
    fn resolve(&self, command: &str) -> Result<PathBuf, CommandError> {
        let path = Path::new(command);
        if path.components().count() > 1 || path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            self.look_path(command)
        }
    }
}

#[async_trait::async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn go_env(&self, command: &str, key: &str) -> Result<String, CommandError> {
        let program = self.resolve(command)?;
        debug!("Running {} env {}", program.display(), key);

        let output = Command::new(&program)
            .arg("env")
            .arg(key)
            .output()
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => CommandError::NotFound(command.to_string()),
                _ => CommandError::Io {
                    command: command.to_string(),
                    source,
                },
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn look_path(&self, name: &str) -> Result<PathBuf, CommandError> {
        let paths = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"));
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        which::which_in(name, paths, cwd).map_err(|e| match e {
            which::Error::CannotFindBinaryPath => CommandError::NotFound(name.to_string()),
            other => CommandError::Search {
                name: name.to_string(),
                reason: other.to_string(),
            },
        })
    }
}
