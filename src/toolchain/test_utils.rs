//! Test doubles for the toolchain layer

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::toolchain::command::CommandRunner;
use crate::toolchain::error::CommandError;
use crate::toolchain::locator::Locator;
use crate::version::catalog::VersionCatalog;
use crate::version::sources::SnapshotSource;

/// In-memory stand-in for a machine with go executables installed
///
/// The default command is `go`; named executables live under `/sdk/bin`.
pub struct FakeRunner {
    default_version: Option<String>,
    executables: HashMap<String, (PathBuf, String)>,
    gomod: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    pub fn new(default_version: &str) -> Self {
        Self {
            default_version: Some(default_version.to_string()),
            executables: HashMap::new(),
            gomod: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runner whose default command fails every invocation
    pub fn broken() -> Self {
        Self {
            default_version: None,
            ..Self::new("")
        }
    }

    /// Installs `/sdk/bin/<name>` reporting `reported`
    pub fn with_executable(mut self, name: &str, reported: &str) -> Self {
        self.executables.insert(
            name.to_string(),
            (PathBuf::from("/sdk/bin").join(name), reported.to_string()),
        );
        self
    }

    pub fn with_gomod(mut self, path: &str) -> Self {
        self.gomod = path.to_string();
        self
    }

    /// Shared log of `go env` invocations and path searches
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    fn reported_version(&self, command: &str) -> Result<String, CommandError> {
        if command == "go" {
            return self.default_version.clone().ok_or_else(|| CommandError::Failed {
                command: command.to_string(),
                status: "exit status: 1".to_string(),
                stderr: "go: cannot find GOROOT directory".to_string(),
            });
        }
        self.executables
            .iter()
            .find(|(name, (path, _))| *name == command || path.to_string_lossy() == command)
            .map(|(_, (_, reported))| reported.clone())
            .ok_or_else(|| CommandError::NotFound(command.to_string()))
    }
}

#[async_trait::async_trait]
impl CommandRunner for FakeRunner {
    async fn go_env(&self, command: &str, key: &str) -> Result<String, CommandError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{command} env {key}"));

        let version = self.reported_version(command)?;
        match key {
            "GOMOD" => Ok(self.gomod.clone()),
            _ => Ok(version),
        }
    }

    fn look_path(&self, name: &str) -> Result<PathBuf, CommandError> {
        self.calls.lock().unwrap().push(format!("look_path {name}"));

        self.executables
            .get(name)
            .map(|(path, _)| path.clone())
            .ok_or_else(|| CommandError::NotFound(name.to_string()))
    }
}

/// Locator over the embedded catalog snapshot and `runner`
pub fn snapshot_locator(runner: FakeRunner) -> Locator {
    Locator::new(
        Arc::new(VersionCatalog::new(Arc::new(SnapshotSource))),
        Arc::new(runner),
    )
}
