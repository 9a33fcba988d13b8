//! Fake go installations backed by shell scripts

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use gocmd::toolchain::{Locator, SystemCommandRunner};
use gocmd::version::VersionCatalog;
use gocmd::version::sources::SnapshotSource;

/// Directory of executables that answer `env GOVERSION` and `version`
pub struct Toolchains {
    dir: TempDir,
}

impl Toolchains {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Installs an executable called `name` that reports `reported`
    pub fn install(&self, name: &str, reported: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let script = format!(
            r#"#!/bin/sh
if [ "$1" = "env" ] && [ "$2" = "GOVERSION" ]; then
    echo "{reported}"
    exit 0
fi
if [ "$1" = "version" ]; then
    echo "go version {reported} linux/amd64"
    exit 0
fi
exit 2
"#
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Locator searching only this directory, over the embedded catalog
    pub fn locator(&self) -> Locator {
        Locator::new(
            Arc::new(VersionCatalog::new(Arc::new(SnapshotSource))),
            Arc::new(SystemCommandRunner::with_search_path(self.dir.path())),
        )
    }
}
