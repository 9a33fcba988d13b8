use std::path::PathBuf;

use thiserror::Error;

use crate::toolchain::error::CommandError;
use crate::version::error::VersionError;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("go.mod not found from {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid go.mod at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid module file: go version not found")]
    MissingGoDirective,

    #[error("unexpected go version in go.mod: {version} does not match {declared}")]
    UnexpectedGoVersion { version: String, declared: String },

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Version(#[from] VersionError),
}
