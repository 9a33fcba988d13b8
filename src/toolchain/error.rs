use thiserror::Error;

use crate::module::ModuleError;
use crate::version::error::{CatalogError, VersionError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("executable file not found: {0}")]
    NotFound(String),

    #[error("failed to search for {name}: {reason}")]
    Search { name: String, reason: String },

    #[error("failed to run {command}: {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("got unexpected version {got:?} from {command:?} (expected {expected:?})")]
    UnexpectedVersion {
        command: String,
        expected: String,
        got: String,
    },
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid version: {0:?}")]
    InvalidVersion(String),

    #[error("no go executable found for {0}")]
    NotFound(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<VersionError> for LookupError {
    fn from(err: VersionError) -> Self {
        match err {
            VersionError::InvalidVersion(version) => LookupError::InvalidVersion(version),
            VersionError::Catalog(e) => LookupError::Catalog(e),
        }
    }
}

#[derive(Debug, Error)]
pub enum DetermineError {
    #[error("go executable exactly matching {version} not found: {source}")]
    ExactNotFound {
        version: String,
        source: LookupError,
    },

    #[error("go executable matching major version {major:?} of {version} not found: {source}")]
    MajorNotFound {
        version: String,
        major: String,
        source: LookupError,
    },

    #[error("failed to read module go version: {0}")]
    ModuleVersion(#[source] ModuleError),

    #[error("failed to query version of default go command: {0}")]
    CurrentVersion(#[source] CommandError),
}

impl DetermineError {
    /// Underlying lookup failure, if the determination failed at lookup
    pub fn lookup_error(&self) -> Option<&LookupError> {
        match self {
            DetermineError::ExactNotFound { source, .. }
            | DetermineError::MajorNotFound { source, .. } => Some(source),
            _ => None,
        }
    }
}
