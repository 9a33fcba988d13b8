//! Toolchain resolution layer
//!
//! Probes the local environment for go executables and picks the one that
//! matches a requested version.
//!
//! # Modules
//!
//! - [`cache`]: Memo of versions reported by each command
//! - [`command`]: Runner trait and the process-backed implementation
//! - [`determine`]: Mode-driven selection (exact, latest, fallback)
//! - [`error`]: Error types for command, lookup and determination failures
//! - [`locator`]: Exact and latest-within-major executable lookup

pub mod cache;
pub mod command;
pub mod determine;
pub mod error;
pub mod locator;

#[cfg(test)]
pub(crate) mod test_utils;

pub use cache::CommandVersionCache;
pub use command::{CommandRunner, SystemCommandRunner};
pub use determine::{Mode, ParseModeError, Toolchain};
pub use error::{CommandError, DetermineError, LookupError};
pub use locator::Locator;
