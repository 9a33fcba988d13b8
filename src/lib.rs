//! Resolve a local Go toolchain executable for a requested version.
//!
//! The release catalog published on go.dev decides which versions exist.
//! The [`toolchain::Locator`] then probes the default `go` command and
//! versioned executables such as `go1.18.5` (installed via
//! `golang.org/dl`) to find one that reports the wanted version.

pub mod config;
pub mod module;
pub mod toolchain;
pub mod version;
