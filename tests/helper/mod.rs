//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod catalog;
#[cfg(unix)]
pub mod toolchain;

pub use catalog::CountingSource;
#[cfg(unix)]
pub use toolchain::Toolchains;
