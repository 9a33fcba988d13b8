//! Module descriptor layer
//!
//! Finds the go.mod governing a directory and reads the go version it
//! declares, which `Locator::determine_from_module` uses as the minimum.
//!
//! - [`go_mod`]: go.mod discovery and parsing
//! - [`source`]: Sources of the declared version and the module version check
//! - [`error`]: Error type for module operations

pub mod error;
pub mod go_mod;
pub mod source;

pub use error::ModuleError;
pub use go_mod::{GoMod, GoModParser, find_go_mod, read_go_mod};
#[cfg(test)]
pub use source::MockModuleVersionSource;
pub use source::{GoEnvModule, GoModDirectory, ModuleVersionSource, valid_module_go_version};
