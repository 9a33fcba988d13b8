//! Catalog source implementations

pub mod go_dev;
pub mod snapshot;

pub use go_dev::GoDevSource;
pub use snapshot::SnapshotSource;
