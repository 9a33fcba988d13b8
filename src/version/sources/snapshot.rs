//! Catalog snapshot embedded at compile time

use crate::version::error::CatalogError;
use crate::version::source::{CatalogSource, VersionMap, decode_catalog};

/// Release list captured from go.dev, in the same shape as the live payload
const SNAPSHOT: &str = include_str!("../../../data/versions.json");

/// Catalog source that never touches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotSource;

#[async_trait::async_trait]
impl CatalogSource for SnapshotSource {
    async fn fetch_catalog(&self) -> Result<VersionMap, CatalogError> {
        decode_catalog(SNAPSHOT)
    }
}
