//! Source trait for retrieving the Go release catalog

use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;
use serde::Deserialize;

use crate::version::error::CatalogError;

/// Version identifier (e.g. "go1.19rc2") to stability flag
pub type VersionMap = HashMap<String, bool>;

/// One release entry of the catalog payload
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    version: String,
    stable: bool,
}

/// Trait for retrieving the complete release catalog
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every known release and its stability flag
    ///
    /// # Returns
    /// * `Ok(VersionMap)` - All releases keyed by their exact catalog spelling
    /// * `Err(CatalogError)` - If retrieval or decoding fails
    async fn fetch_catalog(&self) -> Result<VersionMap, CatalogError>;
}

/// Decodes a catalog payload: a JSON array of `{"version", "stable"}` objects.
///
/// Other fields are ignored. A repeated version keeps its last flag.
pub fn decode_catalog(body: &str) -> Result<VersionMap, CatalogError> {
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(body).map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

    Ok(entries
        .into_iter()
        .map(|entry| (entry.version, entry.stable))
        .collect())
}
