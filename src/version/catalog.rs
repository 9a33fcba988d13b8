//! Process-wide release catalog, fetched at most once

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::version::error::CatalogError;
use crate::version::source::{CatalogSource, VersionMap};

struct CatalogState {
    fetched: bool,
    versions: Arc<VersionMap>,
}

/// Release catalog loaded from a [`CatalogSource`]
///
/// The map is published once and never replaced. Readers get an immutable
/// snapshot, so they see either the empty pre-fetch map or the complete
/// catalog, never something in between.
pub struct VersionCatalog {
    source: Arc<dyn CatalogSource>,
    state: Mutex<CatalogState>,
}

impl VersionCatalog {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CatalogState {
                fetched: false,
                versions: Arc::new(VersionMap::new()),
            }),
        }
    }

    /// Fetches the catalog unless a previous call already did.
    ///
    /// Returns `true` when this call performed the fetch. Concurrent callers
    /// wait on the same lock, so the source is hit once. A failed fetch
    /// leaves the catalog unloaded and a later call retries.
    pub async fn fetch_once(&self) -> Result<bool, CatalogError> {
        let mut state = self.state.lock().await;
        if state.fetched {
            return Ok(false);
        }

        debug!("Fetching release catalog");
        let versions = self
            .source
            .fetch_catalog()
            .await
            .inspect_err(|e| warn!("Failed to fetch release catalog: {}", e))?;

        info!("Loaded {} releases into catalog", versions.len());
        state.versions = Arc::new(versions);
        state.fetched = true;
        Ok(true)
    }

    /// Snapshot of the current catalog (empty until the first successful fetch)
    pub async fn versions(&self) -> Arc<VersionMap> {
        Arc::clone(&self.state.lock().await.versions)
    }

    pub async fn is_fetched(&self) -> bool {
        self.state.lock().await.fetched
    }

    /// Ensures the catalog is loaded and returns a snapshot of it
    pub async fn load(&self) -> Result<Arc<VersionMap>, CatalogError> {
        self.fetch_once().await?;
        Ok(self.versions().await)
    }
}
