//! Catalog source test utilities

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use gocmd::version::error::CatalogError;
use gocmd::version::source::{CatalogSource, VersionMap};

/// Catalog source that counts fetches and answers after a short delay
pub struct CountingSource {
    versions: VersionMap,
    fetches: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(versions: &[(&str, bool)]) -> Self {
        Self {
            versions: versions.iter().map(|(v, s)| (v.to_string(), *s)).collect(),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetches(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }
}

#[async_trait]
impl CatalogSource for CountingSource {
    async fn fetch_catalog(&self) -> Result<VersionMap, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(self.versions.clone())
    }
}
