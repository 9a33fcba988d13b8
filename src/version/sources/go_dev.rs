//! go.dev download catalog implementation

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{DEFAULT_CATALOG_URL, FETCH_TIMEOUT_MS};
use crate::version::error::CatalogError;
use crate::version::source::{CatalogSource, VersionMap, decode_catalog};

/// Path listing every release, including unstable and archived ones
const CATALOG_PATH: &str = "/dl/?mode=json&include=all";

/// Catalog source backed by the go.dev download API
pub struct GoDevSource {
    client: reqwest::Client,
    base_url: String,
}

impl GoDevSource {
    /// Creates a new GoDevSource with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    /// Creates a new GoDevSource whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("gocmd")
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for GoDevSource {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[async_trait::async_trait]
impl CatalogSource for GoDevSource {
    async fn fetch_catalog(&self) -> Result<VersionMap, CatalogError> {
        let url = format!("{}{}", self.base_url, CATALOG_PATH);
        debug!("Fetching Go release catalog from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("go.dev returned status {}: {}", status, url);
            return Err(CatalogError::UnexpectedStatus(status));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read go.dev response: {}", e);
            CatalogError::InvalidResponse(e.to_string())
        })?;

        decode_catalog(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn catalog_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server.mock("GET", "/dl/").match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("mode".into(), "json".into()),
            Matcher::UrlEncoded("include".into(), "all".into()),
        ]))
    }

    #[tokio::test]
    async fn fetch_catalog_returns_versions_with_stability() {
        let mut server = Server::new_async().await;

        let mock = catalog_mock(&mut server)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"version": "go1.19.1", "stable": true, "files": []},
                    {"version": "go1.19", "stable": true, "files": []},
                    {"version": "go1.19rc2", "stable": false, "files": []}
                ]"#,
            )
            .create_async()
            .await;

        let source = GoDevSource::new(&server.url());
        let result = source.fetch_catalog().await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.len(), 3);
        assert_eq!(result.get("go1.19.1"), Some(&true));
        assert_eq!(result.get("go1.19rc2"), Some(&false));
    }

    #[tokio::test]
    async fn fetch_catalog_returns_error_for_non_success_status() {
        let mut server = Server::new_async().await;

        let mock = catalog_mock(&mut server)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let source = GoDevSource::new(&server.url());
        let result = source.fetch_catalog().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(CatalogError::UnexpectedStatus(status)) if status.as_u16() == 503
        ));
    }

    #[tokio::test]
    async fn fetch_catalog_returns_invalid_response_for_malformed_body() {
        let mut server = Server::new_async().await;

        let mock = catalog_mock(&mut server)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let source = GoDevSource::new(&server.url());
        let result = source.fetch_catalog().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(CatalogError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn new_trims_trailing_slash_from_base_url() {
        let mut server = Server::new_async().await;

        let mock = catalog_mock(&mut server)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let source = GoDevSource::new(&format!("{}/", server.url()));
        let result = source.fetch_catalog().await.unwrap();

        mock.assert_async().await;
        assert!(result.is_empty());
    }
}
