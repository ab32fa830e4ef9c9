//! HTTP trigger for the catalog synchronization engine.
//!
//! [`HttpCatalogSync`] asks the engine to refresh a scope via
//! `POST {base}/v1/refresh/{scope}?force=...`. A call is attempted exactly
//! once; failures are returned to the caller, never retried here.

use std::time::Duration;

use async_trait::async_trait;
use catalog_core::refresh::{CatalogSync, SyncError};

/// Talks to the synchronization engine over HTTP.
pub struct HttpCatalogSync {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSync {
    /// Create a client for the engine at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of the refresh endpoint for `scope`.
    pub fn refresh_url(&self, scope: &str) -> String {
        format!("{}/v1/refresh/{}", self.base_url, urlencoding::encode(scope))
    }
}

#[async_trait]
impl CatalogSync for HttpCatalogSync {
    async fn refresh(&self, scope: &str, force: bool) -> Result<(), SyncError> {
        let url = self.refresh_url(scope);
        let response = self
            .client
            .post(&url)
            .query(&[("force", force)])
            .send()
            .await
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(scope, force, %url, "Sync engine accepted refresh");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_url_trims_trailing_slash() {
        let sync = HttpCatalogSync::new("http://sync.local:8088/", Duration::from_secs(1)).unwrap();
        assert_eq!(sync.refresh_url("envA"), "http://sync.local:8088/v1/refresh/envA");
    }

    #[test]
    fn refresh_url_encodes_scope() {
        let sync = HttpCatalogSync::new("http://sync.local:8088", Duration::from_secs(1)).unwrap();
        assert_eq!(sync.refresh_url("a/b"), "http://sync.local:8088/v1/refresh/a%2Fb");
    }

    #[tokio::test]
    async fn unreachable_engine_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let sync = HttpCatalogSync::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = sync.refresh("global", true).await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));
    }
}
