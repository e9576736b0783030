//! HTTP client for the indexer with a degrade-to-neutral contract

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use super::query::{CountQuery, ListQuery, Operation};

/// Read-only queries against the remote indexing API.
///
/// The indexer is an uncontrolled third-party dependency, so every method
/// degrades to a neutral value instead of raising: 0 for counts, `None` for
/// lists. Callers treat `None` as "no data" and render a degraded-but-valid
/// result; the next scheduled poll is the only retry mechanism.
#[async_trait]
pub trait IndexerApi: Send + Sync {
    /// Count of applied transactions matching the query. 0 on any failure.
    async fn count(&self, query: &CountQuery) -> u64;

    /// Applied transactions matching the query. `None` on any failure.
    async fn list(&self, query: &ListQuery) -> Option<Vec<Operation>>;

    /// Count of active keys in a bigmap. 0 on any failure.
    async fn active_keys(&self, bigmap_id: u64) -> u64;
}

/// reqwest-backed implementation against a TzKT-style API.
pub struct HttpIndexerClient {
    http_client: Client,
    base_url: String,
}

impl HttpIndexerClient {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn try_count(&self, query: &CountQuery) -> Result<u64> {
        let url = format!("{}/v1/operations/transactions/count", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "count request failed with status: {}",
                response.status()
            ));
        }

        // The count endpoint returns a bare integer body
        let body = response.text().await?;
        let count = body.trim().parse::<u64>()?;
        Ok(count)
    }

    async fn try_list(&self, query: &ListQuery) -> Result<Vec<Operation>> {
        let url = format!("{}/v1/operations/transactions", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "list request failed with status: {}",
                response.status()
            ));
        }

        let operations: Vec<Operation> = response.json().await?;
        Ok(operations)
    }

    async fn try_active_keys(&self, bigmap_id: u64) -> Result<u64> {
        let url = format!("{}/v1/bigmaps/{}/keys/count", self.base_url, bigmap_id);
        let response = self
            .http_client
            .get(&url)
            .query(&[("active", "true")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "bigmap key count request failed with status: {}",
                response.status()
            ));
        }

        let body = response.text().await?;
        let count = body.trim().parse::<u64>()?;
        Ok(count)
    }
}

#[async_trait]
impl IndexerApi for HttpIndexerClient {
    async fn count(&self, query: &CountQuery) -> u64 {
        match self.try_count(query).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Count query degraded to 0 ({} {}): {}", query.target, query.entrypoint, e);
                0
            }
        }
    }

    async fn list(&self, query: &ListQuery) -> Option<Vec<Operation>> {
        match self.try_list(query).await {
            Ok(operations) => Some(operations),
            Err(e) => {
                warn!("List query degraded to empty ({} {}): {}", query.target, query.entrypoint, e);
                None
            }
        }
    }

    async fn active_keys(&self, bigmap_id: u64) -> u64 {
        match self.try_active_keys(bigmap_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Bigmap key count degraded to 0 (bigmap {}): {}", bigmap_id, e);
                0
            }
        }
    }
}
