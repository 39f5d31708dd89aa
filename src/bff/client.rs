use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;

use super::models::{BackendSearchItem, BackendSearchResponse};

/// Downstream seam for the BFF: whatever answers search requests for it.
#[async_trait]
pub trait SearchUpstream: Send + Sync {
    async fn search(&self, query: &str, page: u32, limit: Option<u32>)
    -> Result<BackendSearchResponse>;

    /// `Ok(None)` when the upstream reports the item does not exist.
    async fn get_by_id(&self, id: &str) -> Result<Option<BackendSearchItem>>;
}

/// HTTP client for the core search API. Built once and shared for the process lifetime.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid backend URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Backend URL cannot be used as a base: {base_url}"));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Backend URL cannot be used as a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl SearchUpstream for BackendClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        limit: Option<u32>,
    ) -> Result<BackendSearchResponse> {
        tracing::info!("Searching backend for query: {query}, page: {page}");

        let mut params = vec![("query", query.to_string()), ("page", page.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let url = self.endpoint(&["api", "search"])?;
        self.http
            .get(url)
            .query(&params)
            .send()
            .await
            .context("Failed to reach backend")?
            .error_for_status()
            .context("Backend returned an error status")?
            .json::<BackendSearchResponse>()
            .await
            .context("Failed to decode backend search response")
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BackendSearchItem>> {
        let url = self.endpoint(&["api", "search", id])?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to reach backend")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let item = response
            .error_for_status()
            .context("Backend returned an error status")?
            .json::<BackendSearchItem>()
            .await
            .context("Failed to decode backend item")?;
        Ok(Some(item))
    }
}
