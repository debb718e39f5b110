// src/services/fetcher.rs

//! Page fetching with an on-disk cache.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FetcherConfig;
use crate::storage::PageCache;
use crate::utils::http;

/// Source of raw provider pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Return the body of `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        http::fetch_text(&self.client, url).await
    }
}

/// Wraps another fetcher and reuses pages fetched within `ttl`.
pub struct CachedFetcher<F> {
    inner: F,
    cache: PageCache,
    ttl: Duration,
}

impl<F: PageFetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: PageCache, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        if !self.ttl.is_zero() {
            if let Some(page) = self.cache.read_fresh(url, self.ttl, SystemTime::now()).await? {
                log::debug!("Cache hit for {}", url);
                return Ok(page);
            }
        }

        let body = self.inner.fetch(url).await?;
        if let Err(e) = self.cache.write(url, &body).await {
            log::warn!("Failed to cache {}: {}", url, e);
        }
        Ok(body)
    }
}
