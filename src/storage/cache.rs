//! On-disk cache of fetched provider pages.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::storage::write_atomic;

/// Stores one file per URL under `root_dir`, named by the URL's SHA-256.
#[derive(Debug, Clone)]
pub struct PageCache {
    root_dir: PathBuf,
}

impl PageCache {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Cache file for `url`.
    pub fn path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.root_dir.join(format!("{}.html", hex::encode(digest)))
    }

    /// Cached page for `url` if it was written no longer than `ttl` before `now`.
    pub async fn read_fresh(
        &self,
        url: &str,
        ttl: Duration,
        now: SystemTime,
    ) -> Result<Option<String>> {
        let path = self.path(url);
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };

        // a modification time in the future counts as fresh
        let age = now
            .duration_since(metadata.modified()?)
            .unwrap_or(Duration::ZERO);
        if age > ttl {
            return Ok(None);
        }

        Ok(Some(tokio::fs::read_to_string(&path).await?))
    }

    /// Store `body` as the cached page for `url`.
    pub async fn write(&self, url: &str, body: &str) -> Result<()> {
        write_atomic(&self.path(url), body.as_bytes()).await
    }
}
