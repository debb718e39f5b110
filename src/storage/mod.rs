//! Storage for user addresses and fetched pages.
//!
//! ```text
//! storage/
//! ├── addresses.json        # Address book: raw addresses per user
//! └── cache/                # Provider pages, one file per URL
//!     └── <sha256(url)>.html
//! ```

pub mod cache;
pub mod local;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

// Re-export for convenience
pub use cache::PageCache;
pub use local::LocalStorage;

/// Raw addresses entered by each user.
///
/// Addresses are stored exactly as typed; structure is only imposed when
/// they are matched against provider data.
#[async_trait]
pub trait AddressBook: Send + Sync {
    /// Addresses of `user_id`, in insertion order.
    async fn list(&self, user_id: i64) -> Result<Vec<String>>;

    /// Remember `raw_address`. Returns `false` if it was already stored.
    async fn add(&self, user_id: i64, raw_address: &str) -> Result<bool>;

    /// Forget `raw_address`. Returns `false` if it was not stored.
    async fn remove(&self, user_id: i64, raw_address: &str) -> Result<bool>;

    /// Forget every address of `user_id`.
    async fn clear(&self, user_id: i64) -> Result<()>;
}

/// Suffix counter for temp files; concurrent writers never share one.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write bytes atomically (write to temp, then rename).
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_extension(format!("{}.{}.tmp", std::process::id(), seq));
    let mut file = tokio::fs::File::create(&tmp).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_concurrent_writes_to_same_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("page.html");

        let writes = (0..8).map(|i| {
            let path = path.clone();
            async move { write_atomic(&path, format!("body {i}").as_bytes()).await }
        });
        for result in futures::future::join_all(writes).await {
            result.unwrap();
        }

        let body = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(body.starts_with("body "));

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
