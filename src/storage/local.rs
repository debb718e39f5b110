//! Local filesystem address book.
//!
//! ## File Layout
//!
//! ```json
//! { "users": { "42": ["Lenina, д.11", "пр. Avenue Name, д.5"] } }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::storage::{AddressBook, write_atomic};

#[derive(Debug, Default, Serialize, Deserialize)]
struct AddressBookData {
    #[serde(default)]
    users: BTreeMap<i64, Vec<String>>,
}

/// JSON-file backed address book.
pub struct LocalStorage {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl LocalStorage {
    /// Create a LocalStorage backed by the JSON file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<AddressBookData> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AddressBookData::default()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn write(&self, data: &AddressBookData) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(data)?;
        write_atomic(&self.path, &bytes).await
    }
}

#[async_trait]
impl AddressBook for LocalStorage {
    async fn list(&self, user_id: i64) -> Result<Vec<String>> {
        let data = self.read().await?;
        Ok(data.users.get(&user_id).cloned().unwrap_or_default())
    }

    async fn add(&self, user_id: i64, raw_address: &str) -> Result<bool> {
        if raw_address.trim().is_empty() {
            return Err(AppError::validation("Address is empty"));
        }

        let _guard = self.lock.lock().await;
        let mut data = self.read().await?;
        let addresses = data.users.entry(user_id).or_default();
        if addresses.iter().any(|a| a == raw_address) {
            return Ok(false);
        }
        addresses.push(raw_address.to_string());
        self.write(&data).await?;
        log::info!("Stored address '{}' for user {}", raw_address, user_id);
        Ok(true)
    }

    async fn remove(&self, user_id: i64, raw_address: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut data = self.read().await?;
        let Some(addresses) = data.users.get_mut(&user_id) else {
            return Ok(false);
        };

        let before = addresses.len();
        addresses.retain(|a| a != raw_address);
        if addresses.len() == before {
            return Ok(false);
        }
        if addresses.is_empty() {
            data.users.remove(&user_id);
        }
        self.write(&data).await?;
        log::info!("Removed address '{}' for user {}", raw_address, user_id);
        Ok(true)
    }

    async fn clear(&self, user_id: i64) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut data = self.read().await?;
        if data.users.remove(&user_id).is_some() {
            self.write(&data).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("addresses.json"));
        assert!(storage.list(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested/addresses.json"));

        assert!(storage.add(1, "Lenina, д.11").await.unwrap());
        assert!(storage.add(1, "пр. Avenue Name, д.5").await.unwrap());
        assert!(!storage.add(1, "Lenina, д.11").await.unwrap());
        assert!(storage.add(2, "Lenina, д.11").await.unwrap());

        assert_eq!(
            storage.list(1).await.unwrap(),
            vec!["Lenina, д.11", "пр. Avenue Name, д.5"]
        );

        assert!(storage.remove(1, "Lenina, д.11").await.unwrap());
        assert!(!storage.remove(1, "Lenina, д.11").await.unwrap());
        assert_eq!(storage.list(1).await.unwrap(), vec!["пр. Avenue Name, д.5"]);
        assert_eq!(storage.list(2).await.unwrap(), vec!["Lenina, д.11"]);
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("addresses.json");

        LocalStorage::new(&path).add(7, "Lenina, д.11").await.unwrap();
        let reopened = LocalStorage::new(&path);
        assert_eq!(reopened.list(7).await.unwrap(), vec!["Lenina, д.11"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("addresses.json"));

        storage.add(1, "Lenina, д.11").await.unwrap();
        storage.add(2, "Lenina, д.12").await.unwrap();
        storage.clear(1).await.unwrap();

        assert!(storage.list(1).await.unwrap().is_empty());
        assert_eq!(storage.list(2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_stores_text_as_typed() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("addresses.json"));

        assert!(storage.add(1, " Lenina, д.11 ").await.unwrap());
        assert!(storage.add(1, "Lenina, д.11").await.unwrap());
        assert_eq!(
            storage.list(1).await.unwrap(),
            vec![" Lenina, д.11 ", "Lenina, д.11"]
        );

        assert!(storage.remove(1, " Lenina, д.11 ").await.unwrap());
        assert_eq!(storage.list(1).await.unwrap(), vec!["Lenina, д.11"]);
    }

    #[tokio::test]
    async fn test_add_rejects_blank() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("addresses.json"));
        assert!(storage.add(1, "   ").await.is_err());
    }
}
