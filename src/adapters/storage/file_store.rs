//! File-based Key-Value Store Adapter
//!
//! Persists each named store as a single YAML document
//! (`<data_dir>/<store>.yaml`) mapping keys to documents.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{KeyValueStore, StorageError};

type Entries = BTreeMap<String, Value>;

/// File-backed storage for one named store
#[derive(Debug)]
pub struct FileStore {
    name: String,
    data_dir: PathBuf,
    // Serializes read-modify-write cycles on the backing file.
    lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by `<data_dir>/<name>.yaml`
    ///
    /// The directory and file are created lazily on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileStore::new("./data", "entities");
    /// ```
    pub fn new<P: AsRef<Path>>(data_dir: P, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_dir: data_dir.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing YAML file
    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.yaml", self.name))
    }

    async fn load(&self) -> Result<Entries, StorageError> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(Entries::new());
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| StorageError::read(&self.name, e))?;
        if yaml.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_yaml::from_str(&yaml).map_err(|e| StorageError::deserialization(&self.name, e))
    }

    async fn persist(&self, entries: &Entries) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StorageError::write(&self.name, e))?;

        let yaml =
            serde_yaml::to_string(entries).map_err(|e| StorageError::serialization(&self.name, e))?;

        fs::write(self.file_path(), yaml)
            .await
            .map_err(|e| StorageError::write(&self.name, e))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value);
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        if !self.file_path().exists() {
            return Ok(());
        }
        self.persist(&Entries::new()).await
    }

    async fn entries(&self) -> Result<Vec<(String, Value)>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().collect())
    }
}
