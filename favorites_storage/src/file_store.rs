use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_std::fs;
use async_std::sync::Mutex;
use async_trait::async_trait;

use crate::{KeyValueStore, StorageError};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object in a file.
///
/// Every `set` rewrites the whole file through a temporary file and a rename, so a
/// crash mid-write leaves the previous contents in place.
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Open the store at `path`, creating the parent directory if needed.
    /// The file itself is created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::Write(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        tracing::debug!(path = %path.display(), "Opened key-value store");

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, StorageError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(StorageError::Read(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StorageError::Read(format!("Corrupted store file {}: {}", self.path.display(), e))
        })
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");

        fs::write(&tmp_path, json)
            .await
            .map_err(|e| StorageError::Write(format!("Failed to write {}: {}", tmp_path.display(), e)))?;
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            StorageError::Write(format!("Failed to replace {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        // Refuse to clobber other keys when the file cannot be read back.
        let mut entries = self
            .read_entries()
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }
}
