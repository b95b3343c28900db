use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{KeyValueStore, PersistenceMetadata};
use async_trait::async_trait;
use memoira_core::{MemoiraError, MemoiraResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

const FORMAT_VERSION: u32 = 1;

type Entries = BTreeMap<String, Value>;

/// Key-value store backed by a single JSON document.
///
/// The document is read on first access and rewritten atomically after
/// every `set` or `remove`. A missing file behaves as an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    entries: Mutex<Option<Entries>>,
}

/// On-disk document format
#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    metadata: PersistenceMetadata,
    entries: Entries,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_instance_id(path, Uuid::new_v4())
    }

    /// Create a store with a specific instance ID (useful for testing)
    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> MemoiraResult<Entries> {
        let Some(bytes) = AtomicWriter::read_optional(&self.path).await? else {
            tracing::info!("No store at {}, starting empty", self.path.display());
            return Ok(Entries::new());
        };
        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)?;
        if envelope.version != FORMAT_VERSION {
            return Err(MemoiraError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        tracing::info!(
            "Loaded {} entries from {} (saved by {} at {})",
            envelope.entries.len(),
            self.path.display(),
            envelope.metadata.instance_id,
            envelope.metadata.saved_at
        );
        Ok(envelope.entries)
    }

    async fn write_entries(&self, entries: &Entries) -> MemoiraResult<()> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(self.instance_id),
            entries: entries.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&envelope)?;
        AtomicWriter::write_atomic(&self.path, &bytes).await?;
        tracing::info!("Saved {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    /// Apply `change` to the cached entries and write the file. The cache is
    /// restored if the write fails, so it always mirrors the disk.
    async fn modify<F>(&self, change: F) -> MemoiraResult<()>
    where
        F: FnOnce(&mut Entries) + Send,
    {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_entries().await?);
        }
        let Some(entries) = guard.as_mut() else {
            return Err(MemoiraError::Internal("store cache not loaded".to_string()));
        };

        let previous = entries.clone();
        change(entries);
        if let Err(e) = self.write_entries(entries).await {
            tracing::warn!("Failed to write {}: {}", self.path.display(), e);
            *entries = previous;
            return Err(e);
        }
        Ok(())
    }

    async fn snapshot(&self) -> MemoiraResult<Entries> {
        let mut guard = self.entries.lock().await;
        match guard.as_ref() {
            Some(entries) => Ok(entries.clone()),
            None => {
                let entries = self.read_entries().await?;
                *guard = Some(entries.clone());
                Ok(entries)
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> MemoiraResult<Option<Value>> {
        Ok(self.snapshot().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> MemoiraResult<()> {
        let key = key.to_string();
        self.modify(move |entries| {
            entries.insert(key, value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> MemoiraResult<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
        .await
    }

    async fn keys(&self) -> MemoiraResult<Vec<String>> {
        Ok(self.snapshot().await?.into_keys().collect())
    }
}
