use async_trait::async_trait;
use chrono::{DateTime, Utc};
use memoira_core::MemoiraResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Keys under which the store persists its collections and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageKey {
    Tasks,
    Folders,
    AutoSave,
    FontFamily,
    FontSize,
    Columns,
    FolderSize,
    CardSize,
}

impl StorageKey {
    pub const ALL: [StorageKey; 8] = [
        Self::Tasks,
        Self::Folders,
        Self::AutoSave,
        Self::FontFamily,
        Self::FontSize,
        Self::Columns,
        Self::FolderSize,
        Self::CardSize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tasks => "memoira_tasks",
            Self::Folders => "memoira_folders",
            Self::AutoSave => "memoira_autoSave",
            Self::FontFamily => "memoira_fontFamily",
            Self::FontSize => "memoira_fontSize",
            Self::Columns => "memoira_columns",
            Self::FolderSize => "memoira_folderSize",
            Self::CardSize => "memoira_cardSize",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata written alongside the entries of a file-backed store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Device-local key-value storage of JSON values.
///
/// Implementations decide where values live (a file, memory, ...). A key that
/// was never set reads as `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> MemoiraResult<Option<serde_json::Value>>;

    async fn set(&self, key: &str, value: serde_json::Value) -> MemoiraResult<()>;

    async fn remove(&self, key: &str) -> MemoiraResult<()>;

    /// All keys currently present, in sorted order
    async fn keys(&self) -> MemoiraResult<Vec<String>>;
}
