use memoira_core::{AppConfig, MemoiraResult};
use memoira_domain::{NoteOperations, Task, TaskId};
use memoira_persistence::{JsonFileStore, NoteStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// State for a single CLI invocation.
///
/// Every mutation is written through to the data file as it happens; the
/// context only has to report failures.
pub struct CliContext {
    pub notes: NoteStore,
    pub config: AppConfig,
    path: PathBuf,
}

impl CliContext {
    pub async fn load(path: &Path, config: AppConfig) -> MemoiraResult<Self> {
        let store = Arc::new(JsonFileStore::new(path));
        let notes = NoteStore::open(store).await?;
        tracing::debug!("Loaded notes from {}", path.display());
        Ok(Self {
            notes,
            config,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn folder_exists(&self, id: &str) -> bool {
        self.notes.list_folders().iter().any(|f| f.id == id)
    }

    pub fn require_task(&self, id: TaskId) -> anyhow::Result<&Task> {
        self.notes
            .get_task(id)
            .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))
    }

    pub fn require_folder(&self, id: &str) -> anyhow::Result<()> {
        if self.folder_exists(id) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Folder not found: {}", id))
        }
    }
}
